//! Notice aggregate: every occurrence of one code within one report.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Number, Value as Json};
use std::fmt;

/// Ordered severity of a notice code. `Info < Warning < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("INFO"),
            Severity::Warning => f.write_str("WARNING"),
            Severity::Error => f.write_str("ERROR"),
        }
    }
}

/// Context of a single notice occurrence (row numbers, field names, ...).
pub type NoticeContext = Map<String, Json>;

/// Store every number as a float so `1` and `1.0` compare equal.
fn normalize_numbers(value: Json) -> Json {
    match value {
        Json::Number(n) => n
            .as_f64()
            .and_then(Number::from_f64)
            .map(Json::Number)
            .unwrap_or(Json::Number(n)),
        Json::Array(items) => Json::Array(items.into_iter().map(normalize_numbers).collect()),
        Json::Object(map) => Json::Object(normalize_context(map)),
        other => other,
    }
}

fn normalize_context(ctx: NoticeContext) -> NoticeContext {
    ctx.into_iter()
        .map(|(k, v)| (k, normalize_numbers(v)))
        .collect()
}

fn deserialize_contexts<'de, D>(deserializer: D) -> Result<Vec<NoticeContext>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<NoticeContext>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(normalize_context).collect())
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One notice group of a validation report.
///
/// `contexts` is deserialized from the group's `notices` array (or
/// `sampleNotices`). Its length is not checked against `total_notices`.
/// Context numbers are held as floats.
pub struct NoticeAggregate {
    code: String,
    severity: Severity,
    total_notices: u64,
    #[serde(
        default,
        rename = "notices",
        alias = "sampleNotices",
        deserialize_with = "deserialize_contexts"
    )]
    contexts: Vec<NoticeContext>,
}

impl NoticeAggregate {
    pub fn new(
        code: impl Into<String>,
        severity: Severity,
        total_notices: u64,
        contexts: Vec<NoticeContext>,
    ) -> Self {
        Self {
            code: code.into(),
            severity,
            total_notices,
            contexts: contexts.into_iter().map(normalize_context).collect(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn total_notices(&self) -> u64 {
        self.total_notices
    }

    pub fn contexts(&self) -> &[NoticeContext] {
        &self.contexts
    }

    /// True when the severity is at or above `ERROR`.
    pub fn is_error(&self) -> bool {
        self.severity >= Severity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx(v: Json) -> NoticeContext {
        match v {
            Json::Object(m) => m,
            _ => panic!("context must be an object"),
        }
    }

    #[test]
    fn test_severity_is_totally_ordered() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert_eq!(Severity::Error.to_string(), "ERROR");
    }

    #[test]
    fn test_is_error_only_for_error_level() {
        assert!(NoticeAggregate::new("a", Severity::Error, 1, vec![]).is_error());
        assert!(!NoticeAggregate::new("a", Severity::Warning, 1, vec![]).is_error());
        assert!(!NoticeAggregate::new("a", Severity::Info, 1, vec![]).is_error());
    }

    #[test]
    fn test_equality_respects_context_order() {
        let c1 = ctx(json!({"csvRowNumber": 1}));
        let c2 = ctx(json!({"csvRowNumber": 2}));
        let a = NoticeAggregate::new("a", Severity::Error, 2, vec![c1.clone(), c2.clone()]);
        let b = NoticeAggregate::new("a", Severity::Error, 2, vec![c1.clone(), c2.clone()]);
        let swapped = NoticeAggregate::new("a", Severity::Error, 2, vec![c2, c1]);
        assert_eq!(a, b);
        assert_ne!(a, swapped);
    }

    #[test]
    fn test_equality_compares_every_field() {
        let base = NoticeAggregate::new("a", Severity::Error, 2, vec![]);
        assert_ne!(base, NoticeAggregate::new("b", Severity::Error, 2, vec![]));
        assert_ne!(base, NoticeAggregate::new("a", Severity::Warning, 2, vec![]));
        assert_ne!(base, NoticeAggregate::new("a", Severity::Error, 3, vec![]));
    }

    #[test]
    fn test_deserialize_with_notices_and_sample_alias() {
        let a: NoticeAggregate = serde_json::from_value(json!({
            "code": "duplicate_key",
            "severity": "ERROR",
            "totalNotices": 3,
            "notices": [{"fieldName": "stop_id"}]
        }))
        .unwrap();
        assert_eq!(a.code(), "duplicate_key");
        assert_eq!(a.total_notices(), 3);
        assert_eq!(a.contexts().len(), 1);

        let b: NoticeAggregate = serde_json::from_value(json!({
            "code": "duplicate_key",
            "severity": "ERROR",
            "totalNotices": 3,
            "sampleNotices": [{"fieldName": "stop_id"}]
        }))
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_integer_and_float_contexts_are_equal() {
        let from = |row: Json| -> NoticeAggregate {
            serde_json::from_value(json!({
                "code": "a",
                "severity": "ERROR",
                "totalNotices": 1,
                "notices": [{"csvRowNumber": row, "nested": [row]}]
            }))
            .unwrap()
        };
        assert_eq!(from(json!(1)), from(json!(1.0)));
        assert_ne!(from(json!(1)), from(json!(2.0)));
        assert_eq!(
            NoticeAggregate::new("a", Severity::Error, 1, vec![ctx(json!({"x": 1}))]),
            NoticeAggregate::new("a", Severity::Error, 1, vec![ctx(json!({"x": 1.0}))])
        );
    }

    #[test]
    fn test_deserialize_without_contexts_and_bad_severity() {
        let a: NoticeAggregate = serde_json::from_value(json!({
            "code": "x",
            "severity": "INFO",
            "totalNotices": 0
        }))
        .unwrap();
        assert!(a.contexts().is_empty());

        let bad = serde_json::from_value::<NoticeAggregate>(json!({
            "code": "x",
            "severity": "FATAL",
            "totalNotices": 1
        }));
        assert!(bad.is_err());
    }
}
