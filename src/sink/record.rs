//! Structured log record model: severity channels and typed fields.

use std::fmt;

/// Severity channel a record is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    /// Syslog level used by the GELF wire format (informational/warning/error).
    pub fn syslog_level(self) -> u8 {
        match self {
            Severity::Info => 6,
            Severity::Warn => 4,
            Severity::Error => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed value carried by a [`Field`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Str(String),
    I32(i32),
    I64(i64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::I32(n) => write!(f, "{n}"),
            FieldValue::I64(n) => write!(f, "{n}"),
        }
    }
}

impl From<&FieldValue> for serde_json::Value {
    fn from(value: &FieldValue) -> Self {
        match value {
            FieldValue::Str(s) => serde_json::Value::from(s.as_str()),
            FieldValue::I32(n) => serde_json::Value::from(*n),
            FieldValue::I64(n) => serde_json::Value::from(*n),
        }
    }
}

/// A domain-namespaced key (e.g. `http.method`) paired with a typed value.
///
/// Fields keep their insertion order within a record. Duplicate keys are
/// permitted and simply appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub key: String,
    pub value: FieldValue,
}

impl Field {
    pub fn str(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: FieldValue::Str(value.into()),
        }
    }

    pub fn i32(key: impl Into<String>, value: i32) -> Self {
        Self {
            key: key.into(),
            value: FieldValue::I32(value),
        }
    }

    pub fn i64(key: impl Into<String>, value: i64) -> Self {
        Self {
            key: key.into(),
            value: FieldValue::I64(value),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// One complete log emission: the message type shipped over the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub severity: Severity,
    pub message: String,
    pub fields: Vec<Field>,
}

/// Renders an ordered field list as `key=value` pairs separated by spaces.
pub fn format_fields(fields: &[Field]) -> String {
    let mut out = String::new();
    for field in fields {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&field.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syslog_levels() {
        assert_eq!(Severity::Info.syslog_level(), 6);
        assert_eq!(Severity::Warn.syslog_level(), 4);
        assert_eq!(Severity::Error.syslog_level(), 3);
    }

    #[test]
    fn test_field_constructors() {
        assert_eq!(
            Field::str("http.method", "GET").value,
            FieldValue::Str("GET".to_string())
        );
        assert_eq!(Field::i32("http.status_code", 200).value, FieldValue::I32(200));
        assert_eq!(Field::i64("duration", 1_500_000).value, FieldValue::I64(1_500_000));
    }

    #[test]
    fn test_field_value_to_json() {
        let v: serde_json::Value = (&FieldValue::Str("a".to_string())).into();
        assert_eq!(v, serde_json::json!("a"));

        let v: serde_json::Value = (&FieldValue::I32(-1)).into();
        assert_eq!(v, serde_json::json!(-1));

        let v: serde_json::Value = (&FieldValue::I64(9_000_000_000)).into();
        assert_eq!(v, serde_json::json!(9_000_000_000i64));
    }

    #[test]
    fn test_format_fields() {
        let fields = vec![
            Field::str("http.method", "GET"),
            Field::i32("http.status_code", 200),
        ];
        assert_eq!(format_fields(&fields), "http.method=GET http.status_code=200");
        assert_eq!(format_fields(&[]), "");
    }

    #[test]
    fn test_duplicate_keys_are_appended() {
        let fields = vec![Field::str("k", "a"), Field::str("k", "b")];
        assert_eq!(format_fields(&fields), "k=a k=b");
    }
}
