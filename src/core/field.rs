//! Structured key-value fields carried by every event
//!
//! This module provides:
//! - `FieldValue`: a single field value (scalars, lists, nested maps)
//! - `Fields`: the field mapping attached to loggers and events
//! - `merge`: base/call-site precedence used by the logger

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Field mapping from name to value. Iteration order is not significant.
pub type Fields = HashMap<String, FieldValue>;

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    List(Vec<FieldValue>),
    Map(HashMap<String, FieldValue>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
            FieldValue::List(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            FieldValue::Map(map) => {
                f.write_str("{")?;
                for (idx, (key, value)) in sorted(map).into_iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}={}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl FieldValue {
    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Null => serde_json::Value::Null,
            FieldValue::List(items) => {
                serde_json::Value::Array(items.iter().map(FieldValue::to_json_value).collect())
            }
            FieldValue::Map(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json_value()))
                    .collect(),
            ),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        FieldValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

impl From<HashMap<String, FieldValue>> for FieldValue {
    fn from(map: HashMap<String, FieldValue>) -> Self {
        FieldValue::Map(map)
    }
}

/// Merge call-site fields over base fields into a fresh map.
///
/// On key collision the call-site value wins. Neither input is modified.
pub fn merge(base: &Fields, call_site: Option<&Fields>) -> Fields {
    let extra = call_site.map_or(0, HashMap::len);
    let mut merged = Fields::with_capacity(base.len() + extra);
    merged.extend(base.iter().map(|(k, v)| (k.clone(), v.clone())));
    if let Some(call_site) = call_site {
        merged.extend(call_site.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    merged
}

/// Format fields as space-separated `key=value` pairs, sorted by key
pub fn format_fields(fields: &Fields) -> String {
    sorted(fields)
        .into_iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Entries sorted by key, for stable text output
pub(crate) fn sorted(fields: &HashMap<String, FieldValue>) -> Vec<(&String, &FieldValue)> {
    let mut entries: Vec<_> = fields.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, FieldValue)]) -> Fields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_merge_call_site_wins() {
        let base = fields(&[("service", "x".into()), ("version", 1.into())]);
        let call = fields(&[("service", "y".into())]);

        let merged = merge(&base, Some(&call));

        assert_eq!(merged.len(), 2);
        assert_eq!(merged["service"], FieldValue::from("y"));
        assert_eq!(merged["version"], FieldValue::Int(1));
    }

    #[test]
    fn test_merge_leaves_inputs_untouched() {
        let base = fields(&[("a", 1.into())]);
        let call = fields(&[("a", 2.into()), ("b", 3.into())]);

        let _ = merge(&base, Some(&call));

        assert_eq!(base, fields(&[("a", 1.into())]));
        assert_eq!(call.len(), 2);
    }

    #[test]
    fn test_merge_without_call_site_fields() {
        let base = fields(&[("a", true.into())]);
        assert_eq!(merge(&base, None), base);
        assert!(merge(&Fields::new(), None).is_empty());
    }

    #[test]
    fn test_format_fields_sorted() {
        let f = fields(&[("zeta", 1.into()), ("alpha", "a".into())]);
        assert_eq!(format_fields(&f), "alpha=a zeta=1");
    }

    #[test]
    fn test_nested_display() {
        let mut inner = HashMap::new();
        inner.insert("port".to_string(), FieldValue::Int(8080));
        inner.insert("host".to_string(), FieldValue::from("localhost"));

        assert_eq!(FieldValue::Map(inner).to_string(), "{host=localhost, port=8080}");
        assert_eq!(FieldValue::from(vec![1, 2, 3]).to_string(), "[1, 2, 3]");
        assert_eq!(FieldValue::from(None::<i32>).to_string(), "null");
    }

    #[test]
    fn test_untagged_deserialization() {
        let parsed: Fields =
            serde_json::from_str(r#"{"s":"x","i":3,"f":1.5,"b":false,"n":null,"l":[1,"a"],"m":{"k":true}}"#)
                .unwrap();

        assert_eq!(parsed["s"], FieldValue::from("x"));
        assert_eq!(parsed["i"], FieldValue::Int(3));
        assert_eq!(parsed["f"], FieldValue::Float(1.5));
        assert_eq!(parsed["b"], FieldValue::Bool(false));
        assert_eq!(parsed["n"], FieldValue::Null);
        assert_eq!(
            parsed["l"],
            FieldValue::List(vec![FieldValue::Int(1), FieldValue::from("a")])
        );
        assert!(matches!(parsed["m"], FieldValue::Map(_)));
    }

    #[test]
    fn test_to_json_value() {
        let value = FieldValue::from(vec![FieldValue::Int(1), FieldValue::Float(f64::NAN)]);
        assert_eq!(value.to_json_value(), serde_json::json!([1, null]));
    }
}
