//! Filter types for document-store query building.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Filter comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    /// Exact equality.
    Eq,
    /// Not equal.
    Ne,
    /// Membership in a value list.
    In,
}

/// A dynamic filter value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// A string value.
    String(String),
    /// A boolean value.
    Boolean(bool),
    /// A list of string values (for `In`).
    StringList(Vec<String>),
}

impl FilterValue {
    /// Whether a JSON field value matches this filter value under `op`.
    pub fn matches(&self, op: FilterOp, field: &Value) -> bool {
        match (op, self) {
            (FilterOp::Eq, Self::String(s)) => field.as_str() == Some(s.as_str()),
            (FilterOp::Eq, Self::Boolean(b)) => field.as_bool() == Some(*b),
            (FilterOp::Ne, Self::String(s)) => field.as_str() != Some(s.as_str()),
            (FilterOp::Ne, Self::Boolean(b)) => field.as_bool() != Some(*b),
            (FilterOp::In, Self::StringList(list)) => field
                .as_str()
                .is_some_and(|v| list.iter().any(|s| s == v)),
            _ => false,
        }
    }
}

/// A single filter condition on a named field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterField {
    /// The field name to filter on.
    pub field: String,
    /// The comparison operator.
    pub op: FilterOp,
    /// The value to compare against.
    pub value: FilterValue,
}

impl FilterField {
    /// Create a new filter field.
    pub fn new(field: impl Into<String>, op: FilterOp, value: FilterValue) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }

    /// Shorthand for a string equality filter.
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FilterOp::Eq, FilterValue::String(value.into()))
    }

    /// Shorthand for a boolean equality filter.
    pub fn eq_bool(field: impl Into<String>, value: bool) -> Self {
        Self::new(field, FilterOp::Eq, FilterValue::Boolean(value))
    }

    /// Shorthand for a string list membership filter.
    pub fn any_of(field: impl Into<String>, values: Vec<String>) -> Self {
        Self::new(field, FilterOp::In, FilterValue::StringList(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_eq_matches() {
        let f = FilterField::eq("status", "pending");
        assert!(f.value.matches(f.op, &json!("pending")));
        assert!(!f.value.matches(f.op, &json!("confirmed")));
        assert!(!f.value.matches(f.op, &json!(null)));
    }

    #[test]
    fn test_in_matches() {
        let f = FilterField::any_of("status", vec!["active".into(), "reversed".into()]);
        assert!(f.value.matches(f.op, &json!("active")));
        assert!(!f.value.matches(f.op, &json!("pending")));
    }
}
