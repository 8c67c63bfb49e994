//! Core types for viewflow.
//!
//! These types define the foundation that everything builds on.
//! They flow through streams and contexts and define what the renderer
//! can turn into text content.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Value
// =============================================================================

/// A dynamic scalar carried by streams and rendered as text content.
///
/// Bind directives render whatever the stream emits; repeat directives carry
/// one `Value` per array element into the per-item context (`nextVal`), plus
/// the item index (`nextKey`). Using an enum keeps comparisons exact - no
/// stringification until the renderer actually produces a text node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Text content.
    Text(String),
    /// Integer (also used for repeat indices).
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Boolean, rendered as `true`/`false`.
    Bool(bool),
}

impl Value {
    /// Render the value as text content, exactly as a bind emission would.
    pub fn as_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display() {
        assert_eq!(Value::from("hello!").as_text(), "hello!");
        assert_eq!(Value::from(2i64).as_text(), "2");
        assert_eq!(Value::from(true).as_text(), "true");
        assert_eq!(Value::Float(1.5).as_text(), "1.5");
    }

    #[test]
    fn test_value_serde_untagged() {
        let v: Value = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(v, Value::Text("abc".into()));

        let v: Value = serde_json::from_str("42").unwrap();
        assert_eq!(v, Value::Int(42));

        let v: Value = serde_json::from_str("false").unwrap();
        assert_eq!(v, Value::Bool(false));
    }
}
