//! Dynamic values shared by element parameters and token sources
//!
//! Parameters arrive from the wire format as loosely typed values, and token
//! sources hold the same kind of values. Builders ask for a concrete Rust type
//! through [`FromValue`], which knows the shape it expects and how to coerce a
//! raw value or a literal string into it.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::token::FunctionCall;

/// A record of named values, used to scope repeated and linked resolutions
pub type Record = BTreeMap<String, Value>;

/// A loosely typed value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
    Record(Record),
}

impl Value {
    /// Short name of the value's shape, used in diagnostics
    pub fn describe(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// View this value as a sequence of records.
    ///
    /// A single record yields one entry; a list yields its entries only if
    /// every element is a record.
    pub fn as_records(&self) -> Option<Vec<&Record>> {
        match self {
            Value::Record(record) => Some(vec![record]),
            Value::List(items) => items
                .iter()
                .map(|item| match item {
                    Value::Record(record) => Some(record),
                    _ => None,
                })
                .collect(),
            _ => None,
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

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Record(value)
    }
}

/// The shape a builder expects a parameter to resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    Text,
    Integer,
    Float,
    Boolean,
    List,
    Function,
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueShape::Text => write!(f, "text"),
            ValueShape::Integer => write!(f, "integer"),
            ValueShape::Float => write!(f, "float"),
            ValueShape::Boolean => write!(f, "boolean"),
            ValueShape::List => write!(f, "list"),
            ValueShape::Function => write!(f, "function"),
        }
    }
}

/// Conversion from a resolved value into a typed builder field
pub trait FromValue: Sized {
    /// The shape reported in diagnostics when conversion fails
    const SHAPE: ValueShape;

    /// Convert a value taken from a parameter map or a token source
    fn from_value(value: &Value) -> Option<Self>;

    /// Parse a literal string
    fn from_literal(raw: &str) -> Option<Self>;

    /// Convert a function reference; most shapes cannot hold one
    fn from_function(_call: &FunctionCall) -> Option<Self> {
        None
    }
}

impl FromValue for String {
    const SHAPE: ValueShape = ValueShape::Text;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_text().map(str::to_string)
    }

    fn from_literal(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }

    fn from_function(call: &FunctionCall) -> Option<Self> {
        Some(call.to_js())
    }
}

impl FromValue for i64 {
    const SHAPE: ValueShape = ValueShape::Integer;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(i) => Some(*i),
            Value::Text(s) => Self::from_literal(s),
            _ => None,
        }
    }

    fn from_literal(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl FromValue for f64 {
    const SHAPE: ValueShape = ValueShape::Float;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            Value::Text(s) => Self::from_literal(s),
            _ => None,
        }
    }

    fn from_literal(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl FromValue for bool {
    const SHAPE: ValueShape = ValueShape::Boolean;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Boolean(b) => Some(*b),
            Value::Text(s) => Self::from_literal(s),
            _ => None,
        }
    }

    fn from_literal(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("true") {
            Some(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }
}

/// Separator for list literals such as `"Name||Age||$$text$city"`
pub const LIST_SEPARATOR: &str = "||";

impl FromValue for Vec<String> {
    const SHAPE: ValueShape = ValueShape::List;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(items) => items.iter().map(String::from_value).collect(),
            Value::Text(s) => Self::from_literal(s),
            _ => None,
        }
    }

    fn from_literal(raw: &str) -> Option<Self> {
        Some(
            raw.split(LIST_SEPARATOR)
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}

/// Normalize a keyword for case-insensitive matching (`Table-Row` → `table_row`)
pub(crate) fn normalize_keyword(raw: &str) -> String {
    raw.trim().to_ascii_lowercase().replace('-', "_")
}

/// Implement [`FromValue`] for keyword enums that implement `FromStr`
macro_rules! keyword_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::value::FromValue for $ty {
                const SHAPE: $crate::value::ValueShape = $crate::value::ValueShape::Text;

                fn from_value(value: &$crate::value::Value) -> Option<Self> {
                    value.as_text().and_then(Self::from_literal)
                }

                fn from_literal(raw: &str) -> Option<Self> {
                    raw.parse().ok()
                }
            }
        )*
    };
}

pub(crate) use keyword_value;
