//! Bind values.
//!
//! Values never appear in the rendered SQL. They travel beside it in the
//! same order as the placeholders that stand in for them.

use crate::error::{SqlError, SqlResult};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A scalar bind value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// `true` for SQL NULL and for the text `NULL` in any letter case.
    pub fn is_null_like(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.eq_ignore_ascii_case("null"),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Convert a JSON scalar. Arrays and objects are rejected.
    pub fn from_json(json: &JsonValue) -> SqlResult<Self> {
        match json {
            JsonValue::Null => Ok(Value::Null),
            JsonValue::Bool(b) => Ok(Value::Bool(*b)),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Ok(Value::Int(i)),
                None => n.as_f64().map(Value::Float).ok_or_else(|| {
                    SqlError::classification(format!("Number {n} does not fit a bind value"))
                }),
            },
            JsonValue::String(s) => Ok(Value::Text(s.clone())),
            JsonValue::Array(_) | JsonValue::Object(_) => Err(SqlError::classification(format!(
                "Expected a scalar value, got {json}"
            ))),
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// The value side of a filter before it has been classified.
///
/// A list always becomes an `IN` predicate; a scalar becomes a comparison or a
/// NULL check.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Value(Value),
    List(Vec<Value>),
}

impl Operand {
    /// Convert any JSON value. Arrays must hold scalars only.
    pub fn from_json(json: &JsonValue) -> SqlResult<Self> {
        match json {
            JsonValue::Array(items) => items
                .iter()
                .map(Value::from_json)
                .collect::<SqlResult<Vec<_>>>()
                .map(Operand::List),
            other => Value::from_json(other).map(Operand::Value),
        }
    }
}

impl From<Value> for Operand {
    fn from(v: Value) -> Self {
        Operand::Value(v)
    }
}

macro_rules! impl_operand_from_scalar {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Operand {
                fn from(v: $t) -> Self {
                    Operand::Value(Value::from(v))
                }
            }
        )*
    };
}

impl_operand_from_scalar!(bool, i8, i16, i32, i64, u8, u16, u32, f32, f64, &str, String);

impl<T: Into<Value>> From<Option<T>> for Operand {
    fn from(v: Option<T>) -> Self {
        Operand::Value(Value::from(v))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Operand {
    fn from(values: Vec<T>) -> Self {
        Operand::List(values.into_iter().map(Into::into).collect())
    }
}
