//! Equality and ordering rules for JSON operands.
//!
//! - Numbers: compared numerically, so `1 == 1.0`
//! - Strings: compared byte-lexicographically
//! - Booleans: false < true
//! - Null == Null
//! - Arrays and objects: equal when structurally equal under the same rules
//! - Mismatched kinds: never equal, and ordering them is an error

use crate::error::{Error, Result};
use serde_json::{Number, Value};
use std::cmp::Ordering;

/// Short name of a value's kind, used in error messages.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b) == Some(Ordering::Equal),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| values_equal(x, y)))
        }
        _ => left == right,
    }
}

/// Orders two values of the same scalar kind.
pub fn compare_values(left: &Value, right: &Value) -> Result<Ordering> {
    let ordering = match (left, right) {
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    };
    ordering.ok_or_else(|| Error::Incomparable {
        left: describe(left),
        right: describe(right),
    })
}

fn compare_numbers(a: &Number, b: &Number) -> Option<Ordering> {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return Some(x.cmp(&y));
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return Some(x.cmp(&y));
    }
    a.as_f64()?.partial_cmp(&b.as_f64()?)
}

fn describe(value: &Value) -> String {
    match value {
        Value::Array(_) | Value::Object(_) => kind_name(value).to_string(),
        _ => format!("{} {}", kind_name(value), value),
    }
}
