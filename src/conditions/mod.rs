//! Typed conditions keyed by stable operator tokens.
//!
//! A request parser maps a wire-level operator token to a [`Condition`] with
//! [`str::parse`] and calls [`Condition::transform`] with the raw path and
//! value. The value shape is checked before any node is built.
//!
//! Comparison tokens read `property OP value`; the factory's comparisons
//! put the value first, so `>` builds `value_smaller_than`.

use crate::error::{Error, Result};
use crate::factory::ConditionFactory;
use crate::functions::BoolFunction;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Condition {
    #[serde(rename = "=")]
    Equals,
    #[serde(rename = "<>")]
    NotEquals,
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "NOT IN")]
    NotIn,
    #[serde(rename = "BETWEEN")]
    Between,
    #[serde(rename = "NOT BETWEEN")]
    NotBetween,
    #[serde(rename = "IS NULL")]
    IsNull,
    #[serde(rename = "IS NOT NULL")]
    IsNotNull,
    #[serde(rename = "STRING_CONTAINS_CASE_INSENSITIVE")]
    StringContains,
    #[serde(rename = "STARTS_WITH_CASE_INSENSITIVE")]
    StartsWith,
    #[serde(rename = "ENDS_WITH_CASE_INSENSITIVE")]
    EndsWith,
    #[serde(rename = "ARRAY_CONTAINS_VALUE")]
    ArrayContainsValue,
    #[serde(rename = "ARRAY_SIZE")]
    ArraySize,
    #[serde(rename = "ARRAY_CONTAINS_ALL_VALUES")]
    ArrayContainsAllValues,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = ">=")]
    GreaterEqualsThan,
    #[serde(rename = "<")]
    SmallerThan,
    #[serde(rename = "<=")]
    SmallerEqualsThan,
}

impl Condition {
    pub const ALL: [Condition; 18] = [
        Condition::Equals,
        Condition::NotEquals,
        Condition::In,
        Condition::NotIn,
        Condition::Between,
        Condition::NotBetween,
        Condition::IsNull,
        Condition::IsNotNull,
        Condition::StringContains,
        Condition::StartsWith,
        Condition::EndsWith,
        Condition::ArrayContainsValue,
        Condition::ArraySize,
        Condition::ArrayContainsAllValues,
        Condition::GreaterThan,
        Condition::GreaterEqualsThan,
        Condition::SmallerThan,
        Condition::SmallerEqualsThan,
    ];

    /// The stable wire token of this condition.
    pub fn operator(&self) -> &'static str {
        match self {
            Condition::Equals => "=",
            Condition::NotEquals => "<>",
            Condition::In => "IN",
            Condition::NotIn => "NOT IN",
            Condition::Between => "BETWEEN",
            Condition::NotBetween => "NOT BETWEEN",
            Condition::IsNull => "IS NULL",
            Condition::IsNotNull => "IS NOT NULL",
            Condition::StringContains => "STRING_CONTAINS_CASE_INSENSITIVE",
            Condition::StartsWith => "STARTS_WITH_CASE_INSENSITIVE",
            Condition::EndsWith => "ENDS_WITH_CASE_INSENSITIVE",
            Condition::ArrayContainsValue => "ARRAY_CONTAINS_VALUE",
            Condition::ArraySize => "ARRAY_SIZE",
            Condition::ArrayContainsAllValues => "ARRAY_CONTAINS_ALL_VALUES",
            Condition::GreaterThan => ">",
            Condition::GreaterEqualsThan => ">=",
            Condition::SmallerThan => "<",
            Condition::SmallerEqualsThan => "<=",
        }
    }

    /// Validates `path` and `value` for this operator and builds its tree.
    pub fn transform<S: AsRef<str>>(&self, path: Option<&[S]>, value: &Value) -> Result<BoolFunction> {
        let op = self.operator();
        let path = match path {
            Some(path) if !path.is_empty() => path,
            Some(_) => return Err(Error::validation(op, "path must not be empty")),
            None => return Err(Error::validation(op, "a path is required")),
        };
        let factory = ConditionFactory::new();

        match self {
            Condition::Equals => factory.property_has_value(scalar(op, value)?, path),
            Condition::NotEquals => factory.property_has_not_value(scalar(op, value)?, path),
            Condition::In => factory.property_has_any_of_values(list(op, value)?, path),
            Condition::NotIn => factory.property_has_not_any_of_values(list(op, value)?, path),
            Condition::Between => {
                let (min, max) = range(op, value)?;
                factory.property_between_values_inclusive(min, max, path)
            }
            Condition::NotBetween => {
                let (min, max) = range(op, value)?;
                factory.property_not_between_values_inclusive(min, max, path)
            }
            Condition::IsNull => {
                null(op, value)?;
                factory.property_is_null(path)
            }
            Condition::IsNotNull => {
                null(op, value)?;
                factory.property_is_not_null(path)
            }
            Condition::StringContains => {
                factory.property_has_string_containing_case_insensitive_value(string(op, value)?, path)
            }
            Condition::StartsWith => factory.property_starts_with_case_insensitive(string(op, value)?, path),
            Condition::EndsWith => factory.property_ends_with_case_insensitive(string(op, value)?, path),
            Condition::ArrayContainsValue => factory.property_has_string_as_member(string(op, value)?, path),
            Condition::ArraySize => factory.property_has_size(size(op, value)?, path),
            Condition::ArrayContainsAllValues => {
                let values = list(op, value)?;
                if values.is_empty() {
                    return Err(Error::validation(op, "expected at least one value"));
                }
                factory.all_values_present_in_member_list_properties(values, path)
            }
            Condition::GreaterThan => factory.value_smaller_than(scalar(op, value)?, path),
            Condition::GreaterEqualsThan => factory.value_smaller_equals_than(scalar(op, value)?, path),
            Condition::SmallerThan => factory.value_greater_than(scalar(op, value)?, path),
            Condition::SmallerEqualsThan => factory.value_greater_equals_than(scalar(op, value)?, path),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.operator())
    }
}

impl FromStr for Condition {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Condition::ALL
            .into_iter()
            .find(|condition| condition.operator() == value)
            .ok_or_else(|| Error::validation(value, "unknown operator"))
    }
}

fn scalar(op: &str, value: &Value) -> Result<Value> {
    match value {
        Value::Bool(_) | Value::Number(_) | Value::String(_) => Ok(value.clone()),
        _ => Err(Error::validation(op, "expected a string, number or boolean")),
    }
}

fn string<'v>(op: &str, value: &'v Value) -> Result<&'v str> {
    value
        .as_str()
        .ok_or_else(|| Error::validation(op, "expected a string"))
}

fn list(op: &str, value: &Value) -> Result<Vec<Value>> {
    value
        .as_array()
        .cloned()
        .ok_or_else(|| Error::validation(op, "expected an array of values"))
}

fn range(op: &str, value: &Value) -> Result<(Value, Value)> {
    match value.as_array().map(Vec::as_slice) {
        Some([min, max]) => Ok((scalar(op, min)?, scalar(op, max)?)),
        _ => Err(Error::validation(op, "expected a [min, max] pair")),
    }
}

fn null(op: &str, value: &Value) -> Result<()> {
    if value.is_null() {
        Ok(())
    } else {
        Err(Error::validation(op, "no value is accepted"))
    }
}

fn size(op: &str, value: &Value) -> Result<usize> {
    value
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| Error::validation(op, "expected a non-negative integer"))
}
