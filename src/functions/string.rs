use super::{Bindings, Function, ValueFunction, paths_from_children};
use crate::error::{Error, Result};
use crate::values::kind_name;
use serde_json::Value;

/// Lower-cases a string operand. `null` passes through unchanged.
#[derive(Debug)]
pub struct LowerCase {
    inner: ValueFunction,
}

impl LowerCase {
    pub fn new(inner: ValueFunction) -> Self {
        Self { inner }
    }
}

paths_from_children!(LowerCase, inner);

impl Function<Value> for LowerCase {
    fn evaluate(&self, bindings: &Bindings<'_>) -> Result<Value> {
        match self.inner.evaluate(bindings)? {
            Value::String(s) => Ok(Value::String(s.to_lowercase())),
            Value::Null => Ok(Value::Null),
            other => Err(Error::type_mismatch(
                "LowerCase",
                format!("expected a string, got {}", kind_name(&other)),
            )),
        }
    }
}

/// Reads the needle and haystack operands as strings.
///
/// Returns `None` when the haystack is `null`, which never matches.
fn string_operands(
    function: &str,
    needle: &ValueFunction,
    haystack: &ValueFunction,
    bindings: &Bindings<'_>,
) -> Result<Option<(String, String)>> {
    let needle = needle.evaluate(bindings)?;
    let haystack = haystack.evaluate(bindings)?;
    match (needle, haystack) {
        (_, Value::Null) => Ok(None),
        (Value::String(needle), Value::String(haystack)) => Ok(Some((needle, haystack))),
        (needle, haystack) => Err(Error::type_mismatch(
            function,
            format!(
                "expected string operands, got {} and {}",
                kind_name(&needle),
                kind_name(&haystack)
            ),
        )),
    }
}

/// Declares a two-child string test `test(haystack, needle)`.
macro_rules! string_node {
    ($(#[$doc:meta])* $name:ident, $test:expr) => {
        $(#[$doc])*
        #[derive(Debug)]
        pub struct $name {
            needle: ValueFunction,
            haystack: ValueFunction,
        }

        impl $name {
            pub fn new(needle: ValueFunction, haystack: ValueFunction) -> Self {
                Self { needle, haystack }
            }
        }

        paths_from_children!($name, needle, haystack);

        impl Function<bool> for $name {
            fn evaluate(&self, bindings: &Bindings<'_>) -> Result<bool> {
                bindings.exists(self, |row| {
                    let test: fn(&str, &str) -> bool = $test;
                    Ok(string_operands(stringify!($name), &self.needle, &self.haystack, row)?
                        .is_some_and(|(needle, haystack)| test(&haystack, &needle)))
                })
            }
        }
    };
}

string_node!(
    /// True iff the haystack contains the needle.
    StringContains,
    |haystack, needle| haystack.contains(needle)
);
string_node!(
    /// True iff the haystack starts with the needle.
    StringStartsWith,
    |haystack, needle| haystack.starts_with(needle)
);
string_node!(
    /// True iff the haystack ends with the needle.
    StringEndsWith,
    |haystack, needle| haystack.ends_with(needle)
);
