use super::{Bindings, Function, ValueFunction, paths_from_child_list, paths_from_children};
use crate::error::{Error, Result};
use crate::values::kind_name;
use serde_json::Value;

/// Number of elements in an array, keys in an object or characters in a string.
#[derive(Debug)]
pub struct Size {
    inner: ValueFunction,
}

impl Size {
    pub fn new(inner: ValueFunction) -> Self {
        Self { inner }
    }
}

paths_from_children!(Size, inner);

impl Function<Value> for Size {
    fn evaluate(&self, bindings: &Bindings<'_>) -> Result<Value> {
        let size = match self.inner.evaluate(bindings)? {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            Value::String(s) => s.chars().count(),
            other => {
                return Err(Error::type_mismatch(
                    "Size",
                    format!("cannot count a {}", kind_name(&other)),
                ));
            }
        };
        Ok(Value::from(size))
    }
}

/// Arithmetic sum. Integer operands give an integer, anything else a float.
#[derive(Debug)]
pub struct Sum {
    children: Vec<ValueFunction>,
}

impl Sum {
    pub fn new(children: Vec<ValueFunction>) -> Self {
        Self { children }
    }
}

paths_from_child_list!(Sum, children);

impl Function<Value> for Sum {
    fn evaluate(&self, bindings: &Bindings<'_>) -> Result<Value> {
        let mut integer: Option<i64> = Some(0);
        let mut float = 0.0;
        for child in &self.children {
            let number = match child.evaluate(bindings)? {
                Value::Number(n) => n,
                other => {
                    return Err(Error::type_mismatch(
                        "Sum",
                        format!("expected a number, got {}", kind_name(&other)),
                    ));
                }
            };
            integer = integer.zip(number.as_i64()).and_then(|(a, b)| a.checked_add(b));
            float += number.as_f64().unwrap_or(f64::NAN);
        }
        Ok(match integer {
            Some(total) => Value::from(total),
            None => Value::from(float),
        })
    }
}
