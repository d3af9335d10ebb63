use super::{Bindings, Function, ValueFunction, paths_from_child_list, paths_from_children};
use crate::error::{Error, Result};
use crate::values::{compare_values, kind_name, values_equal};
use serde_json::Value;
use std::cmp::Ordering;

/// True iff every child evaluates to the same value.
#[derive(Debug)]
pub struct AllEqual {
    children: Vec<ValueFunction>,
}

impl AllEqual {
    pub fn new(children: Vec<ValueFunction>) -> Result<Self> {
        if children.is_empty() {
            return Err(Error::precondition("AllEqual needs at least one child"));
        }
        Ok(Self { children })
    }
}

paths_from_child_list!(AllEqual, children);

impl Function<bool> for AllEqual {
    fn evaluate(&self, bindings: &Bindings<'_>) -> Result<bool> {
        bindings.exists(self, |row| {
            let mut children = self.children.iter();
            let first = match children.next() {
                Some(child) => child.evaluate(row)?,
                None => return Ok(true),
            };
            for child in children {
                if !values_equal(&first, &child.evaluate(row)?) {
                    return Ok(false);
                }
            }
            Ok(true)
        })
    }
}

/// True iff `candidate` is an element of the array `values`.
#[derive(Debug)]
pub struct OneOf {
    values: ValueFunction,
    candidate: ValueFunction,
}

impl OneOf {
    pub fn new(values: ValueFunction, candidate: ValueFunction) -> Self {
        Self { values, candidate }
    }
}

paths_from_children!(OneOf, values, candidate);

impl Function<bool> for OneOf {
    fn evaluate(&self, bindings: &Bindings<'_>) -> Result<bool> {
        bindings.exists(self, |row| {
            let values = self.values.evaluate(row)?;
            let candidate = self.candidate.evaluate(row)?;
            match values {
                Value::Array(items) => Ok(items.iter().any(|item| values_equal(item, &candidate))),
                other => Err(Error::type_mismatch(
                    "OneOf",
                    format!("expected an array of values, got {}", kind_name(&other)),
                )),
            }
        })
    }
}

/// True iff `min <= subject <= max`.
#[derive(Debug)]
pub struct BetweenInclusive {
    min: ValueFunction,
    max: ValueFunction,
    subject: ValueFunction,
}

impl BetweenInclusive {
    pub fn new(min: ValueFunction, max: ValueFunction, subject: ValueFunction) -> Self {
        Self { min, max, subject }
    }
}

paths_from_children!(BetweenInclusive, min, max, subject);

impl Function<bool> for BetweenInclusive {
    fn evaluate(&self, bindings: &Bindings<'_>) -> Result<bool> {
        bindings.exists(self, |row| {
            let min = self.min.evaluate(row)?;
            let max = self.max.evaluate(row)?;
            let subject = self.subject.evaluate(row)?;
            Ok(compare_values(&min, &subject)? != Ordering::Greater
                && compare_values(&subject, &max)? != Ordering::Greater)
        })
    }
}

#[derive(Debug)]
pub struct IsNull {
    inner: ValueFunction,
}

impl IsNull {
    pub fn new(inner: ValueFunction) -> Self {
        Self { inner }
    }
}

paths_from_children!(IsNull, inner);

impl Function<bool> for IsNull {
    fn evaluate(&self, bindings: &Bindings<'_>) -> Result<bool> {
        bindings.exists(self, |row| Ok(self.inner.evaluate(row)?.is_null()))
    }
}

/// Declares a two-child ordering node holding when `accept` holds for the
/// ordering of its left child against its right child.
macro_rules! ordering_node {
    ($(#[$doc:meta])* $name:ident, $accept:expr) => {
        $(#[$doc])*
        #[derive(Debug)]
        pub struct $name {
            left: ValueFunction,
            right: ValueFunction,
        }

        impl $name {
            pub fn new(left: ValueFunction, right: ValueFunction) -> Self {
                Self { left, right }
            }
        }

        paths_from_children!($name, left, right);

        impl Function<bool> for $name {
            fn evaluate(&self, bindings: &Bindings<'_>) -> Result<bool> {
                bindings.exists(self, |row| {
                    let left = self.left.evaluate(row)?;
                    let right = self.right.evaluate(row)?;
                    let accept: fn(Ordering) -> bool = $accept;
                    Ok(accept(compare_values(&left, &right)?))
                })
            }
        }
    };
}

ordering_node!(
    /// `left > right`
    Greater,
    Ordering::is_gt
);
ordering_node!(
    /// `left >= right`
    GreaterEquals,
    Ordering::is_ge
);
ordering_node!(
    /// `left < right`
    Smaller,
    Ordering::is_lt
);
ordering_node!(
    /// `left <= right`
    SmallerEquals,
    Ordering::is_le
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::{Property, Value as Constant};
    use crate::paths::{PathMode, PropertyPath};
    use serde_json::json;

    fn constant(value: Value) -> ValueFunction {
        Box::new(Constant::new(value))
    }

    fn property(mode: PathMode, segments: &[&str]) -> ValueFunction {
        Box::new(Property::new(PropertyPath::shared(mode, segments).unwrap()))
    }

    #[test]
    fn test_one_of() {
        let root = json!({});
        let empty = OneOf::new(constant(json!([])), constant(json!("x")));
        assert!(!empty.apply(&root).unwrap());
        let hit = OneOf::new(constant(json!(["a", "b"])), constant(json!("a")));
        assert!(hit.apply(&root).unwrap());
        let miss = OneOf::new(constant(json!(["a", "b"])), constant(json!("c")));
        assert!(!miss.apply(&root).unwrap());
    }

    #[test]
    fn test_one_of_requires_array() {
        let root = json!({});
        let node = OneOf::new(constant(json!("ab")), constant(json!("a")));
        assert!(matches!(node.apply(&root), Err(Error::TypeMismatch { .. })));
    }

    #[test]
    fn test_all_equal_is_existential_over_unpacked_values() {
        let root = json!({ "books": [{ "year": 1999 }, { "year": 2005 }] });
        let node = AllEqual::new(vec![
            property(PathMode::Unpack, &["books", "year"]),
            constant(json!(2005)),
        ])
        .unwrap();
        assert!(node.apply(&root).unwrap());
    }

    #[test]
    fn test_between_inclusive_bounds() {
        let root = json!({ "pages": [10, 250] });
        let between = |min: i64, max: i64| {
            BetweenInclusive::new(
                constant(json!(min)),
                constant(json!(max)),
                property(PathMode::Unpack, &["pages"]),
            )
        };
        assert!(between(250, 300).apply(&root).unwrap());
        assert!(between(1, 10).apply(&root).unwrap());
        assert!(!between(11, 249).apply(&root).unwrap());
    }

    #[test]
    fn test_ordering_nodes_keep_argument_order() {
        let root = json!({ "n": 5 });
        let n = || property(PathMode::Direct, &["n"]);
        assert!(Greater::new(constant(json!(6)), n()).apply(&root).unwrap());
        assert!(!Greater::new(constant(json!(5)), n()).apply(&root).unwrap());
        assert!(GreaterEquals::new(constant(json!(5)), n()).apply(&root).unwrap());
        assert!(Smaller::new(constant(json!(4)), n()).apply(&root).unwrap());
        assert!(SmallerEquals::new(constant(json!(5)), n()).apply(&root).unwrap());
        assert!(!SmallerEquals::new(constant(json!(6)), n()).apply(&root).unwrap());
    }

    #[test]
    fn test_ordering_mixed_kinds_fails() {
        let root = json!({ "n": "5" });
        let node = Greater::new(constant(json!(6)), property(PathMode::Direct, &["n"]));
        assert!(matches!(node.apply(&root), Err(Error::Incomparable { .. })));
    }

    #[test]
    fn test_is_null() {
        let root = json!({ "a": null, "b": [1, null] , "c": [1] });
        assert!(IsNull::new(property(PathMode::Direct, &["a"])).apply(&root).unwrap());
        assert!(IsNull::new(property(PathMode::Unpack, &["b"])).apply(&root).unwrap());
        assert!(!IsNull::new(property(PathMode::Unpack, &["c"])).apply(&root).unwrap());
    }
}
