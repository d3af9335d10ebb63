//! Builds named condition trees from function nodes.
//!
//! Every method returns a fresh tree. Path arguments must name at least one
//! property; an empty path fails before any node is built. Negated
//! predicates are always the positive tree wrapped in [`InvertedBoolean`].

use crate::error::{Error, Result};
use crate::functions::{
    AllEqual, AllTrue, AnyTrue, BetweenInclusive, BoolFunction, Greater, GreaterEquals,
    InvertedBoolean, IsNull, LowerCase, OneOf, Property, Size, Smaller, SmallerEquals,
    StringContains, StringEndsWith, StringStartsWith, Value, ValueFunction,
};
use crate::paths::{PathMode, PropertyPath};
use serde_json::Value as JsonValue;

#[derive(Debug, Default, Clone, Copy)]
pub struct ConditionFactory;

fn property<S: AsRef<str>>(mode: PathMode, path: &[S]) -> Result<ValueFunction> {
    Ok(Box::new(Property::new(PropertyPath::shared(mode, path)?)))
}

fn constant(value: impl Into<JsonValue>) -> ValueFunction {
    Box::new(Value::new(value.into()))
}

fn lower(inner: ValueFunction) -> ValueFunction {
    Box::new(LowerCase::new(inner))
}

impl ConditionFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn always_true(&self) -> BoolFunction {
        Box::new(Value::new(true))
    }

    pub fn always_false(&self) -> BoolFunction {
        Box::new(Value::new(false))
    }

    pub fn all_conditions_apply(&self, conditions: Vec<BoolFunction>) -> Result<BoolFunction> {
        Ok(Box::new(AllTrue::new(conditions)?))
    }

    pub fn any_condition_applies(&self, conditions: Vec<BoolFunction>) -> Result<BoolFunction> {
        Ok(Box::new(AnyTrue::new(conditions)?))
    }

    pub fn not(&self, condition: BoolFunction) -> BoolFunction {
        Box::new(InvertedBoolean::new(condition))
    }

    /// Equality of two properties, each side unpacked.
    pub fn properties_equal<L: AsRef<str>, R: AsRef<str>>(
        &self,
        left: &[L],
        right: &[R],
    ) -> Result<BoolFunction> {
        let left = property(PathMode::Unpack, left)?;
        let right = property(PathMode::Unpack, right)?;
        Ok(Box::new(AllEqual::new(vec![left, right])?))
    }

    pub fn property_between_values_inclusive<S: AsRef<str>>(
        &self,
        min: impl Into<JsonValue>,
        max: impl Into<JsonValue>,
        path: &[S],
    ) -> Result<BoolFunction> {
        let subject = property(PathMode::Unpack, path)?;
        Ok(Box::new(BetweenInclusive::new(constant(min), constant(max), subject)))
    }

    pub fn property_has_any_of_values<S: AsRef<str>>(
        &self,
        values: Vec<JsonValue>,
        path: &[S],
    ) -> Result<BoolFunction> {
        let candidate = property(PathMode::Unpack, path)?;
        Ok(Box::new(OneOf::new(constant(values), candidate)))
    }

    pub fn property_has_size<S: AsRef<str>>(&self, size: usize, path: &[S]) -> Result<BoolFunction> {
        let count: ValueFunction = Box::new(Size::new(property(PathMode::Direct, path)?));
        Ok(Box::new(AllEqual::new(vec![count, constant(size)])?))
    }

    pub fn property_has_string_containing_case_insensitive_value<S: AsRef<str>>(
        &self,
        value: &str,
        path: &[S],
    ) -> Result<BoolFunction> {
        let haystack = lower(property(PathMode::Unpack, path)?);
        Ok(Box::new(StringContains::new(lower(constant(value)), haystack)))
    }

    pub fn property_has_value<S: AsRef<str>>(
        &self,
        value: impl Into<JsonValue>,
        path: &[S],
    ) -> Result<BoolFunction> {
        let subject = property(PathMode::Direct, path)?;
        Ok(Box::new(AllEqual::new(vec![subject, constant(value)])?))
    }

    pub fn property_is_null<S: AsRef<str>>(&self, path: &[S]) -> Result<BoolFunction> {
        Ok(Box::new(IsNull::new(property(PathMode::Unpack, path)?)))
    }

    /// The property is an array holding `value` as one of its elements.
    pub fn property_has_string_as_member<S: AsRef<str>>(
        &self,
        value: &str,
        path: &[S],
    ) -> Result<BoolFunction> {
        let members = property(PathMode::Direct, path)?;
        Ok(Box::new(OneOf::new(members, constant(value))))
    }

    /// `value > property`
    pub fn value_greater_than<S: AsRef<str>>(
        &self,
        value: impl Into<JsonValue>,
        path: &[S],
    ) -> Result<BoolFunction> {
        let subject = property(PathMode::Direct, path)?;
        Ok(Box::new(Greater::new(constant(value), subject)))
    }

    /// `value >= property`
    pub fn value_greater_equals_than<S: AsRef<str>>(
        &self,
        value: impl Into<JsonValue>,
        path: &[S],
    ) -> Result<BoolFunction> {
        let subject = property(PathMode::Direct, path)?;
        Ok(Box::new(GreaterEquals::new(constant(value), subject)))
    }

    /// `value < property`
    pub fn value_smaller_than<S: AsRef<str>>(
        &self,
        value: impl Into<JsonValue>,
        path: &[S],
    ) -> Result<BoolFunction> {
        let subject = property(PathMode::Direct, path)?;
        Ok(Box::new(Smaller::new(constant(value), subject)))
    }

    /// `value <= property`
    pub fn value_smaller_equals_than<S: AsRef<str>>(
        &self,
        value: impl Into<JsonValue>,
        path: &[S],
    ) -> Result<BoolFunction> {
        let subject = property(PathMode::Direct, path)?;
        Ok(Box::new(SmallerEquals::new(constant(value), subject)))
    }

    pub fn property_starts_with_case_insensitive<S: AsRef<str>>(
        &self,
        value: &str,
        path: &[S],
    ) -> Result<BoolFunction> {
        let haystack = lower(property(PathMode::Direct, path)?);
        Ok(Box::new(StringStartsWith::new(lower(constant(value)), haystack)))
    }

    pub fn property_ends_with_case_insensitive<S: AsRef<str>>(
        &self,
        value: &str,
        path: &[S],
    ) -> Result<BoolFunction> {
        let haystack = lower(property(PathMode::Direct, path)?);
        Ok(Box::new(StringEndsWith::new(lower(constant(value)), haystack)))
    }

    /// Every value is present among the unpacked elements at `path`.
    ///
    /// Each value gets its own salted path, so the checks are independent and
    /// one element may satisfy several of them.
    pub fn all_values_present_in_member_list_properties<S: AsRef<str>>(
        &self,
        values: Vec<JsonValue>,
        path: &[S],
    ) -> Result<BoolFunction> {
        if values.is_empty() {
            return Err(Error::precondition("at least one value is required"));
        }
        let paths = PropertyPath::create_index_salted_paths(values.len(), PathMode::Unpack, path)?;
        let checks = values
            .into_iter()
            .zip(paths)
            .map(|(value, path)| -> Result<BoolFunction> {
                let member: ValueFunction = Box::new(Property::new(path));
                Ok(Box::new(AllEqual::new(vec![member, constant(value)])?))
            })
            .collect::<Result<Vec<_>>>()?;
        self.all_conditions_apply(checks)
    }

    pub fn properties_not_equal<L: AsRef<str>, R: AsRef<str>>(
        &self,
        left: &[L],
        right: &[R],
    ) -> Result<BoolFunction> {
        Ok(self.not(self.properties_equal(left, right)?))
    }

    pub fn property_not_between_values_inclusive<S: AsRef<str>>(
        &self,
        min: impl Into<JsonValue>,
        max: impl Into<JsonValue>,
        path: &[S],
    ) -> Result<BoolFunction> {
        Ok(self.not(self.property_between_values_inclusive(min, max, path)?))
    }

    pub fn property_has_not_any_of_values<S: AsRef<str>>(
        &self,
        values: Vec<JsonValue>,
        path: &[S],
    ) -> Result<BoolFunction> {
        Ok(self.not(self.property_has_any_of_values(values, path)?))
    }

    pub fn property_has_not_size<S: AsRef<str>>(&self, size: usize, path: &[S]) -> Result<BoolFunction> {
        Ok(self.not(self.property_has_size(size, path)?))
    }

    pub fn property_has_not_string_containing_case_insensitive_value<S: AsRef<str>>(
        &self,
        value: &str,
        path: &[S],
    ) -> Result<BoolFunction> {
        Ok(self.not(self.property_has_string_containing_case_insensitive_value(value, path)?))
    }

    pub fn property_has_not_value<S: AsRef<str>>(
        &self,
        value: impl Into<JsonValue>,
        path: &[S],
    ) -> Result<BoolFunction> {
        Ok(self.not(self.property_has_value(value, path)?))
    }

    pub fn property_is_not_null<S: AsRef<str>>(&self, path: &[S]) -> Result<BoolFunction> {
        Ok(self.not(self.property_is_null(path)?))
    }

    pub fn property_has_not_string_as_member<S: AsRef<str>>(
        &self,
        value: &str,
        path: &[S],
    ) -> Result<BoolFunction> {
        Ok(self.not(self.property_has_string_as_member(value, path)?))
    }

    pub fn property_not_starts_with_case_insensitive<S: AsRef<str>>(
        &self,
        value: &str,
        path: &[S],
    ) -> Result<BoolFunction> {
        Ok(self.not(self.property_starts_with_case_insensitive(value, path)?))
    }

    pub fn property_not_ends_with_case_insensitive<S: AsRef<str>>(
        &self,
        value: &str,
        path: &[S],
    ) -> Result<BoolFunction> {
        Ok(self.not(self.property_ends_with_case_insensitive(value, path)?))
    }
}
