//! Sort methods over property values.

use crate::error::Result;
use crate::functions::{Bindings, PathsBased};
use crate::paths::{PathMode, PropertyPath};
use crate::values::compare_values;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ascending,
    Descending,
}

/// Orders entities by the value at a DIRECT property path.
#[derive(Debug, Clone)]
pub struct SortMethod {
    path: Arc<PropertyPath>,
    direction: Direction,
}

impl SortMethod {
    pub fn new(path: Arc<PropertyPath>, direction: Direction) -> Self {
        Self { path, direction }
    }

    pub fn path(&self) -> &Arc<PropertyPath> {
        &self.path
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The value this method sorts `entity` by.
    pub fn key(&self, entity: &Value) -> Result<Value> {
        Bindings::new(entity).lookup(&self.path)
    }

    /// Compares two sort keys. Nulls go first or last regardless of direction.
    pub fn compare_keys(&self, left: &Value, right: &Value, nulls_first: bool) -> Result<Ordering> {
        let null_order = if nulls_first { Ordering::Less } else { Ordering::Greater };
        let ordering = match (left.is_null(), right.is_null()) {
            (true, true) => return Ok(Ordering::Equal),
            (true, false) => return Ok(null_order),
            (false, true) => return Ok(null_order.reverse()),
            (false, false) => compare_values(left, right)?,
        };
        Ok(match self.direction {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        })
    }
}

impl PathsBased for SortMethod {
    fn visit_paths(&self, visitor: &mut dyn FnMut(&Arc<PropertyPath>)) {
        visitor(&self.path);
    }

    fn visit_paths_mut(&mut self, visitor: &mut dyn FnMut(&mut Arc<PropertyPath>)) {
        visitor(&mut self.path);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SortMethodFactory;

impl SortMethodFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn property_ascending<S: AsRef<str>>(&self, path: &[S]) -> Result<SortMethod> {
        Ok(SortMethod::new(PropertyPath::shared(PathMode::Direct, path)?, Direction::Ascending))
    }

    pub fn property_descending<S: AsRef<str>>(&self, path: &[S]) -> Result<SortMethod> {
        Ok(SortMethod::new(PropertyPath::shared(PathMode::Direct, path)?, Direction::Descending))
    }
}
