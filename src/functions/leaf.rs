use super::{Bindings, Function, PathsBased};
use crate::error::Result;
use crate::paths::PropertyPath;
use std::fmt;
use std::sync::Arc;

/// A constant.
#[derive(Debug, Clone, PartialEq)]
pub struct Value<T> {
    value: T,
}

impl<T> Value<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn get(&self) -> &T {
        &self.value
    }
}

impl<T> PathsBased for Value<T> {
    fn visit_paths(&self, _visitor: &mut dyn FnMut(&Arc<PropertyPath>)) {}

    fn visit_paths_mut(&mut self, _visitor: &mut dyn FnMut(&mut Arc<PropertyPath>)) {}
}

impl<T> Function<T> for Value<T>
where
    T: Clone + fmt::Debug + Send + Sync,
{
    fn evaluate(&self, _bindings: &Bindings<'_>) -> Result<T> {
        Ok(self.value.clone())
    }
}

/// The value found at a property path.
///
/// The path is shared, so the same instance may sit at several positions of
/// one tree or of several trees.
#[derive(Debug, Clone)]
pub struct Property {
    path: Arc<PropertyPath>,
}

impl Property {
    pub fn new(path: Arc<PropertyPath>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Arc<PropertyPath> {
        &self.path
    }
}

impl PathsBased for Property {
    fn visit_paths(&self, visitor: &mut dyn FnMut(&Arc<PropertyPath>)) {
        visitor(&self.path);
    }

    fn visit_paths_mut(&mut self, visitor: &mut dyn FnMut(&mut Arc<PropertyPath>)) {
        visitor(&mut self.path);
    }
}

impl Function<serde_json::Value> for Property {
    fn evaluate(&self, bindings: &Bindings<'_>) -> Result<serde_json::Value> {
        bindings.lookup(&self.path)
    }
}
