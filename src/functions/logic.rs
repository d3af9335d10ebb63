use super::{BoolFunction, Bindings, Function, PathsBased, paths_from_child_list};
use crate::error::{Error, Result};
use crate::paths::{PathKey, PropertyPath};
use std::sync::Arc;

/// Boolean AND over at least one child.
///
/// Paths that appear in more than one child are bound once for all of them,
/// so equal paths in different children see the same element. A path that
/// appears in a single child is left to that child's own scope.
#[derive(Debug)]
pub struct AllTrue {
    children: Vec<BoolFunction>,
}

impl AllTrue {
    pub fn new(children: Vec<BoolFunction>) -> Result<Self> {
        if children.is_empty() {
            return Err(Error::precondition("AllTrue needs at least one child"));
        }
        Ok(Self { children })
    }

    /// Scoped path keys occurring in at least two children.
    fn shared_keys(&self) -> Vec<PathKey> {
        let mut counts: Vec<(PathKey, usize)> = Vec::new();
        for child in &self.children {
            let mut keys: Vec<PathKey> = Vec::new();
            child.visit_scoped_paths(&mut |path| {
                let key: &PathKey = path;
                if !keys.contains(key) {
                    keys.push(key.clone());
                }
            });
            for key in keys {
                match counts.iter_mut().find(|(seen, _)| *seen == key) {
                    Some((_, count)) => *count += 1,
                    None => counts.push((key, 1)),
                }
            }
        }
        counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(key, _)| key)
            .collect()
    }
}

paths_from_child_list!(AllTrue, children);

impl Function<bool> for AllTrue {
    fn evaluate(&self, bindings: &Bindings<'_>) -> Result<bool> {
        bindings.exists_over(self.shared_keys(), |row| {
            for child in &self.children {
                if !child.evaluate(row)? {
                    return Ok(false);
                }
            }
            Ok(true)
        })
    }
}

/// Boolean OR over at least one child. Each child quantifies on its own.
#[derive(Debug)]
pub struct AnyTrue {
    children: Vec<BoolFunction>,
}

impl AnyTrue {
    pub fn new(children: Vec<BoolFunction>) -> Result<Self> {
        if children.is_empty() {
            return Err(Error::precondition("AnyTrue needs at least one child"));
        }
        Ok(Self { children })
    }
}

impl PathsBased for AnyTrue {
    fn visit_paths(&self, visitor: &mut dyn FnMut(&Arc<PropertyPath>)) {
        for child in &self.children {
            child.visit_paths(visitor);
        }
    }

    fn visit_paths_mut(&mut self, visitor: &mut dyn FnMut(&mut Arc<PropertyPath>)) {
        for child in &mut self.children {
            child.visit_paths_mut(visitor);
        }
    }

    fn visit_scoped_paths(&self, _visitor: &mut dyn FnMut(&Arc<PropertyPath>)) {}
}

impl Function<bool> for AnyTrue {
    fn evaluate(&self, bindings: &Bindings<'_>) -> Result<bool> {
        for child in &self.children {
            if child.evaluate(bindings)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Negation of a boolean child.
///
/// The child quantifies inside the negation, giving `not exists` rather
/// than `exists not`.
#[derive(Debug)]
pub struct InvertedBoolean {
    inner: BoolFunction,
}

impl InvertedBoolean {
    pub fn new(inner: BoolFunction) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &BoolFunction {
        &self.inner
    }
}

impl PathsBased for InvertedBoolean {
    fn visit_paths(&self, visitor: &mut dyn FnMut(&Arc<PropertyPath>)) {
        self.inner.visit_paths(visitor);
    }

    fn visit_paths_mut(&mut self, visitor: &mut dyn FnMut(&mut Arc<PropertyPath>)) {
        self.inner.visit_paths_mut(visitor);
    }

    fn visit_scoped_paths(&self, _visitor: &mut dyn FnMut(&Arc<PropertyPath>)) {}
}

impl Function<bool> for InvertedBoolean {
    fn evaluate(&self, bindings: &Bindings<'_>) -> Result<bool> {
        Ok(!self.inner.evaluate(bindings)?)
    }
}
