//! Path bindings for existential evaluation.

use super::PathsBased;
use crate::error::{Error, Result};
use crate::paths::{PathKey, PathMode, resolve};
use serde_json::Value;
use std::collections::HashMap;

pub const DEFAULT_ROW_LIMIT: usize = 100_000;

/// The root being evaluated plus the candidate each bound path stands for.
///
/// Paths are bound by key (segments, mode and salt), so two equal paths in
/// one scope always see the same element.
#[derive(Debug, Clone)]
pub struct Bindings<'a> {
    root: &'a Value,
    bound: HashMap<PathKey, &'a Value>,
    row_limit: usize,
}

impl<'a> Bindings<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self {
            root,
            bound: HashMap::new(),
            row_limit: DEFAULT_ROW_LIMIT,
        }
    }

    pub fn with_row_limit(mut self, row_limit: usize) -> Self {
        self.row_limit = row_limit;
        self
    }

    pub fn root(&self) -> &'a Value {
        self.root
    }

    /// The value of `path` under these bindings.
    ///
    /// An unbound UNPACK path stands for all of its candidates, returned as
    /// an array.
    pub fn lookup(&self, path: &PathKey) -> Result<Value> {
        if let Some(value) = self.bound.get(path) {
            return Ok((*value).clone());
        }
        let mut candidates = resolve(path, self.root)?;
        match path.mode() {
            PathMode::Direct => Ok(candidates.pop().cloned().unwrap_or(Value::Null)),
            PathMode::Unpack => Ok(Value::Array(candidates.into_iter().cloned().collect())),
        }
    }

    /// Holds if `body` holds for at least one binding of the paths in `scope`
    /// that are not bound yet.
    pub(crate) fn exists<F>(&self, scope: &dyn PathsBased, body: F) -> Result<bool>
    where
        F: Fn(&Bindings<'a>) -> Result<bool>,
    {
        let mut keys: Vec<PathKey> = Vec::new();
        scope.visit_scoped_paths(&mut |path| {
            let key: &PathKey = path;
            if !keys.contains(key) {
                keys.push(key.clone());
            }
        });
        self.exists_over(keys, body)
    }

    /// Like [`exists`](Self::exists), but binds exactly `keys`. Keys that
    /// are already bound keep their binding.
    pub(crate) fn exists_over<F>(&self, keys: Vec<PathKey>, body: F) -> Result<bool>
    where
        F: Fn(&Bindings<'a>) -> Result<bool>,
    {
        let mut unbound: Vec<PathKey> = Vec::new();
        for key in keys {
            if !self.bound.contains_key(&key) && !unbound.contains(&key) {
                unbound.push(key);
            }
        }
        if unbound.is_empty() {
            return body(self);
        }

        let mut columns = Vec::with_capacity(unbound.len());
        for key in &unbound {
            columns.push(resolve(key, self.root)?);
        }

        let mut rows: usize = 1;
        for column in &columns {
            rows = rows.saturating_mul(column.len());
        }
        if rows == 0 {
            tracing::trace!(paths = unbound.len(), "no candidates to bind");
            return Ok(false);
        }
        if rows > self.row_limit {
            return Err(Error::BindingLimitExceeded {
                rows,
                limit: self.row_limit,
            });
        }
        tracing::trace!(paths = unbound.len(), rows, "binding candidate rows");

        let mut cursor = vec![0usize; columns.len()];
        loop {
            let mut row = self.clone();
            for ((key, column), index) in unbound.iter().zip(&columns).zip(&cursor) {
                row.bound.insert(key.clone(), column[*index]);
            }
            if body(&row)? {
                return Ok(true);
            }
            if !advance(&mut cursor, &columns) {
                return Ok(false);
            }
        }
    }
}

/// Steps `cursor` to the next combination; false once all are exhausted.
fn advance(cursor: &mut [usize], columns: &[Vec<&Value>]) -> bool {
    for (position, column) in cursor.iter_mut().zip(columns).rev() {
        *position += 1;
        if *position < column.len() {
            return true;
        }
        *position = 0;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::{Function, Property};
    use crate::paths::PropertyPath;
    use serde_json::json;

    #[test]
    fn test_lookup_unbound_paths() {
        let root = json!({ "author": { "tags": ["a", "b"] } });
        let bindings = Bindings::new(&root);
        let direct = PropertyPath::new("", PathMode::Direct, &["author", "tags"]).unwrap();
        let unpack = PropertyPath::new("", PathMode::Unpack, &["author", "tags"]).unwrap();
        assert_eq!(bindings.lookup(&direct).unwrap(), json!(["a", "b"]));
        assert_eq!(bindings.lookup(&unpack).unwrap(), json!(["a", "b"]));
    }

    #[test]
    fn test_exists_binds_each_candidate() {
        let root = json!({ "tags": ["a", "b", "c"] });
        let property = Property::new(PropertyPath::shared(PathMode::Unpack, &["tags"]).unwrap());
        let bindings = Bindings::new(&root);

        let found = bindings
            .exists(&property, |row| Ok(property.evaluate(row)? == json!("c")))
            .unwrap();
        assert!(found);

        let found = bindings
            .exists(&property, |row| Ok(property.evaluate(row)? == json!("d")))
            .unwrap();
        assert!(!found);
    }

    #[test]
    fn test_exists_respects_row_limit() {
        let root = json!({ "tags": ["a", "b", "c"] });
        let property = Property::new(PropertyPath::shared(PathMode::Unpack, &["tags"]).unwrap());
        let bindings = Bindings::new(&root).with_row_limit(2);
        let err = bindings.exists(&property, |_| Ok(false)).unwrap_err();
        assert_eq!(err, Error::BindingLimitExceeded { rows: 3, limit: 2 });
    }

    #[test]
    fn test_advance_walks_every_combination() {
        let a = json!(1);
        let b = json!(2);
        let columns = vec![vec![&a, &b], vec![&a, &b, &a]];
        let mut cursor = vec![0, 0];
        let mut seen = 1;
        while advance(&mut cursor, &columns) {
            seen += 1;
        }
        assert_eq!(seen, 6);
    }
}
