//! Relocates conditions into another namespace by prefixing their paths.

use crate::functions::PathsBased;
use crate::paths::PropertyPath;
use std::collections::HashMap;
use std::sync::Arc;

/// Prefixes every property path reachable from a set of trees.
///
/// A condition written against a related entity's own properties (say
/// `name`) can be nested under a parent through the relationship by
/// prefixing it with the relationship path (`author.name`).
#[derive(Debug, Default, Clone, Copy)]
pub struct PathTransformer;

impl PathTransformer {
    pub fn new() -> Self {
        Self
    }

    /// Prepends `prefix` to each distinct path instance exactly once.
    ///
    /// Instances are told apart by identity: a path shared by several
    /// positions (or several trees) is rewritten once and stays shared,
    /// while two separate paths with equal segments are both rewritten.
    /// Returns the number of distinct paths rewritten.
    pub fn prefix_paths<S: AsRef<str>>(&self, trees: &mut [&mut dyn PathsBased], prefix: &[S]) -> usize {
        let mut rewritten: HashMap<*const PropertyPath, (Arc<PropertyPath>, Arc<PropertyPath>)> =
            HashMap::new();
        for tree in trees.iter() {
            tree.visit_paths(&mut |path| {
                rewritten
                    .entry(Arc::as_ptr(path))
                    .or_insert_with(|| (Arc::clone(path), Arc::new(path.prefixed(prefix))));
            });
        }

        for tree in trees.iter_mut() {
            tree.visit_paths_mut(&mut |slot| {
                if let Some((_, replacement)) = rewritten.get(&Arc::as_ptr(slot)) {
                    *slot = Arc::clone(replacement);
                }
            });
        }

        tracing::debug!(
            paths = rewritten.len(),
            prefix = %prefix.iter().map(|s| s.as_ref()).collect::<Vec<&str>>().join("."),
            "prefixed property paths"
        );
        rewritten.len()
    }
}
