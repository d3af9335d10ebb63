//! Property paths addressing locations in a nested object graph.

mod resolve;

pub use resolve::resolve;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// How a path treats to-many (array) values met along the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathMode {
    /// Arrays are terminal values and are never descended into.
    Direct,
    /// Arrays are flattened and every element is resolved independently.
    Unpack,
}

impl fmt::Display for PathMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathMode::Direct => write!(f, "direct"),
            PathMode::Unpack => write!(f, "unpack"),
        }
    }
}

/// An ordered, non-empty list of property names plus a traversal mode and a salt.
///
/// The salt never changes how a path resolves. Paths with equal segments,
/// mode and salt are bound to the same candidate inside one evaluation
/// scope; a different salt makes the binding independent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    salt: String,
    mode: PathMode,
    segments: Vec<String>,
}

/// The identity used to correlate path bindings during evaluation.
pub type PathKey = PropertyPath;

impl PropertyPath {
    pub fn new<S: AsRef<str>>(salt: impl Into<String>, mode: PathMode, segments: &[S]) -> Result<Self> {
        if segments.is_empty() {
            return Err(Error::precondition("property path needs at least one segment"));
        }
        Ok(Self {
            salt: salt.into(),
            mode,
            segments: segments.iter().map(|s| s.as_ref().to_string()).collect(),
        })
    }

    /// Shorthand for an unsalted path wrapped for sharing inside a tree.
    pub fn shared<S: AsRef<str>>(mode: PathMode, segments: &[S]) -> Result<Arc<Self>> {
        Self::new("", mode, segments).map(Arc::new)
    }

    /// Creates `count` paths over the same segments, salted `0..count`.
    pub fn create_index_salted_paths<S: AsRef<str>>(
        count: usize,
        mode: PathMode,
        segments: &[S],
    ) -> Result<Vec<Arc<Self>>> {
        (0..count)
            .map(|index| Self::new(index.to_string(), mode, segments).map(Arc::new))
            .collect()
    }

    pub fn as_names(&self) -> &[String] {
        &self.segments
    }

    pub fn mode(&self) -> PathMode {
        self.mode
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Returns a copy of this path with `prefix` placed before its segments.
    pub fn prefixed<S: AsRef<str>>(&self, prefix: &[S]) -> Self {
        let mut segments: Vec<String> = prefix.iter().map(|s| s.as_ref().to_string()).collect();
        segments.extend(self.segments.iter().cloned());
        Self {
            salt: self.salt.clone(),
            mode: self.mode,
            segments,
        }
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path_is_rejected() {
        let err = PropertyPath::new("", PathMode::Direct, &[] as &[&str]).unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
    }

    #[test]
    fn test_index_salted_paths() {
        let paths = PropertyPath::create_index_salted_paths(3, PathMode::Unpack, &["author", "tags"]).unwrap();
        assert_eq!(paths.len(), 3);
        let salts: Vec<&str> = paths.iter().map(|p| p.salt()).collect();
        assert_eq!(salts, vec!["0", "1", "2"]);
        for path in &paths {
            assert_eq!(path.as_names(), ["author", "tags"]);
            assert_eq!(path.mode(), PathMode::Unpack);
        }
        assert_ne!(paths[0], paths[1]);
    }

    #[test]
    fn test_prefixed_keeps_mode_and_salt() {
        let path = PropertyPath::new("7", PathMode::Unpack, &["x", "y"]).unwrap();
        let moved = path.prefixed(&["foo", "bar"]);
        assert_eq!(moved.as_names(), ["foo", "bar", "x", "y"]);
        assert_eq!(moved.salt(), "7");
        assert_eq!(moved.mode(), PathMode::Unpack);
        assert_eq!(moved.to_string(), "foo.bar.x.y");
    }
}
