//! Walks a property path over a JSON root.

use super::{PathMode, PropertyPath};
use crate::error::{Error, Result};
use serde_json::Value;

/// Resolves `path` against `root`, returning every candidate value.
///
/// DIRECT paths always yield exactly one candidate. UNPACK paths yield one
/// candidate per element of every array met, including a terminal array.
pub fn resolve<'a>(path: &PropertyPath, root: &'a Value) -> Result<Vec<&'a Value>> {
    let mut candidates = Vec::new();
    match path.mode() {
        PathMode::Direct => candidates.push(walk_direct(path, root)?),
        PathMode::Unpack => walk_unpack(path, root, 0, &mut candidates)?,
    }
    Ok(candidates)
}

fn walk_direct<'a>(path: &PropertyPath, root: &'a Value) -> Result<&'a Value> {
    let mut current = root;
    for (depth, segment) in path.as_names().iter().enumerate() {
        match current {
            Value::Null | Value::Array(_) => return Ok(current),
            _ => current = child(path, current, segment, depth)?,
        }
    }
    Ok(current)
}

fn walk_unpack<'a>(
    path: &PropertyPath,
    current: &'a Value,
    depth: usize,
    out: &mut Vec<&'a Value>,
) -> Result<()> {
    if let Value::Array(items) = current {
        for item in items {
            walk_unpack(path, item, depth, out)?;
        }
        return Ok(());
    }

    let segments = path.as_names();
    if depth == segments.len() || current.is_null() {
        out.push(current);
        return Ok(());
    }

    let next = child(path, current, &segments[depth], depth)?;
    walk_unpack(path, next, depth + 1, out)
}

fn child<'a>(path: &PropertyPath, current: &'a Value, segment: &str, depth: usize) -> Result<&'a Value> {
    match current {
        Value::Object(map) => map.get(segment).ok_or_else(|| Error::PathResolution {
            path: path.to_string(),
            message: format!("property '{}' does not exist at depth {}", segment, depth),
        }),
        other => Err(Error::PathResolution {
            path: path.to_string(),
            message: format!(
                "cannot read property '{}' of a {}",
                segment,
                crate::values::kind_name(other)
            ),
        }),
    }
}
