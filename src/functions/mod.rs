//! Composable function nodes evaluated against a JSON object graph.
//!
//! Leaves are [`Value`] constants and [`Property`] lookups. Every other node
//! combines the results of its children in declared order. Nodes are
//! immutable once built and evaluation never mutates them, so a tree can be
//! applied from several threads at once.
//!
//! Boolean nodes other than [`AnyTrue`] and [`InvertedBoolean`] evaluate
//! existentially: UNPACK paths below them that are not yet bound are bound
//! to each combination of their candidates, and the node holds if any
//! combination satisfies it. See [`Bindings`].

mod arithmetic;
mod bindings;
mod compare;
mod leaf;
mod logic;
mod string;

pub use arithmetic::{Size, Sum};
pub use bindings::{Bindings, DEFAULT_ROW_LIMIT};
pub use compare::{AllEqual, BetweenInclusive, Greater, GreaterEquals, IsNull, OneOf, Smaller, SmallerEquals};
pub use leaf::{Property, Value};
pub use logic::{AllTrue, AnyTrue, InvertedBoolean};
pub use string::{LowerCase, StringContains, StringEndsWith, StringStartsWith};

use crate::error::Result;
use crate::paths::PropertyPath;
use std::fmt;
use std::sync::Arc;

/// Anything that holds property paths: function trees and sort methods.
pub trait PathsBased {
    /// Calls `visitor` for every path slot, once per position in the tree.
    fn visit_paths(&self, visitor: &mut dyn FnMut(&Arc<PropertyPath>));

    fn visit_paths_mut(&mut self, visitor: &mut dyn FnMut(&mut Arc<PropertyPath>));

    /// Paths an enclosing existential scope binds. Disjunctions and negations
    /// hide their paths so that their children quantify on their own.
    fn visit_scoped_paths(&self, visitor: &mut dyn FnMut(&Arc<PropertyPath>)) {
        self.visit_paths(visitor);
    }

    /// Distinct path instances in visiting order, compared by identity.
    fn property_paths(&self) -> Vec<Arc<PropertyPath>> {
        let mut paths: Vec<Arc<PropertyPath>> = Vec::new();
        self.visit_paths(&mut |path| {
            if !paths.iter().any(|seen| Arc::ptr_eq(seen, path)) {
                paths.push(Arc::clone(path));
            }
        });
        paths
    }
}

/// A node producing a `T` from a root object graph.
pub trait Function<T>: PathsBased + fmt::Debug + Send + Sync {
    /// Evaluates the node with the paths already bound in `bindings`.
    fn evaluate(&self, bindings: &Bindings<'_>) -> Result<T>;

    fn apply(&self, root: &serde_json::Value) -> Result<T> {
        self.evaluate(&Bindings::new(root))
    }
}

pub type BoolFunction = Box<dyn Function<bool>>;
pub type ValueFunction = Box<dyn Function<serde_json::Value>>;

impl<P: PathsBased + ?Sized> PathsBased for Box<P> {
    fn visit_paths(&self, visitor: &mut dyn FnMut(&Arc<PropertyPath>)) {
        (**self).visit_paths(visitor)
    }

    fn visit_paths_mut(&mut self, visitor: &mut dyn FnMut(&mut Arc<PropertyPath>)) {
        (**self).visit_paths_mut(visitor)
    }

    fn visit_scoped_paths(&self, visitor: &mut dyn FnMut(&Arc<PropertyPath>)) {
        (**self).visit_scoped_paths(visitor)
    }
}

/// Implements [`PathsBased`] for a node by forwarding to its child fields.
macro_rules! paths_from_children {
    ($node:ident $(<$($gen:ident),+>)?, $($child:ident),+) => {
        impl$(<$($gen),+>)? $crate::functions::PathsBased for $node$(<$($gen),+>)? {
            fn visit_paths(
                &self,
                visitor: &mut dyn FnMut(&std::sync::Arc<$crate::paths::PropertyPath>),
            ) {
                $($crate::functions::PathsBased::visit_paths(&self.$child, visitor);)+
            }

            fn visit_paths_mut(
                &mut self,
                visitor: &mut dyn FnMut(&mut std::sync::Arc<$crate::paths::PropertyPath>),
            ) {
                $($crate::functions::PathsBased::visit_paths_mut(&mut self.$child, visitor);)+
            }

            fn visit_scoped_paths(
                &self,
                visitor: &mut dyn FnMut(&std::sync::Arc<$crate::paths::PropertyPath>),
            ) {
                $($crate::functions::PathsBased::visit_scoped_paths(&self.$child, visitor);)+
            }
        }
    };
}

pub(crate) use paths_from_children;

/// Implements [`PathsBased`] for a node holding a `Vec` of children.
macro_rules! paths_from_child_list {
    ($node:ident, $children:ident) => {
        impl $crate::functions::PathsBased for $node {
            fn visit_paths(
                &self,
                visitor: &mut dyn FnMut(&std::sync::Arc<$crate::paths::PropertyPath>),
            ) {
                for child in &self.$children {
                    $crate::functions::PathsBased::visit_paths(child, visitor);
                }
            }

            fn visit_paths_mut(
                &mut self,
                visitor: &mut dyn FnMut(&mut std::sync::Arc<$crate::paths::PropertyPath>),
            ) {
                for child in &mut self.$children {
                    $crate::functions::PathsBased::visit_paths_mut(child, visitor);
                }
            }

            fn visit_scoped_paths(
                &self,
                visitor: &mut dyn FnMut(&std::sync::Arc<$crate::paths::PropertyPath>),
            ) {
                for child in &self.$children {
                    $crate::functions::PathsBased::visit_scoped_paths(child, visitor);
                }
            }
        }
    };
}

pub(crate) use paths_from_child_list;
