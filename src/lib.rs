//! Composable filter conditions over nested object graphs.
//!
//! Conditions are trees of [`functions`] nodes built by the
//! [`ConditionFactory`] or by a typed [`Condition`] operator. A tree is
//! applied directly to a `serde_json::Value` root, or walked by an outside
//! translator to produce a native query. The [`PathTransformer`] moves a tree
//! written against a related entity into its parent's namespace.
//!
//! ```
//! use pathcond::{ConditionFactory, Function};
//! use serde_json::json;
//!
//! let factory = ConditionFactory::new();
//! let condition = factory
//!     .property_has_any_of_values(vec![json!("b"), json!("c")], &["author", "tags"])
//!     .unwrap();
//! let book = json!({ "title": "T", "author": { "tags": ["a", "b"] } });
//! assert!(condition.apply(&book).unwrap());
//! ```

pub mod conditions;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod factory;
pub mod functions;
pub mod paths;
pub mod sorting;
pub mod transformer;
pub mod values;

pub use conditions::Condition;
pub use crate::config::EvaluatorConfig;
pub use error::{Error, Result};
pub use evaluator::ConditionEvaluator;
pub use factory::ConditionFactory;
pub use functions::{BoolFunction, Function, PathsBased, ValueFunction};
pub use paths::{PathMode, PropertyPath};
pub use sorting::{Direction, SortMethod, SortMethodFactory};
pub use transformer::PathTransformer;
