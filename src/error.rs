//! Error types for building and evaluating conditions.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A factory or node constructor was called with arguments it can never accept.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// A condition received a path or value shape its operator does not accept.
    #[error("Invalid value for operator '{operator}': {message}")]
    ValueValidation { operator: String, message: String },

    /// A property path could not be walked on the given root.
    #[error("Cannot resolve path '{path}': {message}")]
    PathResolution { path: String, message: String },

    #[error("Type error in {function}: {message}")]
    TypeMismatch { function: String, message: String },

    #[error("Cannot order {left} against {right}")]
    Incomparable { left: String, right: String },

    #[error("Binding {rows} candidate rows exceeds the limit of {limit}")]
    BindingLimitExceeded { rows: usize, limit: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn precondition(message: impl Into<String>) -> Self {
        Error::Precondition(message.into())
    }

    pub(crate) fn validation(operator: &str, message: impl Into<String>) -> Self {
        Error::ValueValidation {
            operator: operator.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn type_mismatch(function: &str, message: impl Into<String>) -> Self {
        Error::TypeMismatch {
            function: function.to_string(),
            message: message.into(),
        }
    }
}
