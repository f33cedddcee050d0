//! Error types for exposing and rendering state

use thiserror::Error;

/// Main error type for namespace and serialization operations
#[derive(Error, Debug)]
pub enum ExposeError {
    /// A function without source text can not be recreated on the client
    #[error("Cannot serialize native function `{name}`: no source text is available")]
    NativeFunction {
        /// Display name of the function
        name: String,
    },

    /// Malformed namespace path
    #[error("Invalid namespace `{namespace}`: {reason}")]
    InvalidNamespace {
        /// The rejected path as given
        namespace: String,
        /// What is wrong with it
        reason: String,
    },

    /// Pattern flags that a regular-expression literal can not carry
    #[error("Invalid pattern flags `{flags}`: {reason}")]
    InvalidPattern {
        /// The rejected flags
        flags: String,
        /// What is wrong with them
        reason: String,
    },

    /// Structured-data encoder failure
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExposeError {
    pub(crate) fn invalid_namespace(namespace: &str, reason: impl Into<String>) -> Self {
        ExposeError::InvalidNamespace {
            namespace: namespace.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for expose operations
pub type Result<T> = std::result::Result<T, ExposeError>;
