//! Error types for Gnomon

use thiserror::Error;

/// Result type alias using Gnomon's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing or exporting a scene
#[derive(Error, Debug)]
pub enum Error {
    /// A point name was looked up before anything registered it
    #[error("Unknown point '{name}' when calling function '{operation}'")]
    UnknownName {
        name: String,
        operation: &'static str,
    },

    /// Malformed arguments: bad name pairs, wrong name counts, bad components
    #[error("Invalid operand for '{operation}': {reason}")]
    InvalidOperand {
        operation: &'static str,
        reason: String,
    },

    /// Scene document serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn unknown(name: &str, operation: &'static str) -> Self {
        Error::UnknownName {
            name: name.to_string(),
            operation,
        }
    }

    pub(crate) fn invalid(operation: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidOperand {
            operation,
            reason: reason.into(),
        }
    }

    /// Name that failed to resolve, if this is a resolution error
    pub fn unknown_name(&self) -> Option<&str> {
        match self {
            Error::UnknownName { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Operation that raised the error, if known
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Error::UnknownName { operation, .. } | Error::InvalidOperand { operation, .. } => {
                Some(operation)
            }
            Error::Json(_) => None,
        }
    }
}
