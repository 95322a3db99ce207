//! Error types for message construction.

use thiserror::Error;

/// Errors raised while building or selecting a message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// No builder is registered for the requested trigger event.
    #[error("{code} message type is not supported yet")]
    UnsupportedType {
        /// The requested trigger event code (e.g. `ZZZ`).
        code: String,
    },

    /// A value does not fit the grammar of its target field or component.
    #[error("invalid value for {location}: {reason}")]
    InvalidValue {
        /// Field path such as `PID-5.1`.
        location: String,
        /// What is wrong with the value.
        reason: String,
    },

    /// MSH-1 or MSH-2 cannot be used as delimiters.
    #[error("invalid delimiters: {reason}")]
    InvalidDelimiters {
        /// What is wrong with the delimiter set.
        reason: String,
    },
}

impl BuildError {
    pub(crate) fn invalid(location: impl Into<String>, reason: impl Into<String>) -> Self {
        BuildError::InvalidValue {
            location: location.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for message construction.
pub type Result<T> = std::result::Result<T, BuildError>;
