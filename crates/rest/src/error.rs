//! Error types for the Courier HTTP surface.
//!
//! Pipeline failures are mapped to HTTP status codes and a JSON body of the
//! form `{"error": {"kind": "...", "message": "..."}}`:
//!
//! | Pipeline Error | HTTP Status | Kind |
//! |----------------|-------------|------|
//! | UnsupportedType | 400 | unsupported-type |
//! | Construction | 500 | construction |
//! | Encoding | 500 | encoding |
//! | Io | 500 | io |
//! | Dump | 500 | io |
//! | (join failure) | 500 | internal |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use tracing::error;

use crate::pipeline::PipelineError;

/// The primary error type for HTTP handlers.
#[derive(Debug)]
pub enum RestError {
    /// The requested trigger event has no builder (HTTP 400).
    UnsupportedType {
        /// The requested code.
        code: String,
    },

    /// The message could not be built (HTTP 500).
    Construction {
        /// Error message.
        message: String,
    },

    /// The message could not be encoded (HTTP 500).
    Encoding {
        /// Error message.
        message: String,
    },

    /// An artifact or the console could not be written (HTTP 500).
    Io {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    InternalError {
        /// Error message.
        message: String,
    },
}

impl RestError {
    /// Returns the machine-readable kind reported in the response body.
    pub fn kind(&self) -> &'static str {
        match self {
            RestError::UnsupportedType { .. } => "unsupported-type",
            RestError::Construction { .. } => "construction",
            RestError::Encoding { .. } => "encoding",
            RestError::Io { .. } => "io",
            RestError::InternalError { .. } => "internal",
        }
    }

    /// Returns the HTTP status code of this error.
    pub fn status(&self) -> StatusCode {
        match self {
            RestError::UnsupportedType { .. } => StatusCode::BAD_REQUEST,
            RestError::Construction { .. }
            | RestError::Encoding { .. }
            | RestError::Io { .. }
            | RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::UnsupportedType { code } => {
                write!(f, "{} message type is not supported yet", code)
            }
            RestError::Construction { message } => {
                write!(f, "Construction failed: {}", message)
            }
            RestError::Encoding { message } => {
                write!(f, "Encoding failed: {}", message)
            }
            RestError::Io { message } => {
                write!(f, "IO error: {}", message)
            }
            RestError::InternalError { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for RestError {}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(kind = self.kind(), "{}", self);
        }

        let body = serde_json::json!({
            "error": {
                "kind": self.kind(),
                "message": self.to_string(),
            }
        });
        (status, Json(body)).into_response()
    }
}

impl From<PipelineError> for RestError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::UnsupportedType { code } => RestError::UnsupportedType { code },
            PipelineError::Construction(e) => RestError::Construction {
                message: e.to_string(),
            },
            PipelineError::Encoding(e) => RestError::Encoding {
                message: e.to_string(),
            },
            err @ (PipelineError::Io { .. } | PipelineError::Dump(_)) => RestError::Io {
                message: err.to_string(),
            },
        }
    }
}

/// Result type alias for handlers.
pub type RestResult<T> = Result<T, RestError>;
