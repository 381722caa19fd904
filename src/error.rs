//! Error types and result handling.
//!
//! Every failure of the request pipeline surfaces as an [`ApiError`]. The only
//! condition absorbed by the client is HTTP 404, which the interpreter turns
//! into an absent value instead of an error.
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | `InvalidArgument` | options or request metadata cannot form a valid call |
//! | `FileNotFound` | a form file part points at a missing path |
//! | `Unauthorized` | the server answered 401 |
//! | `BadRequestOrServerError` | 400/500 with error exposure enabled |
//! | `Http` | any other non-success status |
//! | `Unsupported` | unknown response content type, or a verb/capability mismatch |
//! | `Cancelled` | the call's cancellation token fired |

use crate::types::ErrorEnvelope;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors produced while translating, sending or interpreting an API call.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiError {
    /// The options or the request metadata were rejected before sending.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A file form part references a path that does not exist.
    #[error("File: '{}' not found", .0.display())]
    FileNotFound(PathBuf),

    /// HTTP 401. The caller has to re-authenticate out of band.
    #[error("Unauthorized")]
    Unauthorized,

    /// HTTP 400 or 500 carrying a server-provided error envelope.
    #[error("HTTP {status} {}: {}", .envelope.summary, .envelope.exceptions.join("; "))]
    BadRequestOrServerError {
        /// Response status code
        status: u16,
        /// Decoded error body
        envelope: ErrorEnvelope,
    },

    /// Any other non-success status.
    #[error("HTTP {status} {reason}")]
    Http {
        /// Response status code
        status: u16,
        /// Canonical reason phrase, empty when unknown
        reason: String,
    },

    /// Response content type or request capability the client cannot handle.
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// The call was aborted through its cancellation token.
    #[error("Operation cancelled")]
    Cancelled,

    /// Network, TLS, redirect or timeout failure from the transport.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Local I/O failure (reading a form file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Stable name of the variant, used when synthesizing an [`ErrorEnvelope`].
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidArgument(_) => "InvalidArgument",
            ApiError::FileNotFound(_) => "FileNotFound",
            ApiError::Unauthorized => "Unauthorized",
            ApiError::BadRequestOrServerError { .. } => "BadRequestOrServerError",
            ApiError::Http { .. } => "Http",
            ApiError::Unsupported(_) => "Unsupported",
            ApiError::Cancelled => "Cancelled",
            ApiError::Transport(_) => "Transport",
            ApiError::Json(_) => "Json",
            ApiError::Io(_) => "Io",
        }
    }

    /// Message without the variant prefix that `Display` adds.
    pub fn message(&self) -> String {
        match self {
            ApiError::InvalidArgument(message) | ApiError::Unsupported(message) => message.clone(),
            ApiError::FileNotFound(path) => format!("'{}' not found", path.display()),
            ApiError::Unauthorized => "server rejected the credentials".to_string(),
            ApiError::Cancelled => "operation was cancelled".to_string(),
            ApiError::BadRequestOrServerError { .. } | ApiError::Http { .. } => self.to_string(),
            ApiError::Transport(e) => e.to_string(),
            ApiError::Json(e) => e.to_string(),
            ApiError::Io(e) => e.to_string(),
        }
    }

    /// Nested server messages of a 400/500 envelope; empty for other variants.
    pub fn failures(&self) -> &[String] {
        match self {
            ApiError::BadRequestOrServerError { envelope, .. } => &envelope.exceptions,
            _ => &[],
        }
    }

    /// HTTP status attached to the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::BadRequestOrServerError { status, .. } | ApiError::Http { status, .. } => {
                Some(*status)
            }
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the call ended through cancellation rather than failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failures_of_envelope_error() {
        let err = ApiError::BadRequestOrServerError {
            status: 400,
            envelope: ErrorEnvelope {
                summary: "Bad".to_string(),
                exceptions: vec!["x".to_string(), "y".to_string()],
                status_code: 400,
            },
        };
        assert_eq!(err.failures(), ["x", "y"]);
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.to_string(), "HTTP 400 Bad: x; y");
    }

    #[test]
    fn test_failures_empty_for_other_variants() {
        assert!(ApiError::Unauthorized.failures().is_empty());
        assert_eq!(ApiError::Unauthorized.status(), Some(401));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ApiError::Cancelled.kind(), "Cancelled");
        assert_eq!(ApiError::Unsupported("text/xml".into()).kind(), "Unsupported");
        assert!(ApiError::Cancelled.is_cancelled());
    }

    #[test]
    fn test_file_not_found_message() {
        let err = ApiError::FileNotFound(PathBuf::from("/tmp/missing.bin"));
        assert_eq!(err.to_string(), "File: '/tmp/missing.bin' not found");
    }
}
