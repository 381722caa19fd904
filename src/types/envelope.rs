//! Error envelope returned by the remote API on failure responses.
//!
//! Wire format:
//!
//! ```text
//! { "summary": "Bad Request", "exceptions": ["x", "y"], "statusCode": 400 }
//! ```

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;

/// Summary used for envelopes synthesized from a local failure.
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

fn default_status_code() -> i32 {
    500
}

/// Structured error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    /// Short description
    #[serde(default)]
    pub summary: String,
    /// Individual failure messages, in server order
    #[serde(default)]
    pub exceptions: Vec<String>,
    /// HTTP status the server associated with the error
    #[serde(default = "default_status_code")]
    pub status_code: i32,
}

impl Default for ErrorEnvelope {
    fn default() -> Self {
        ErrorEnvelope {
            summary: String::new(),
            exceptions: Vec::new(),
            status_code: default_status_code(),
        }
    }
}

impl ErrorEnvelope {
    /// Synthesize an envelope from a caught failure.
    ///
    /// `kind` names the failure; the message is taken from the deepest error
    /// in the `source()` chain.
    pub fn from_failure(kind: &str, error: &(dyn StdError + 'static)) -> Self {
        let mut base = error;
        while let Some(source) = base.source() {
            base = source;
        }

        Self::internal(kind, base)
    }

    fn internal(kind: &str, message: impl fmt::Display) -> Self {
        ErrorEnvelope {
            summary: INTERNAL_SERVER_ERROR.to_string(),
            exceptions: vec![format!("{} - {}", kind, message)],
            status_code: 500,
        }
    }
}

impl From<&crate::error::ApiError> for ErrorEnvelope {
    fn from(error: &crate::error::ApiError) -> Self {
        match error.source() {
            Some(_) => ErrorEnvelope::from_failure(error.kind(), error),
            None => ErrorEnvelope::internal(error.kind(), error.message()),
        }
    }
}

impl fmt::Display for ErrorEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.status_code, self.summary)?;
        writeln!(f, "Messages:")?;
        for exception in &self.exceptions {
            writeln!(f, "{}", exception)?;
        }
        Ok(())
    }
}
