//! Client configuration.

use crate::error::{ApiError, Result};
use serde::Deserialize;
use std::time::Duration;

/// Options supplied once when an [`ApiClient`](super::ApiClient) is built.
///
/// Field names deserialize in camelCase, so a JSON or YAML config section such
/// as `{"host": "api.example.com", "port": 443, "useSsl": true}` maps directly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiOptions {
    /// Host name, trailing slashes are ignored
    pub host: String,
    /// TCP port
    pub port: u16,
    /// Use `https` instead of `http`
    pub use_ssl: bool,
    /// Path prefix of every route, trailing slashes are ignored
    pub root: String,
    /// Whole-request timeout
    pub timeout_seconds: u64,
    /// Surface server error envelopes on 400/500 responses
    pub use_expose_errors: bool,
    /// `Accept-Language` override; the process locale is used when unset
    pub locale: Option<String>,
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 80,
            use_ssl: false,
            root: String::new(),
            timeout_seconds: 100,
            use_expose_errors: false,
            locale: None,
        }
    }
}

impl ApiOptions {
    /// Options for `host:port` with the remaining fields defaulted.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Set the root path.
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    /// Enable or disable TLS.
    pub fn with_ssl(mut self, use_ssl: bool) -> Self {
        self.use_ssl = use_ssl;
        self
    }

    /// Set the request timeout in seconds.
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Expose server error envelopes on 400/500.
    pub fn with_expose_errors(mut self, expose: bool) -> Self {
        self.use_expose_errors = expose;
        self
    }

    /// Override the `Accept-Language` locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Check the options can form URLs and a transport.
    pub fn validate(&self) -> Result<()> {
        if self.host().is_empty() {
            return Err(ApiError::InvalidArgument("host must not be empty".into()));
        }
        if self.timeout_seconds == 0 {
            return Err(ApiError::InvalidArgument(
                "timeout_seconds must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// `http` or `https`.
    pub fn scheme(&self) -> &'static str {
        if self.use_ssl {
            "https"
        } else {
            "http"
        }
    }

    /// Host without trailing slashes.
    pub fn host(&self) -> &str {
        self.host.trim_end_matches('/')
    }

    /// Root without trailing slashes.
    pub fn root(&self) -> &str {
        self.root.trim_end_matches('/')
    }

    /// Timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// `scheme://host:port`, the fixed prefix of every request URL.
    pub fn origin(&self) -> String {
        format!("{}://{}:{}", self.scheme(), self.host(), self.port)
    }
}
