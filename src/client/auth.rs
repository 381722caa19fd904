//! Bearer token resolution.
//!
//! Every request carries `Authorization: Bearer {token}`. Where the token
//! comes from is left to the application: implement [`TokenProvider`] and pass
//! it to [`ApiClient::with_token_provider`](super::ApiClient::with_token_provider).
//! Without one the client uses [`NoToken`] and sends an empty token.

use crate::error::Result;
use async_trait::async_trait;

/// Source of the bearer token attached to each request.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Token for the next request. An empty string sends the bare scheme.
    async fn token(&self) -> Result<String>;
}

/// Provider that always yields an empty token.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

#[async_trait]
impl TokenProvider for NoToken {
    async fn token(&self) -> Result<String> {
        Ok(String::new())
    }
}

/// Provider returning a fixed token.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    /// Wrap a token.
    pub fn new(token: impl Into<String>) -> Self {
        StaticToken(token.into())
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}
