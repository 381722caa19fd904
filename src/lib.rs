#![warn(missing_docs)]

//! # AnyApiClient: a base layer for typed REST clients
//!
//! This crate maps declaratively-described request objects onto HTTP calls and
//! maps responses back onto typed results. A concrete API client wraps an
//! [`ApiClient`] and defines one request type per endpoint; the base handles
//! URLs, headers, bodies, forms and response interpretation.
//!
//! ## Overview
//!
//! 1. **Describe** - a request type implements [`Request`]: a route template,
//!    route slots, query parameters and a [`Capability`] (verb + payload)
//! 2. **Translate** - the route, query string and multipart parts are built
//!    from that metadata
//! 3. **Dispatch** - [`ApiClient`] sends the call over one shared transport
//!    with bearer auth and `Accept-Language`
//! 4. **Interpret** - the response becomes `Some(ApiResponse)`, `None` (404)
//!    or an [`ApiError`]
//!
//! ## Status Handling
//!
//! - `404 Not Found` - absent value, not an error
//! - `401 Unauthorized` - [`ApiError::Unauthorized`]
//! - `400`/`500` - [`ApiError::BadRequestOrServerError`] with the server's
//!   messages when error exposure is enabled
//! - other non-2xx - [`ApiError::Http`]
//!
//! ## Usage
//!
//! ```ignore
//! use anyapi_client::{ApiClient, ApiOptions, Capability, Request, Result, RouteSlot};
//! use serde::Deserialize;
//! use tokio_util::sync::CancellationToken;
//!
//! #[derive(Deserialize, Debug)]
//! struct User { id: u64, name: String }
//!
//! struct GetUser { id: u64 }
//!
//! impl Request for GetUser {
//!     fn route(&self) -> &str { "users/{0}" }
//!     fn capability(&self) -> Result<Capability> { Ok(Capability::Get) }
//!     fn route_slots(&self) -> Vec<RouteSlot> { vec![RouteSlot::new(0, self.id)] }
//! }
//!
//! struct UsersClient { api: ApiClient }
//!
//! impl UsersClient {
//!     async fn user(&self, id: u64) -> Result<Option<User>> {
//!         let response = self.api
//!             .get_as::<_, User>(&GetUser { id }, &CancellationToken::new())
//!             .await?;
//!         Ok(response.and_then(|r| r.json()))
//!     }
//! }
//! ```
//!
//! ## Module Structure
//!
//! - **[types]** - Request descriptors, error envelope and response values
//! - **[error]** - Error types and result handling
//! - **[client]** - Translation, dispatch and interpretation
//! - **[protocol]** - Media types and header helpers

pub mod client;
pub mod error;
pub mod protocol;
pub mod types;

pub use client::{ApiClient, ApiOptions, NoToken, StaticToken, TokenProvider};
pub use error::{ApiError, Result};
pub use types::{
    ApiResponse, Capability, ErrorEnvelope, FormField, FormValue, QueryParam, RawResponse, Request,
    RouteSlot, Verb,
};

#[cfg(test)]
mod tests;
