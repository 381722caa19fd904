//! API client implementation.
//!
//! This module turns request descriptors into HTTP calls and HTTP responses
//! into typed results:
//!
//! - **Translate** route templates, query strings and multipart forms
//! - **Dispatch** by capability to GET, PUT, POST, multipart POST, DELETE or OPTIONS
//! - **Authenticate** with a pluggable bearer token provider
//! - **Interpret** responses by status code and content type
//!
//! # Module Organization
//!
//! ```text
//! client/
//! ├── fetch     - ApiClient and HTTP operations
//! ├── translate - route, query and form building
//! ├── response  - status and content-type interpretation
//! ├── codec     - JSON encoding rules
//! ├── auth      - bearer token providers
//! └── config    - client options
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ApiClient`] | Base client with one long-lived transport |
//! | [`ApiOptions`] | Host, port, TLS, root, timeout and error exposure |
//! | [`TokenProvider`] | Source of the bearer token |
//! | [`FormPart`] | A loaded multipart part |
//! | [`JsonCodec`] | JSON body encoder/decoder |
//!
//! # Examples
//!
//! ## Creating a Client
//!
//! ```
//! use anyapi_client::client::{ApiClient, ApiOptions};
//!
//! let options = ApiOptions::new("api.example.com", 443)
//!     .with_ssl(true)
//!     .with_root("v2")
//!     .with_expose_errors(true);
//! let client = ApiClient::new(options).unwrap();
//! assert_eq!(client.options().origin(), "https://api.example.com:443");
//! ```
//!
//! ## Translating Metadata
//!
//! ```
//! use anyapi_client::client::{build_query, build_route};
//! use anyapi_client::{QueryParam, RouteSlot};
//!
//! let route = build_route("/users/{0}", &[RouteSlot::new(0, 42)]).unwrap();
//! assert_eq!(route, "/users/42");
//!
//! let query = build_query(&[QueryParam::value("sort", "name asc")]);
//! assert_eq!(query, "sort=name%20asc");
//! ```

mod auth;
mod codec;
mod config;
mod fetch;
mod response;
mod translate;

pub use auth::{NoToken, StaticToken, TokenProvider};
pub use codec::JsonCodec;
pub use config::ApiOptions;
pub use fetch::ApiClient;
pub use response::{check_status, decode_body, interpret, StatusOutcome};
pub use translate::{build_form, build_query, build_route, escape_data, FormPart};
