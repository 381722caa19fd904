//! Core data types: request descriptors, error envelope and response values.

mod envelope;
mod request;
mod response;

pub use envelope::{ErrorEnvelope, INTERNAL_SERVER_ERROR};
pub use request::{Capability, FormField, FormValue, QueryParam, Request, RouteSlot, Verb};
pub use response::{ApiResponse, RawResponse};
