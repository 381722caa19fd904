//! Protocol constants and header helpers.

pub mod constants;
mod headers;

pub use headers::{current_locale, format_bearer, normalize_locale, parse_media_type};
