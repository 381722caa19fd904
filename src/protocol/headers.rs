//! Shared header parsing and formatting.
//!
//! # Header Formats
//!
//! | Header | Format | Example |
//! |--------|--------|---------|
//! | Authorization | `Bearer {token}`, or `Bearer` alone for an empty token | `Bearer abc` |
//! | Accept-Language | BCP 47 language tag | `en-US` |
//! | Content-Type | media type with optional parameters | `application/json; charset=utf-8` |
//!
//! # Examples
//!
//! ```
//! use anyapi_client::protocol::{format_bearer, normalize_locale, parse_media_type};
//!
//! assert_eq!(format_bearer("abc"), "Bearer abc");
//! assert_eq!(normalize_locale("de_DE.UTF-8"), "de-DE");
//! assert_eq!(parse_media_type("Application/JSON; charset=utf-8"), "application/json");
//! ```

use super::constants::{headers::BEARER, DEFAULT_LOCALE};

/// Format an `Authorization` header value for a bearer token.
///
/// An empty token yields the bare scheme.
pub fn format_bearer(token: &str) -> String {
    let token = token.trim();
    if token.is_empty() {
        BEARER.to_string()
    } else {
        format!("{} {}", BEARER, token)
    }
}

/// Extract the media type from a `Content-Type` value.
///
/// Parameters are dropped and the result is lowercased.
pub fn parse_media_type(value: &str) -> String {
    value
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

/// Normalize a system locale into a language tag.
///
/// POSIX forms such as `en_US.UTF-8` or `sr_RS@latin` become `en-US` and
/// `sr-RS`. The `C`/`POSIX` locales and empty input fall back to `en-US`.
pub fn normalize_locale(value: &str) -> String {
    let tag = value
        .split(['.', '@'])
        .next()
        .unwrap_or("")
        .trim()
        .replace('_', "-");

    match tag.as_str() {
        "" | "C" | "POSIX" => DEFAULT_LOCALE.to_string(),
        _ => tag,
    }
}

/// Locale of the running process as a language tag.
pub fn current_locale() -> String {
    sys_locale::get_locale()
        .map(|l| normalize_locale(&l))
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bearer() {
        assert_eq!(format_bearer("token123"), "Bearer token123");
    }

    #[test]
    fn test_format_bearer_empty() {
        assert_eq!(format_bearer(""), "Bearer");
        assert_eq!(format_bearer("  "), "Bearer");
    }

    #[test]
    fn test_parse_media_type_plain() {
        assert_eq!(parse_media_type("application/pdf"), "application/pdf");
    }

    #[test]
    fn test_parse_media_type_with_params() {
        assert_eq!(
            parse_media_type("text/html; charset=ISO-8859-1"),
            "text/html"
        );
    }

    #[test]
    fn test_parse_media_type_case() {
        assert_eq!(parse_media_type(" Application/Zip "), "application/zip");
    }

    #[test]
    fn test_normalize_locale_posix() {
        assert_eq!(normalize_locale("en_US.UTF-8"), "en-US");
        assert_eq!(normalize_locale("sr_RS@latin"), "sr-RS");
    }

    #[test]
    fn test_normalize_locale_tag() {
        assert_eq!(normalize_locale("fr-CA"), "fr-CA");
    }

    #[test]
    fn test_normalize_locale_fallback() {
        assert_eq!(normalize_locale("C"), "en-US");
        assert_eq!(normalize_locale(""), "en-US");
    }

    #[test]
    fn test_current_locale_not_empty() {
        assert!(!current_locale().is_empty());
    }
}
