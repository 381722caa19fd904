//! Request translation: route, query string and form parts.
//!
//! These functions derive everything the dispatcher needs from a request's
//! metadata without touching the request itself. Translating the same
//! request twice gives identical output.
//!
//! # Route templates
//!
//! Placeholders are positional: `{0}` is the slot with the lowest order,
//! `{1}` the next, and so on. `{{` and `}}` produce literal braces.
//!
//! ```
//! use anyapi_client::client::build_route;
//! use anyapi_client::RouteSlot;
//!
//! let route = build_route("users/{0}/posts/{1}", &[
//!     RouteSlot::new(1, "7"),
//!     RouteSlot::new(0, "42"),
//! ]).unwrap();
//! assert_eq!(route, "users/42/posts/7");
//! ```
//!
//! # Query strings
//!
//! ```
//! use anyapi_client::client::build_query;
//! use anyapi_client::QueryParam;
//!
//! let query = build_query(&[
//!     QueryParam::value("q", "a b"),
//!     QueryParam::flag("all"),
//! ]);
//! assert_eq!(query, "q=a%20b&all");
//! ```

use crate::error::{ApiError, Result};
use crate::protocol::constants::{headers::FILE_PART_NAME, media_types};
use crate::types::{FormField, FormValue, QueryParam, RouteSlot};
use bytes::Bytes;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::io::ErrorKind;
use std::path::Path;

/// Everything except the RFC 3986 unreserved characters is escaped.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// One part of a multipart body, fully loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    /// Part name
    pub name: String,
    /// File name for file parts
    pub file_name: Option<String>,
    /// Part content type
    pub content_type: &'static str,
    /// Part payload
    pub data: Bytes,
}

impl FormPart {
    /// Whether this part carries file contents.
    pub fn is_file(&self) -> bool {
        self.file_name.is_some()
    }
}

/// Substitute route slots into a positional template.
pub fn build_route(template: &str, slots: &[RouteSlot]) -> Result<String> {
    let mut ordered: Vec<&RouteSlot> = slots.iter().collect();
    ordered.sort_by_key(|s| s.order);

    if let Some(pair) = ordered.windows(2).find(|w| w[0].order == w[1].order) {
        return Err(ApiError::InvalidArgument(format!(
            "route slot order {} declared more than once",
            pair[0].order
        )));
    }

    let mut route = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                route.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                route.push('}');
            }
            '{' => {
                let mut index = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(d) if d.is_ascii_digit() => index.push(d),
                        _ => {
                            return Err(ApiError::InvalidArgument(format!(
                                "malformed placeholder in route template '{}'",
                                template
                            )))
                        }
                    }
                }
                let slot = index
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| ordered.get(i))
                    .ok_or_else(|| {
                        ApiError::InvalidArgument(format!(
                            "route template '{}' references slot {{{}}} but {} slot(s) are declared",
                            template,
                            index,
                            ordered.len()
                        ))
                    })?;
                route.push_str(slot.value.as_deref().unwrap_or(""));
            }
            '}' => {
                return Err(ApiError::InvalidArgument(format!(
                    "unmatched '}}' in route template '{}'",
                    template
                )))
            }
            _ => route.push(c),
        }
    }

    tracing::trace!(template, route = %route, "built route");
    Ok(route)
}

/// Percent-escape a query key or value.
pub fn escape_data(value: &str) -> String {
    utf8_percent_encode(value, QUERY_ENCODE_SET).to_string()
}

/// Build a query string from parameters, preserving their order.
pub fn build_query(params: &[QueryParam]) -> String {
    params
        .iter()
        .map(|p| match &p.value {
            None => escape_data(&p.key),
            Some(v) => format!("{}={}", escape_data(&p.key), escape_data(v)),
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Load form fields into parts, reading file fields from disk.
///
/// Fails with [`ApiError::FileNotFound`] on the first missing file.
pub async fn build_form(fields: &[FormField]) -> Result<Vec<FormPart>> {
    let mut parts = Vec::with_capacity(fields.len());

    for field in fields {
        let part = match &field.value {
            FormValue::Text(text) => FormPart {
                name: field.name.clone(),
                file_name: None,
                content_type: media_types::TEXT_UTF8,
                data: Bytes::from(text.clone()),
            },
            FormValue::File(path) => load_file_part(path).await?,
        };
        parts.push(part);
    }

    Ok(parts)
}

async fn load_file_part(path: &Path) -> Result<FormPart> {
    let full_path = tokio::fs::canonicalize(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => ApiError::FileNotFound(path.to_path_buf()),
        _ => ApiError::Io(e),
    })?;

    if !tokio::fs::metadata(&full_path).await?.is_file() {
        return Err(ApiError::FileNotFound(full_path));
    }

    let data = tokio::fs::read(&full_path).await?;
    let file_name = full_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    tracing::trace!(path = %full_path.display(), size = data.len(), "loaded file part");

    Ok(FormPart {
        name: FILE_PART_NAME.to_string(),
        file_name: Some(file_name),
        content_type: media_types::OCTET_STREAM,
        data: Bytes::from(data),
    })
}
