//! Response interpretation.
//!
//! Responses are classified by status first, then by content type:
//!
//! | Status | Outcome |
//! |--------|---------|
//! | 404 | `Ok(None)` |
//! | 401 | [`ApiError::Unauthorized`] |
//! | 400, 500 | [`ApiError::BadRequestOrServerError`] when errors are exposed, else as below |
//! | other non-2xx | [`ApiError::Http`] |
//! | 2xx | decoded by content type |
//!
//! | Content type | Outcome |
//! |--------------|---------|
//! | `text/html`, `application/pdf`, `application/zip` | [`ApiResponse::Binary`] |
//! | `application/json` | [`ApiResponse::Json`] |
//! | anything else | [`ApiError::Unsupported`] |

use super::codec::JsonCodec;
use crate::error::{ApiError, Result};
use crate::protocol::{constants::media_types, parse_media_type};
use crate::types::{ApiResponse, ErrorEnvelope, RawResponse};
use http::StatusCode;
use serde::de::DeserializeOwned;

/// Result of the status check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutcome {
    /// 404, the resource is absent
    NotFound,
    /// 2xx, the body can be decoded
    Success,
}

/// Classify the status of `response`.
pub fn check_status(
    response: &RawResponse,
    expose_errors: bool,
    codec: &JsonCodec,
) -> Result<StatusOutcome> {
    match response.status {
        StatusCode::NOT_FOUND => return Ok(StatusOutcome::NotFound),
        StatusCode::UNAUTHORIZED => return Err(ApiError::Unauthorized),
        StatusCode::BAD_REQUEST | StatusCode::INTERNAL_SERVER_ERROR if expose_errors => {
            let envelope: ErrorEnvelope = codec.decode(&response.body)?;
            tracing::warn!(
                status = response.status.as_u16(),
                summary = %envelope.summary,
                failures = envelope.exceptions.len(),
                "server returned error envelope"
            );
            return Err(ApiError::BadRequestOrServerError {
                status: response.status.as_u16(),
                envelope,
            });
        }
        _ => {}
    }

    if !response.status.is_success() {
        return Err(ApiError::Http {
            status: response.status.as_u16(),
            reason: response.reason().to_string(),
        });
    }

    Ok(StatusOutcome::Success)
}

/// Decode a success body according to its content type.
pub fn decode_body<T: DeserializeOwned>(
    response: RawResponse,
    codec: &JsonCodec,
) -> Result<ApiResponse<T>> {
    let media_type = response
        .content_type
        .as_deref()
        .map(parse_media_type)
        .unwrap_or_default();

    if media_types::BINARY.contains(&media_type.as_str()) {
        return Ok(ApiResponse::Binary {
            content_type: media_type,
            body: response.body,
        });
    }

    if media_type == media_types::JSON {
        return Ok(ApiResponse::Json(codec.decode(&response.body)?));
    }

    tracing::warn!(content_type = %media_type, "unsupported response content type");
    Err(ApiError::Unsupported(if media_type.is_empty() {
        "response without content type".to_string()
    } else {
        media_type
    }))
}

/// Full interpretation: status check followed by body decoding.
pub fn interpret<T: DeserializeOwned>(
    response: RawResponse,
    expose_errors: bool,
    codec: &JsonCodec,
) -> Result<Option<ApiResponse<T>>> {
    match check_status(&response, expose_errors, codec)? {
        StatusOutcome::NotFound => Ok(None),
        StatusOutcome::Success => decode_body(response, codec).map(Some),
    }
}
