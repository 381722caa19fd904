//! Response values handed back to callers.

use bytes::Bytes;
use http::StatusCode;

/// Decoded success payload.
///
/// JSON bodies are decoded into `T`; HTML, PDF and ZIP bodies are passed
/// through untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    /// `application/json` body decoded into the expected type
    Json(T),
    /// Raw payload of a binary-capable content type
    Binary {
        /// Media type the server declared
        content_type: String,
        /// Body bytes as received
        body: Bytes,
    },
}

impl<T> ApiResponse<T> {
    /// Decoded JSON value, if this is a JSON response.
    pub fn json(self) -> Option<T> {
        match self {
            ApiResponse::Json(value) => Some(value),
            ApiResponse::Binary { .. } => None,
        }
    }

    /// Raw bytes, if this is a binary response.
    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            ApiResponse::Json(_) => None,
            ApiResponse::Binary { body, .. } => Some(body),
        }
    }

    /// Whether the payload is binary.
    pub fn is_binary(&self) -> bool {
        matches!(self, ApiResponse::Binary { .. })
    }
}

/// A fully read HTTP response, before interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Status code
    pub status: StatusCode,
    /// `Content-Type` header value, if any
    pub content_type: Option<String>,
    /// Body bytes
    pub body: Bytes,
}

impl RawResponse {
    /// Build a response from parts.
    pub fn new(status: StatusCode, content_type: Option<&str>, body: impl Into<Bytes>) -> Self {
        RawResponse {
            status,
            content_type: content_type.map(str::to_string),
            body: body.into(),
        }
    }

    /// Read status, content type and the whole body of a transport response.
    pub async fn read(response: reqwest::Response) -> crate::error::Result<Self> {
        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?;

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }

    /// Canonical reason phrase of the status, empty when unknown.
    pub fn reason(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("")
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_accessors() {
        let response: ApiResponse<u32> = ApiResponse::Json(7);
        assert!(!response.is_binary());
        assert_eq!(response.clone().into_bytes(), None);
        assert_eq!(response.json(), Some(7));
    }

    #[test]
    fn test_binary_accessors() {
        let response: ApiResponse<u32> = ApiResponse::Binary {
            content_type: "application/pdf".to_string(),
            body: Bytes::from_static(b"%PDF"),
        };
        assert!(response.is_binary());
        assert_eq!(response.into_bytes(), Some(Bytes::from_static(b"%PDF")));
    }

    #[test]
    fn test_raw_response_reason() {
        let raw = RawResponse::new(StatusCode::IM_A_TEAPOT, None, "short and stout");
        assert_eq!(raw.reason(), "I'm a teapot");
        assert_eq!(raw.text(), "short and stout");
    }
}
