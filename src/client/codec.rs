//! JSON codec for request bodies and response payloads.
//!
//! Encoding drops object fields whose value is `null`, so optional fields that
//! are `None` never reach the wire even without `skip_serializing_if`. Enum
//! variants keep serde's default external representation, which writes unit
//! variants as their names rather than ordinals.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Stateless JSON encoder/decoder shared by the client.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Encode a body; an absent body encodes as the empty string.
    pub fn encode_body(&self, body: Option<&Value>) -> Result<String> {
        match body {
            None => Ok(String::new()),
            Some(value) => {
                let mut value = value.clone();
                strip_nulls(&mut value);
                Ok(serde_json::to_string(&value)?)
            }
        }
    }

    /// Decode a JSON document into `T`.
    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Remove `null` members from every object in `value`.
///
/// Array elements are kept so positions stay meaningful.
fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            for v in map.values_mut() {
                strip_nulls(v);
            }
        }
        Value::Array(items) => {
            for v in items {
                strip_nulls(v);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    enum Role {
        Admin,
        Guest,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        name: String,
        nickname: Option<String>,
        role: Role,
    }

    #[test]
    fn test_absent_body_is_empty() {
        assert_eq!(JsonCodec.encode_body(None).unwrap(), "");
    }

    #[test]
    fn test_nulls_removed_from_objects() {
        let value = json!({"a": 1, "b": null, "c": {"d": null, "e": [null, {"f": null}]}});
        let encoded = JsonCodec.encode_body(Some(&value)).unwrap();
        assert_eq!(encoded, r#"{"a":1,"c":{"e":[null,{}]}}"#);
    }

    #[test]
    fn test_enum_encoded_as_name() {
        let user = User {
            name: "Bob".to_string(),
            nickname: None,
            role: Role::Admin,
        };
        let value = serde_json::to_value(&user).unwrap();
        let encoded = JsonCodec.encode_body(Some(&value)).unwrap();
        assert_eq!(encoded, r#"{"name":"Bob","role":"Admin"}"#);
    }

    #[test]
    fn test_decode() {
        let user: User = JsonCodec
            .decode(br#"{"name":"Ann","nickname":"A","role":"Guest"}"#)
            .unwrap();
        assert_eq!(user.role, Role::Guest);
        assert_eq!(user.nickname.as_deref(), Some("A"));
    }

    #[test]
    fn test_decode_invalid_json() {
        let result: Result<User> = JsonCodec.decode(b"not json");
        assert!(matches!(result, Err(crate::error::ApiError::Json(_))));
    }
}
