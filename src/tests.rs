//! End-to-end translation and interpretation scenarios, without a network.

use crate::client::{
    build_form, build_query, build_route, interpret, ApiClient, ApiOptions, JsonCodec,
};
use crate::error::ApiError;
use crate::types::{
    ApiResponse, Capability, ErrorEnvelope, FormField, QueryParam, RawResponse, Request, RouteSlot,
};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Deserialize, PartialEq)]
struct User {
    id: u64,
    name: String,
}

#[derive(Serialize)]
enum Status {
    Active,
}

#[derive(Serialize)]
struct UpdateUser {
    name: String,
    email: Option<String>,
    status: Status,
}

struct GetUser {
    id: &'static str,
}

impl Request for GetUser {
    fn route(&self) -> &str {
        "/users/{0}"
    }

    fn capability(&self) -> crate::Result<Capability> {
        Ok(Capability::Get)
    }

    fn route_slots(&self) -> Vec<RouteSlot> {
        vec![RouteSlot::new(0, self.id)]
    }
}

struct SearchUsers {
    term: Option<String>,
    page: u32,
    include_inactive: bool,
}

impl Request for SearchUsers {
    fn route(&self) -> &str {
        "users"
    }

    fn capability(&self) -> crate::Result<Capability> {
        Ok(Capability::Get)
    }

    fn query_params(&self) -> Vec<QueryParam> {
        let mut params = vec![
            QueryParam::new("q", self.term.as_deref()),
            QueryParam::value("page", self.page),
        ];
        if self.include_inactive {
            params.push(QueryParam::flag("inactive"));
        }
        params
    }
}

struct PutUser {
    org: u32,
    id: u64,
    body: UpdateUser,
}

impl Request for PutUser {
    fn route(&self) -> &str {
        "orgs/{0}/users/{1}"
    }

    fn capability(&self) -> crate::Result<Capability> {
        Capability::put(&self.body)
    }

    fn route_slots(&self) -> Vec<RouteSlot> {
        vec![RouteSlot::new(2, self.id), RouteSlot::new(1, self.org)]
    }
}

fn raw(status: u16, content_type: Option<&str>, body: &'static str) -> RawResponse {
    RawResponse::new(StatusCode::from_u16(status).unwrap(), content_type, body)
}

#[test]
fn get_route_with_single_slot_and_no_query() {
    let request = GetUser { id: "42" };
    let route = build_route(request.route(), &request.route_slots()).unwrap();
    let query = build_query(&request.query_params());
    assert_eq!(route, "/users/42");
    assert_eq!(query, "");
}

#[test]
fn translation_is_idempotent() {
    let request = SearchUsers {
        term: Some("ann & bob".to_string()),
        page: 3,
        include_inactive: true,
    };
    let first = build_query(&request.query_params());
    let second = build_query(&request.query_params());
    assert_eq!(first, second);
    assert_eq!(first, "q=ann%20%26%20bob&page=3&inactive");
}

#[test]
fn query_null_value_emits_bare_key() {
    let request = SearchUsers {
        term: None,
        page: 1,
        include_inactive: false,
    };
    assert_eq!(build_query(&request.query_params()), "q&page=1");
}

#[test]
fn put_request_url_and_body() {
    let options = ApiOptions::new("api.example.com", 443)
        .with_ssl(true)
        .with_root("/v1/");
    let client = ApiClient::new(options).unwrap();
    let request = PutUser {
        org: 7,
        id: 99,
        body: UpdateUser {
            name: "Bob".to_string(),
            email: None,
            status: Status::Active,
        },
    };

    let url = client.url_for(&request).unwrap();
    assert_eq!(url.as_str(), "https://api.example.com/v1/orgs/7/users/99");
    assert_eq!(url.port_or_known_default(), Some(443));

    match request.capability().unwrap() {
        Capability::Put(body) => {
            let encoded = JsonCodec.encode_body(body.as_ref()).unwrap();
            assert_eq!(encoded, r#"{"name":"Bob","status":"Active"}"#);
        }
        other => panic!("expected PUT, got {:?}", other),
    }
}

#[test]
fn not_found_returns_absent_user() {
    let result: Option<ApiResponse<User>> =
        interpret(raw(404, None, ""), false, &JsonCodec).unwrap();
    assert!(result.is_none());
}

#[test]
fn unauthorized_regardless_of_body() {
    for body in ["", "not json", r#"{"summary":"x"}"#] {
        let result: crate::Result<Option<ApiResponse<User>>> =
            interpret(raw(401, Some("application/json"), body), true, &JsonCodec);
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }
}

#[test]
fn bad_request_with_exposed_errors_aggregates_failures() {
    let body = r#"{"summary":"Bad","exceptions":["x","y"],"statusCode":400}"#;
    let result: crate::Result<Option<ApiResponse<User>>> =
        interpret(raw(400, Some("application/json"), body), true, &JsonCodec);
    let err = result.unwrap_err();
    assert_eq!(err.failures().len(), 2);
    assert_eq!(err.failures(), ["x", "y"]);
}

#[test]
fn error_envelope_round_trip() {
    let envelope = ErrorEnvelope {
        summary: "Bad".to_string(),
        exceptions: vec!["x".to_string(), "y".to_string()],
        status_code: 400,
    };
    let encoded = serde_json::to_string(&envelope).unwrap();
    let decoded: ErrorEnvelope = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, envelope);
}

#[tokio::test]
async fn form_with_text_and_ten_byte_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&[7u8; 10]).unwrap();

    let parts = build_form(&[
        FormField::text("name", "Bob"),
        FormField::file("attachment", file.path()),
    ])
    .await
    .unwrap();

    let text = parts.iter().find(|p| p.name == "name").unwrap();
    assert_eq!(&text.data[..], b"Bob");

    let binary = parts.iter().find(|p| p.name == "file").unwrap();
    assert_eq!(binary.data.len(), 10);
    assert!(binary.is_file());
}

#[tokio::test]
async fn missing_form_file_fails_before_network() {
    // Port 1 refuses connections; reaching the network would give a transport error.
    let client = ApiClient::new(ApiOptions::new("127.0.0.1", 1)).unwrap();

    struct Upload;

    impl Request for Upload {
        fn route(&self) -> &str {
            "upload"
        }

        fn capability(&self) -> crate::Result<Capability> {
            Ok(Capability::PostForm(vec![FormField::file(
                "doc",
                "/definitely/not/here.pdf",
            )]))
        }
    }

    let result = client
        .post_form(&Upload, &tokio_util::sync::CancellationToken::new())
        .await;
    assert!(matches!(result, Err(ApiError::FileNotFound(_))));
}
