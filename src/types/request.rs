//! Request descriptor model.
//!
//! A request descriptor is any type implementing [`Request`]. Instead of
//! annotating fields and discovering them at runtime, each descriptor lists
//! its own metadata:
//!
//! | Metadata | Method | Meaning |
//! |----------|--------|---------|
//! | Route template | [`Request::route`] | path with `{0}`, `{1}`, … placeholders |
//! | Route slots | [`Request::route_slots`] | ordered values for the placeholders |
//! | Query params | [`Request::query_params`] | key/value pairs for the query string |
//! | Capability | [`Request::capability`] | verb plus body or form payload |
//!
//! # Examples
//!
//! ```
//! use anyapi_client::{Capability, QueryParam, Request, Result, RouteSlot};
//!
//! struct GetUser {
//!     id: u64,
//!     expand: Option<String>,
//! }
//!
//! impl Request for GetUser {
//!     fn route(&self) -> &str {
//!         "users/{0}"
//!     }
//!
//!     fn capability(&self) -> Result<Capability> {
//!         Ok(Capability::Get)
//!     }
//!
//!     fn route_slots(&self) -> Vec<RouteSlot> {
//!         vec![RouteSlot::new(0, self.id)]
//!     }
//!
//!     fn query_params(&self) -> Vec<QueryParam> {
//!         vec![QueryParam::new("expand", self.expand.as_deref())]
//!     }
//! }
//! ```

use crate::error::Result;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

/// HTTP verb a capability maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// GET
    Get,
    /// PUT with a JSON body
    Put,
    /// POST with a JSON body
    Post,
    /// POST with a multipart body
    PostForm,
    /// DELETE
    Delete,
    /// OPTIONS
    Options,
}

impl Verb {
    /// Transport method for this verb.
    pub fn method(self) -> reqwest::Method {
        match self {
            Verb::Get => reqwest::Method::GET,
            Verb::Put => reqwest::Method::PUT,
            Verb::Post | Verb::PostForm => reqwest::Method::POST,
            Verb::Delete => reqwest::Method::DELETE,
            Verb::Options => reqwest::Method::OPTIONS,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verb::Get => write!(f, "GET"),
            Verb::Put => write!(f, "PUT"),
            Verb::Post => write!(f, "POST"),
            Verb::PostForm => write!(f, "POST (form)"),
            Verb::Delete => write!(f, "DELETE"),
            Verb::Options => write!(f, "OPTIONS"),
        }
    }
}

/// What a request can do, together with the payload it needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Capability {
    /// Plain GET, no payload
    Get,
    /// PUT with an optional JSON body
    Put(Option<Value>),
    /// POST with an optional JSON body
    Post(Option<Value>),
    /// POST with multipart form fields
    PostForm(Vec<FormField>),
    /// Plain DELETE, no payload
    Delete,
    /// Plain OPTIONS, no payload
    Options,
}

impl Capability {
    /// PUT capability carrying `body` serialized to JSON.
    pub fn put<B: Serialize + ?Sized>(body: &B) -> Result<Self> {
        Ok(Capability::Put(Some(serde_json::to_value(body)?)))
    }

    /// POST capability carrying `body` serialized to JSON.
    pub fn post<B: Serialize + ?Sized>(body: &B) -> Result<Self> {
        Ok(Capability::Post(Some(serde_json::to_value(body)?)))
    }

    /// Verb this capability is sent with.
    pub fn verb(&self) -> Verb {
        match self {
            Capability::Get => Verb::Get,
            Capability::Put(_) => Verb::Put,
            Capability::Post(_) => Verb::Post,
            Capability::PostForm(_) => Verb::PostForm,
            Capability::Delete => Verb::Delete,
            Capability::Options => Verb::Options,
        }
    }
}

/// One positional substitution into the route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSlot {
    /// Sort key; slots are substituted in ascending order
    pub order: i32,
    /// Current value, `None` substitutes as the empty string
    pub value: Option<String>,
}

impl RouteSlot {
    /// Slot with a value.
    pub fn new(order: i32, value: impl ToString) -> Self {
        RouteSlot {
            order,
            value: Some(value.to_string()),
        }
    }

    /// Slot from an optional value.
    pub fn optional<V: ToString>(order: i32, value: Option<V>) -> Self {
        RouteSlot {
            order,
            value: value.map(|v| v.to_string()),
        }
    }
}

/// One query string parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParam {
    /// Parameter name (override name or field name)
    pub key: String,
    /// Current value, `None` emits the bare key
    pub value: Option<String>,
}

impl QueryParam {
    /// Parameter from an optional value.
    pub fn new<V: ToString>(key: impl Into<String>, value: Option<V>) -> Self {
        QueryParam {
            key: key.into(),
            value: value.map(|v| v.to_string()),
        }
    }

    /// Parameter that is always present.
    pub fn value(key: impl Into<String>, value: impl ToString) -> Self {
        QueryParam {
            key: key.into(),
            value: Some(value.to_string()),
        }
    }

    /// Parameter without a value (`?flag`).
    pub fn flag(key: impl Into<String>) -> Self {
        QueryParam {
            key: key.into(),
            value: None,
        }
    }
}

/// Value of a multipart form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    /// Scalar value sent as a UTF-8 text part
    Text(String),
    /// File on disk sent as a binary part named `file`
    File(PathBuf),
}

/// A declared multipart form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Field name
    pub name: String,
    /// Field value
    pub value: FormValue,
}

impl FormField {
    /// Text field.
    pub fn text(name: impl Into<String>, value: impl ToString) -> Self {
        FormField {
            name: name.into(),
            value: FormValue::Text(value.to_string()),
        }
    }

    /// File field. The part is always sent as `file`, so `name` only documents the field.
    pub fn file(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        FormField {
            name: name.into(),
            value: FormValue::File(path.into()),
        }
    }
}

/// A declaratively-described API request.
pub trait Request {
    /// Route template, e.g. `users/{0}/posts`.
    fn route(&self) -> &str;

    /// Capability of this request and its payload.
    fn capability(&self) -> Result<Capability>;

    /// Route slots substituted into [`Request::route`].
    fn route_slots(&self) -> Vec<RouteSlot> {
        Vec::new()
    }

    /// Query parameters, in declaration order.
    fn query_params(&self) -> Vec<QueryParam> {
        Vec::new()
    }
}

impl<R: Request + ?Sized> Request for &R {
    fn route(&self) -> &str {
        (**self).route()
    }

    fn capability(&self) -> Result<Capability> {
        (**self).capability()
    }

    fn route_slots(&self) -> Vec<RouteSlot> {
        (**self).route_slots()
    }

    fn query_params(&self) -> Vec<QueryParam> {
        (**self).query_params()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct NewUser {
        name: String,
    }

    #[test]
    fn test_verb_methods() {
        assert_eq!(Verb::Get.method(), reqwest::Method::GET);
        assert_eq!(Verb::PostForm.method(), reqwest::Method::POST);
        assert_eq!(Verb::Options.method(), reqwest::Method::OPTIONS);
    }

    #[test]
    fn test_capability_verb() {
        assert_eq!(Capability::Get.verb(), Verb::Get);
        assert_eq!(Capability::PostForm(Vec::new()).verb(), Verb::PostForm);
        assert_eq!(Capability::Delete.verb(), Verb::Delete);
    }

    #[test]
    fn test_capability_post_serializes_body() {
        let cap = Capability::post(&NewUser {
            name: "Bob".to_string(),
        })
        .unwrap();
        assert_eq!(cap, Capability::Post(Some(serde_json::json!({"name": "Bob"}))));
    }

    #[test]
    fn test_route_slot_optional() {
        let slot = RouteSlot::optional::<u32>(1, None);
        assert_eq!(slot.value, None);
        assert_eq!(RouteSlot::new(0, 42).value.as_deref(), Some("42"));
    }

    #[test]
    fn test_query_param_constructors() {
        assert_eq!(QueryParam::flag("all").value, None);
        assert_eq!(QueryParam::value("page", 2).value.as_deref(), Some("2"));
        assert_eq!(QueryParam::new("q", Some("x")).value.as_deref(), Some("x"));
    }
}
