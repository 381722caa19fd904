//! Main API client implementation.
//!
//! [`ApiClient`] is the base that concrete API clients are built on. A
//! concrete client owns one `ApiClient` and exposes typed endpoint methods
//! that pass request descriptors to it.
//!
//! # Examples
//!
//! ## Typed GET
//!
//! ```ignore
//! use anyapi_client::{ApiClient, ApiOptions, Capability, Request, Result, RouteSlot};
//! use tokio_util::sync::CancellationToken;
//!
//! struct GetUser(u64);
//!
//! impl Request for GetUser {
//!     fn route(&self) -> &str { "users/{0}" }
//!     fn capability(&self) -> Result<Capability> { Ok(Capability::Get) }
//!     fn route_slots(&self) -> Vec<RouteSlot> { vec![RouteSlot::new(0, self.0)] }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ApiClient::new(ApiOptions::new("api.example.com", 443).with_ssl(true))?;
//!     let user = client
//!         .get_as::<_, User>(&GetUser(42), &CancellationToken::new())
//!         .await?
//!         .and_then(|r| r.json());
//!     println!("{:?}", user);
//!     Ok(())
//! }
//! ```
//!
//! ## Cancelling a call
//!
//! ```ignore
//! let cancel = CancellationToken::new();
//! let pending = client.get(&request, &cancel);
//! cancel.cancel();
//! assert!(pending.await.unwrap_err().is_cancelled());
//! ```

use super::auth::{NoToken, TokenProvider};
use super::codec::JsonCodec;
use super::config::ApiOptions;
use super::response::{check_status, interpret};
use super::translate::{build_form, build_query, build_route, FormPart};
use crate::error::{ApiError, Result};
use crate::protocol::{constants::media_types, current_locale, format_bearer};
use crate::types::{ApiResponse, Capability, RawResponse, Request, Verb};
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use url::Url;

/// The base API client.
///
/// Owns a single transport for its whole lifetime. Clones share the
/// transport, the options and the token provider, so one client can serve
/// concurrent calls from many tasks.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    options: Arc<ApiOptions>,
    token_provider: Arc<dyn TokenProvider>,
    codec: JsonCodec,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client that sends an empty bearer token.
    pub fn new(options: ApiOptions) -> Result<Self> {
        Self::with_token_provider(options, Arc::new(NoToken))
    }

    /// Create a client with a token provider.
    pub fn with_token_provider(
        options: ApiOptions,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Result<Self> {
        options.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(header::ACCEPT, HeaderValue::from_static(media_types::JSON));

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::default())
            .gzip(true)
            .deflate(true)
            .timeout(options.timeout())
            .default_headers(default_headers)
            .build()?;

        tracing::debug!(origin = %options.origin(), root = options.root(), "api client created");

        Ok(ApiClient {
            client,
            options: Arc::new(options),
            token_provider,
            codec: JsonCodec,
        })
    }

    /// Options the client was built with.
    pub fn options(&self) -> &ApiOptions {
        &self.options
    }

    /// Full URL a request is sent to.
    ///
    /// `scheme://host:port/root/route?query`; an empty root or query is left out.
    /// A port equal to the scheme's default (80, 443) is not serialized.
    pub fn url_for<R: Request + ?Sized>(&self, request: &R) -> Result<Url> {
        let route = build_route(request.route(), &request.route_slots())?;
        let query = build_query(&request.query_params());

        let mut url = self.options.origin();
        let root = self.options.root().trim_start_matches('/');
        if !root.is_empty() {
            url.push('/');
            url.push_str(root);
        }
        url.push('/');
        url.push_str(route.trim_start_matches('/'));
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }

        Url::parse(&url)
            .map_err(|e| ApiError::InvalidArgument(format!("invalid request URL '{}': {}", url, e)))
    }

    /// Send a GET request, checking only the status.
    pub async fn get<R>(&self, request: &R, cancel: &CancellationToken) -> Result<()>
    where
        R: Request + ?Sized,
    {
        self.call(Some(Verb::Get), request, cancel).await
    }

    /// Send a GET request and decode the response.
    pub async fn get_as<R, T>(
        &self,
        request: &R,
        cancel: &CancellationToken,
    ) -> Result<Option<ApiResponse<T>>>
    where
        R: Request + ?Sized,
        T: DeserializeOwned,
    {
        self.call_as(Some(Verb::Get), request, cancel).await
    }

    /// Send a PUT request with a JSON body, checking only the status.
    pub async fn put<R>(&self, request: &R, cancel: &CancellationToken) -> Result<()>
    where
        R: Request + ?Sized,
    {
        self.call(Some(Verb::Put), request, cancel).await
    }

    /// Send a PUT request with a JSON body and decode the response.
    pub async fn put_as<R, T>(
        &self,
        request: &R,
        cancel: &CancellationToken,
    ) -> Result<Option<ApiResponse<T>>>
    where
        R: Request + ?Sized,
        T: DeserializeOwned,
    {
        self.call_as(Some(Verb::Put), request, cancel).await
    }

    /// Send a POST request with a JSON body, checking only the status.
    pub async fn post<R>(&self, request: &R, cancel: &CancellationToken) -> Result<()>
    where
        R: Request + ?Sized,
    {
        self.call(Some(Verb::Post), request, cancel).await
    }

    /// Send a POST request with a JSON body and decode the response.
    pub async fn post_as<R, T>(
        &self,
        request: &R,
        cancel: &CancellationToken,
    ) -> Result<Option<ApiResponse<T>>>
    where
        R: Request + ?Sized,
        T: DeserializeOwned,
    {
        self.call_as(Some(Verb::Post), request, cancel).await
    }

    /// Send a multipart POST request, checking only the status.
    pub async fn post_form<R>(&self, request: &R, cancel: &CancellationToken) -> Result<()>
    where
        R: Request + ?Sized,
    {
        self.call(Some(Verb::PostForm), request, cancel).await
    }

    /// Send a multipart POST request and decode the response.
    pub async fn post_form_as<R, T>(
        &self,
        request: &R,
        cancel: &CancellationToken,
    ) -> Result<Option<ApiResponse<T>>>
    where
        R: Request + ?Sized,
        T: DeserializeOwned,
    {
        self.call_as(Some(Verb::PostForm), request, cancel).await
    }

    /// Send a DELETE request, checking only the status.
    pub async fn delete<R>(&self, request: &R, cancel: &CancellationToken) -> Result<()>
    where
        R: Request + ?Sized,
    {
        self.call(Some(Verb::Delete), request, cancel).await
    }

    /// Send a DELETE request and decode the response.
    pub async fn delete_as<R, T>(
        &self,
        request: &R,
        cancel: &CancellationToken,
    ) -> Result<Option<ApiResponse<T>>>
    where
        R: Request + ?Sized,
        T: DeserializeOwned,
    {
        self.call_as(Some(Verb::Delete), request, cancel).await
    }

    /// Send a request with whatever verb its capability maps to.
    pub async fn send<R>(&self, request: &R, cancel: &CancellationToken) -> Result<()>
    where
        R: Request + ?Sized,
    {
        self.call(None, request, cancel).await
    }

    /// Send a request with whatever verb its capability maps to and decode the response.
    pub async fn send_as<R, T>(
        &self,
        request: &R,
        cancel: &CancellationToken,
    ) -> Result<Option<ApiResponse<T>>>
    where
        R: Request + ?Sized,
        T: DeserializeOwned,
    {
        self.call_as(None, request, cancel).await
    }

    async fn call<R>(
        &self,
        expected: Option<Verb>,
        request: &R,
        cancel: &CancellationToken,
    ) -> Result<()>
    where
        R: Request + ?Sized,
    {
        let response = self.execute(expected, request, cancel).await?;
        check_status(&response, self.options.use_expose_errors, &self.codec)?;
        Ok(())
    }

    async fn call_as<R, T>(
        &self,
        expected: Option<Verb>,
        request: &R,
        cancel: &CancellationToken,
    ) -> Result<Option<ApiResponse<T>>>
    where
        R: Request + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.execute(expected, request, cancel).await?;
        interpret(response, self.options.use_expose_errors, &self.codec)
    }

    /// Translate, send and read one request, racing it against `cancel`.
    async fn execute<R>(
        &self,
        expected: Option<Verb>,
        request: &R,
        cancel: &CancellationToken,
    ) -> Result<RawResponse>
    where
        R: Request + ?Sized,
    {
        let capability = request.capability()?;
        let verb = capability.verb();

        if let Some(expected) = expected {
            if expected != verb {
                return Err(ApiError::Unsupported(format!(
                    "{} request cannot be sent as {}",
                    verb, expected
                )));
            }
        }

        let url = self.url_for(request)?;

        let exchange = async {
            let builder = self.prepare(verb, url.clone()).await?;
            let builder = self.attach_payload(builder, capability).await?;

            tracing::debug!(method = %verb, url = %url, "sending request");
            let response = builder.send().await?;
            let response = RawResponse::read(response).await?;
            tracing::debug!(
                method = %verb,
                url = %url,
                status = response.status.as_u16(),
                "received response"
            );

            Ok::<_, ApiError>(response)
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(method = %verb, url = %url, "request cancelled");
                Err(ApiError::Cancelled)
            }
            result = exchange => result,
        }
    }

    /// Request builder with the per-call headers.
    async fn prepare(&self, verb: Verb, url: Url) -> Result<reqwest::RequestBuilder> {
        let token = self.token_provider.token().await?;
        let locale = match &self.options.locale {
            Some(locale) => locale.clone(),
            None => current_locale(),
        };

        let authorization = HeaderValue::from_str(&format_bearer(&token))
            .map_err(|e| ApiError::InvalidArgument(format!("invalid bearer token: {}", e)))?;
        let accept_language = HeaderValue::from_str(&locale)
            .map_err(|e| ApiError::InvalidArgument(format!("invalid locale '{}': {}", locale, e)))?;

        Ok(self
            .client
            .request(verb.method(), url)
            .header(header::AUTHORIZATION, authorization)
            .header(header::ACCEPT_LANGUAGE, accept_language))
    }

    async fn attach_payload(
        &self,
        builder: reqwest::RequestBuilder,
        capability: Capability,
    ) -> Result<reqwest::RequestBuilder> {
        Ok(match capability {
            Capability::Put(body) | Capability::Post(body) => builder
                .header(header::CONTENT_TYPE, media_types::JSON_UTF8)
                .body(self.codec.encode_body(body.as_ref())?),
            Capability::PostForm(fields) => {
                let parts = build_form(&fields).await?;
                builder.multipart(to_multipart(parts)?)
            }
            Capability::Get | Capability::Delete | Capability::Options => builder,
        })
    }
}

fn to_multipart(parts: Vec<FormPart>) -> Result<reqwest::multipart::Form> {
    let mut form = reqwest::multipart::Form::new();

    for part in parts {
        let mut body =
            reqwest::multipart::Part::bytes(part.data.to_vec()).mime_str(part.content_type)?;
        if let Some(file_name) = part.file_name {
            body = body.file_name(file_name);
        }
        form = form.part(part.name, body);
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{QueryParam, RouteSlot};

    struct GetUser {
        id: Option<u64>,
        fields: Option<&'static str>,
    }

    impl Request for GetUser {
        fn route(&self) -> &str {
            "/users/{0}"
        }

        fn capability(&self) -> Result<Capability> {
            Ok(Capability::Get)
        }

        fn route_slots(&self) -> Vec<RouteSlot> {
            vec![RouteSlot::optional(0, self.id)]
        }

        fn query_params(&self) -> Vec<QueryParam> {
            vec![QueryParam::new("fields", self.fields)]
        }
    }

    fn client(options: ApiOptions) -> ApiClient {
        ApiClient::new(options).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = client(ApiOptions::default());
        assert_eq!(client.options().port, 80);
    }

    #[test]
    fn test_client_rejects_invalid_options() {
        let result = ApiClient::new(ApiOptions::new("", 80));
        assert!(matches!(result, Err(ApiError::InvalidArgument(_))));
    }

    #[test]
    fn test_url_with_root_and_query() {
        let client = client(
            ApiOptions::new("api.example.com/", 8443)
                .with_root("v1/")
                .with_ssl(true),
        );
        let url = client
            .url_for(&GetUser {
                id: Some(42),
                fields: Some("name email"),
            })
            .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com:8443/v1/users/42?fields=name%20email");
    }

    #[test]
    fn test_url_without_root() {
        let client = client(ApiOptions::new("localhost", 8080));
        let url = client.url_for(&GetUser { id: Some(1), fields: None }).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/users/1?fields");
    }

    #[test]
    fn test_url_drops_default_port() {
        let client = client(ApiOptions::new("api.example.com", 443).with_ssl(true));
        let url = client.url_for(&GetUser { id: Some(42), fields: None }).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/users/42?fields");
        assert_eq!(url.port_or_known_default(), Some(443));
    }

    #[test]
    fn test_url_null_route_slot() {
        let client = client(ApiOptions::new("localhost", 8080).with_root("api"));
        let url = client.url_for(&GetUser { id: None, fields: None }).unwrap();
        assert_eq!(url.path(), "/api/users/");
    }

    #[test]
    fn test_to_multipart_accepts_parts() {
        let parts = vec![FormPart {
            name: "name".to_string(),
            file_name: None,
            content_type: media_types::TEXT_UTF8,
            data: bytes::Bytes::from_static(b"Bob"),
        }];
        assert!(to_multipart(parts).is_ok());
    }

    #[tokio::test]
    async fn test_verb_mismatch_is_unsupported() {
        let client = client(ApiOptions::new("localhost", 1));
        let result = client
            .delete(&GetUser { id: Some(1), fields: None }, &CancellationToken::new())
            .await;
        assert!(matches!(result, Err(ApiError::Unsupported(_))));
    }

    #[tokio::test]
    async fn test_cancelled_before_send() {
        let client = client(ApiOptions::new("localhost", 1));
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = client
            .get(&GetUser { id: Some(1), fields: None }, &cancel)
            .await;
        assert!(matches!(result, Err(ApiError::Cancelled)));
    }
}
