//! Users API client example
//!
//! Builds a small typed client on top of `ApiClient` and calls a users API.
//!
//! Run with: cargo run --example users_client
//!
//! `API_HOST`, `API_PORT` and `API_TOKEN` point it at a server.

use anyapi_client::{
    ApiClient, ApiOptions, ApiResponse, Capability, FormField, QueryParam, Request, RouteSlot,
    StaticToken,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Deserialize)]
struct User {
    id: u64,
    name: String,
}

#[derive(Serialize)]
struct UserBody {
    name: String,
    email: Option<String>,
}

struct GetUser {
    id: u64,
}

impl Request for GetUser {
    fn route(&self) -> &str {
        "users/{0}"
    }

    fn capability(&self) -> anyapi_client::Result<Capability> {
        Ok(Capability::Get)
    }

    fn route_slots(&self) -> Vec<RouteSlot> {
        vec![RouteSlot::new(0, self.id)]
    }
}

struct ListUsers {
    search: Option<String>,
    page: u32,
}

impl Request for ListUsers {
    fn route(&self) -> &str {
        "users"
    }

    fn capability(&self) -> anyapi_client::Result<Capability> {
        Ok(Capability::Get)
    }

    fn query_params(&self) -> Vec<QueryParam> {
        vec![
            QueryParam::new("search", self.search.as_deref()),
            QueryParam::value("page", self.page),
        ]
    }
}

struct UpdateUser {
    id: u64,
    body: UserBody,
}

impl Request for UpdateUser {
    fn route(&self) -> &str {
        "users/{0}"
    }

    fn capability(&self) -> anyapi_client::Result<Capability> {
        Capability::put(&self.body)
    }

    fn route_slots(&self) -> Vec<RouteSlot> {
        vec![RouteSlot::new(0, self.id)]
    }
}

struct UploadAvatar {
    id: u64,
    path: PathBuf,
}

impl Request for UploadAvatar {
    fn route(&self) -> &str {
        "users/{0}/avatar"
    }

    fn capability(&self) -> anyapi_client::Result<Capability> {
        Ok(Capability::PostForm(vec![
            FormField::text("userId", self.id),
            FormField::file("avatar", &self.path),
        ]))
    }

    fn route_slots(&self) -> Vec<RouteSlot> {
        vec![RouteSlot::new(0, self.id)]
    }
}

/// Typed client for the users API.
struct UsersClient {
    api: ApiClient,
}

impl UsersClient {
    fn new(options: ApiOptions, token: String) -> anyapi_client::Result<Self> {
        let api = ApiClient::with_token_provider(options, Arc::new(StaticToken::new(token)))?;
        Ok(UsersClient { api })
    }

    async fn user(
        &self,
        id: u64,
        cancel: &CancellationToken,
    ) -> anyapi_client::Result<Option<User>> {
        let response = self.api.get_as::<_, User>(&GetUser { id }, cancel).await?;
        Ok(response.and_then(ApiResponse::json))
    }

    async fn list(
        &self,
        search: Option<&str>,
        cancel: &CancellationToken,
    ) -> anyapi_client::Result<Vec<User>> {
        let request = ListUsers {
            search: search.map(str::to_string),
            page: 1,
        };
        let response = self.api.get_as::<_, Vec<User>>(&request, cancel).await?;
        Ok(response.and_then(ApiResponse::json).unwrap_or_default())
    }

    async fn rename(
        &self,
        id: u64,
        name: &str,
        cancel: &CancellationToken,
    ) -> anyapi_client::Result<()> {
        let request = UpdateUser {
            id,
            body: UserBody {
                name: name.to_string(),
                email: None,
            },
        };
        self.api.put(&request, cancel).await
    }

    async fn upload_avatar(
        &self,
        id: u64,
        path: PathBuf,
        cancel: &CancellationToken,
    ) -> anyapi_client::Result<()> {
        self.api.post_form(&UploadAvatar { id, path }, cancel).await
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("anyapi_client=debug")
        .init();

    let host = std::env::var("API_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = std::env::var("API_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let token = std::env::var("API_TOKEN").unwrap_or_default();

    println!("Users Client Example");
    println!("====================\n");
    println!("Talking to http://{}:{}/api", host, port);

    let options = ApiOptions::new(host, port)
        .with_root("api")
        .with_expose_errors(true)
        .with_timeout_seconds(10);
    let client = UsersClient::new(options, token)?;
    let cancel = CancellationToken::new();

    match client.user(1, &cancel).await? {
        Some(user) => println!("User 1: {} ({})", user.name, user.id),
        None => println!("User 1 not found"),
    }

    let users = client.list(Some("bob"), &cancel).await?;
    println!("Found {} users matching 'bob'", users.len());

    if let Err(e) = client.rename(1, "Robert", &cancel).await {
        println!("Rename failed: {}", e);
        for failure in e.failures() {
            println!("  - {}", failure);
        }
    }

    if let Some(path) = std::env::args().nth(1) {
        client.upload_avatar(1, PathBuf::from(path), &cancel).await?;
        println!("Avatar uploaded");
    }

    Ok(())
}
