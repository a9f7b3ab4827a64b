//! HTTP client for the external to-do API.
//!
//! Seven endpoints, all JSON over HTTP, authenticated where required by
//! `Authorization: Bearer <token>`. There is deliberately no retry,
//! timeout, or caching layer here: a failed request surfaces a single
//! message string for the UI to show inline.

use anyhow::{Context, Result};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::types::{
    AuthResponse, LoginRequest, MeResponse, SignupRequest, Todo, TodoDraft, TodoUpdate, User,
};

/// Hosted test deployment of the API; the default `api_base_url`.
pub const DEFAULT_BASE_URL: &str = "https://auth-test-api-test.vercel.app/api";

/// API client.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a new client for the given base URL (trailing slash ignored).
    ///
    /// # Panics
    /// - In test builds (`#[cfg(test)]`), panics if `base_url` is the hosted API.
    /// - At runtime, panics if `TUDU_BLOCK_REAL_API=1` and `base_url` is the hosted API.
    ///
    /// This prevents tests from accidentally making real network requests.
    /// Point the client at a mock server (e.g. wiremock) instead.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        #[cfg(test)]
        if base_url == DEFAULT_BASE_URL {
            panic!(
                "Tests must not use the hosted to-do API!\n\
                 Set TUDU_API_URL to a mock server (e.g., wiremock).\n\
                 Found base_url: {base_url}"
            );
        }

        #[cfg(not(test))]
        if std::env::var("TUDU_BLOCK_REAL_API").is_ok_and(|v| v == "1")
            && base_url == DEFAULT_BASE_URL
        {
            panic!(
                "TUDU_BLOCK_REAL_API=1 but trying to use the hosted to-do API!\n\
                 Set TUDU_API_URL to a mock server.\n\
                 Found base_url: {base_url}"
            );
        }

        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Creates a client from loaded configuration (honors `TUDU_API_URL`).
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_base_url())
    }

    /// The base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /auth/login`.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        tracing::debug!("POST /auth/login");
        let resp = self
            .http
            .post(self.url("/auth/login"))
            .json(&LoginRequest { email, password })
            .send()
            .await
            .context("Failed to reach the API")?;
        read_json(resp, "Login failed").await
    }

    /// `POST /auth/signup`.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<AuthResponse> {
        tracing::debug!("POST /auth/signup");
        let resp = self
            .http
            .post(self.url("/auth/signup"))
            .json(&SignupRequest {
                email,
                password,
                name,
            })
            .send()
            .await
            .context("Failed to reach the API")?;
        read_json(resp, "Signup failed").await
    }

    /// `GET /auth/me`. Any failure means the token is not (or no longer) valid.
    pub async fn current_user(&self, token: &str) -> Result<User> {
        tracing::debug!("GET /auth/me");
        let resp = self
            .bearer(self.http.get(self.url("/auth/me")), token)
            .send()
            .await
            .context("Failed to reach the API")?;
        let me: MeResponse = read_json(resp, "Failed to get user data").await?;
        Ok(me.user)
    }

    /// `GET /todos`.
    pub async fn list_todos(&self, token: &str) -> Result<Vec<Todo>> {
        tracing::debug!("GET /todos");
        let resp = self
            .bearer(self.http.get(self.url("/todos")), token)
            .send()
            .await
            .context("Failed to reach the API")?;
        read_json(resp, "Failed to fetch todos").await
    }

    /// `POST /todos`.
    pub async fn create_todo(&self, token: &str, title: &str, description: &str) -> Result<Todo> {
        tracing::debug!("POST /todos");
        let resp = self
            .bearer(self.http.post(self.url("/todos")), token)
            .json(&TodoDraft { title, description })
            .send()
            .await
            .context("Failed to reach the API")?;
        read_json(resp, "Failed to add todo").await
    }

    /// `PUT /todos/:id`.
    pub async fn update_todo(
        &self,
        token: &str,
        id: &str,
        title: &str,
        description: &str,
        completed: bool,
    ) -> Result<Todo> {
        tracing::debug!(%id, "PUT /todos/:id");
        let resp = self
            .bearer(self.http.put(self.url(&format!("/todos/{id}"))), token)
            .json(&TodoUpdate {
                title,
                description,
                completed,
            })
            .send()
            .await
            .context("Failed to reach the API")?;
        read_json(resp, "Failed to update todo").await
    }

    /// `DELETE /todos/:id`.
    pub async fn delete_todo(&self, token: &str, id: &str) -> Result<()> {
        tracing::debug!(%id, "DELETE /todos/:id");
        let resp = self
            .bearer(self.http.delete(self.url(&format!("/todos/{id}"))), token)
            .send()
            .await
            .context("Failed to reach the API")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(%status, "delete todo failed");
            anyhow::bail!(error_message(&body, "Failed to delete todo"));
        }
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn bearer(&self, builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"))
    }
}

/// Decodes a JSON response body, turning non-2xx statuses into the
/// message the UI should show.
async fn read_json<T: DeserializeOwned>(resp: Response, fallback: &str) -> Result<T> {
    let status: StatusCode = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        tracing::warn!(%status, "API request failed");
        anyhow::bail!(error_message(&body, fallback));
    }

    resp.json::<T>()
        .await
        .context("Failed to decode API response")
}

/// Extracts the message from an API error payload when present.
///
/// The API reports errors as `{"error": "..."}` on auth endpoints and
/// `{"message": "..."}` on todo endpoints; both are accepted anywhere.
fn error_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["error", "message"].into_iter().find_map(|key| {
                v.get(key)
                    .and_then(serde_json::Value::as_str)
                    .map(String::from)
            })
        })
        .unwrap_or_else(|| fallback.to_string())
}
