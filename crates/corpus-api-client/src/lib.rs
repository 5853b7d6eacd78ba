//! HTTP client for the Swecha corpus API.
//!
//! Provides a minimal client with generic GET/POST helpers, the domain
//! methods for login, profile and record upload, and the session manager
//! that owns the bearer token between runs. Authenticated helpers take the
//! [`Session`] explicitly; the client itself holds no credentials.

pub mod api;
pub mod session;

use std::time::Duration;

use corpus_core::{ApiError, AppError, ClientConfig};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

pub use api::API_PREFIX;
pub use session::{Session, SessionManager};

/// HTTP client for the corpus API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, AppError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, AppError> {
        Self::new(config.api_url.clone(), config.http_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(
        &self,
        request: reqwest::RequestBuilder,
        session: &Session,
    ) -> reqwest::RequestBuilder {
        request.bearer_auth(session.token())
    }

    /// Authenticated GET. Deserializes the JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        session: &Session,
    ) -> Result<T, AppError> {
        let request = self.apply_auth(self.client.get(self.build_url(path)), session);
        self.send(request).await
    }

    /// Unauthenticated POST with a JSON body.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let request = self.client.post(self.build_url(path)).json(body);
        self.send(request).await
    }

    /// Authenticated POST with an `application/x-www-form-urlencoded` body.
    pub async fn post_form<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        session: &Session,
        form: &B,
    ) -> Result<T, AppError> {
        let request = self.client.post(self.build_url(path)).form(form);
        let request = self.apply_auth(request, session);
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, AppError> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "API request failed");
            let err = ApiError::new(status.as_u16(), body);
            return Err(if status == StatusCode::UNAUTHORIZED {
                AppError::Unauthorized(err)
            } else {
                AppError::Api(err)
            });
        }

        // Some endpoints answer 2xx with an empty body.
        let body = if body.trim().is_empty() { "null" } else { body.as_str() };
        serde_json::from_str(body).map_err(AppError::from)
    }
}
