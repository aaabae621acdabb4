//! The HTTP gateway to the AOS MICEPP backend.
//!
//! `ApiClient` owns the `reqwest` client and the session handle. Every
//! outgoing request passes through [`ApiClient::request`], which attaches
//! `Authorization: Bearer <token>` when the session holds a token and sends
//! the request bare otherwise - a missing token is not an error at this
//! layer, the backend answers 401/403 and callers react to that.
//!
//! Known race, kept on purpose: a response from a superseded call site is
//! not cancelled and can still land after the user has moved on. Whether to
//! cancel superseded requests is a pending product decision.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::Session;

/// Shared handle to the backend.
///
/// Cheap to clone; all clones share one connection pool and one session.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: Url,
    session: Session,
}

impl ApiClient {
    /// Create a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying HTTP client cannot be
    /// built.
    pub fn new(config: &ClientConfig, session: Session) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.api_url.clone(),
                session,
            }),
        })
    }

    /// The session this client authenticates with.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// Build a request for an endpoint path relative to the base URL,
    /// attaching the bearer token when one is held.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Url`] if the path does not join into a valid URL.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.inner.base_url.join(path.trim_start_matches('/'))?;
        let mut builder = self.inner.http.request(method, url);

        if let Some(token) = self.inner.session.token() {
            builder = builder.header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", token.expose_secret()),
            );
        }

        Ok(builder)
    }

    /// Execute a GET request and parse the JSON response.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path)?.send().await?;
        Self::parse_json(response).await
    }

    /// Execute a GET request and return the raw body bytes.
    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.request(Method::GET, path)?.send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Execute a POST request with a JSON body and parse the JSON response.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::POST, path)?.json(body).send().await?;
        Self::parse_json(response).await
    }

    /// Execute a POST request with a JSON body and return the body as text.
    pub(crate) async fn post_text<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<String, ApiError> {
        let response = self.request(Method::POST, path)?.json(body).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.text().await?)
    }

    /// Execute an empty-bodied POST request and parse the JSON response.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.request(Method::POST, path)?.send().await?;
        Self::parse_json(response).await
    }

    /// Execute a PUT request with a JSON body and parse the JSON response.
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::PUT, path)?.json(body).send().await?;
        Self::parse_json(response).await
    }

    /// Execute a PATCH request with a JSON body and parse the JSON response.
    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::PATCH, path)?.json(body).send().await?;
        Self::parse_json(response).await
    }

    /// Execute an empty-bodied PATCH request and parse the JSON response.
    pub(crate) async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.request(Method::PATCH, path)?.send().await?;
        Self::parse_json(response).await
    }

    /// Execute a DELETE request, expecting no meaningful body.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.request(Method::DELETE, path)?.send().await?;
        let status = response.status();
        if status.is_success() || status == StatusCode::NO_CONTENT {
            return Ok(());
        }
        Err(Self::error_from(response).await)
    }

    /// Parse a JSON success body or map the failure.
    async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Pass a success response through, turn anything else into an error.
    async fn check_status(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            return Ok(response);
        }
        Err(Self::error_from(response).await)
    }

    /// Build an [`ApiError`] from a non-success response, carrying the
    /// backend's message when one can be read.
    pub(crate) async fn error_from(response: Response) -> ApiError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .ok()
            .filter(|body| !body.is_empty())
            .unwrap_or_else(|| format!("HTTP {status}"));

        ApiError::Status { status, message }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}
