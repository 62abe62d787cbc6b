//! Marketplace API client.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::debug;

use crate::session::AccessToken;

/// Errors talking to the marketplace API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response.
    #[error("request failed with status {status}: {message}")]
    Status {
        /// HTTP status.
        status: StatusCode,

        /// Error text from the response body.
        message: String,
    },

    /// Response body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Connection settings for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL, e.g. `"https://api.example.com"`.
    pub base_url: String,

    /// Bearer token.
    pub token: AccessToken,

    /// Per-request timeout.
    pub timeout: Duration,
}

/// Authenticated JSON client for the marketplace API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    token: AccessToken,
    http: Client,
}

impl ApiClient {
    /// Build a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: ApiClientConfig) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token,
            http,
        })
    }

    /// `GET` a JSON resource.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status or an
    /// unexpected body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let text = self.send(self.request(Method::GET, path)).await?;

        Ok(serde_json::from_str(&text)?)
    }

    /// `POST` a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status or an
    /// unexpected body.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let text = self.send(self.request(Method::POST, path).json(body)).await?;

        Ok(serde_json::from_str(&text)?)
    }

    /// `PUT` a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status or an
    /// unexpected body.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let text = self.send(self.request(Method::PUT, path).json(body)).await?;

        Ok(serde_json::from_str(&text)?)
    }

    /// `DELETE` a resource, ignoring any response body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, path)).await?;

        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        debug!(%method, %url, "api request");

        self.http
            .request(method, url)
            .bearer_auth(self.token.expose())
    }

    async fn send(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(ApiError::Status {
                status,
                message: error_message(status, &text),
            });
        }

        Ok(response.text().await?)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Extract the flat `{error}` or `{message}` text of an error body, falling
/// back to the raw text and then the status reason.
fn error_message(status: StatusCode, text: &str) -> String {
    let from_body = serde_json::from_str::<ErrorBody>(text)
        .ok()
        .and_then(|body| body.error.or(body.message))
        .filter(|message| !message.trim().is_empty());

    if let Some(message) = from_body {
        return message;
    }

    if !text.trim().is_empty() {
        return text.trim().to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
}
