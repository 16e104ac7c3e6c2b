//! HTTP client abstraction.
//!
//! Providers depend on [`HttpClient`] rather than `reqwest` directly so tests
//! can substitute an in-process double.

use async_trait::async_trait;

use crate::errors::ProviderError;

/// HTTP response from a fetch operation.
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
    /// Content-Type header value.
    pub content_type: Option<String>,
}

/// HTTP client for the network-facing providers.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a GET request and return the response.
    async fn get(&self, url: &str) -> Result<HttpResponse, ProviderError>;

    /// Perform a POST request with a JSON body.
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, ProviderError>;
}

/// HTTP client backed by `reqwest`.
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Create a new HTTP client with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .user_agent("pinboard/1.0")
                .build()
                .unwrap_or_default(),
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

async fn into_response(response: reqwest::Response) -> Result<HttpResponse, ProviderError> {
    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::Http(format!("failed to read response body: {e}")))?;

    Ok(HttpResponse {
        status,
        body,
        content_type,
    })
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, ProviderError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::Http(format!("HTTP request failed: {e}")))?;
        into_response(response).await
    }

    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, ProviderError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::Http(format!("HTTP request failed: {e}")))?;
        into_response(response).await
    }
}
