use crate::error::TransportError;
use crate::infra::config::BrowserConfig;
use crate::infra::services::api::{ApiService, BinaryResponse};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;

/// HTTP client for the media server
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_version: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        log::info!(
            "[ApiClient] Creating new API client with base URL: {}",
            base_url
        );

        Ok(Self {
            client,
            base_url,
            api_version: "v1".to_string(),
        })
    }

    pub fn from_config(config: &BrowserConfig) -> Result<Self, TransportError> {
        Self::new(config.server_url.clone(), config.request_timeout())
    }

    /// Build a versioned API URL
    pub fn build_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/api/{}/{}", self.base_url, self.api_version, path)
    }

    /// Build a URL for an unversioned resource such as a static asset
    pub fn build_static_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request and map non-success statuses to errors
    async fn execute_raw(
        &self,
        request: RequestBuilder,
    ) -> Result<Response, TransportError> {
        let response = request.send().await?;
        check_status(response).await
    }
}

/// Pass success responses through, turn anything else into a status error
async fn check_status(response: Response) -> Result<Response, TransportError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(TransportError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn binary_body(response: Response) -> Result<BinaryResponse, TransportError> {
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = response.bytes().await?;

    Ok(BinaryResponse {
        content_type,
        bytes: bytes.to_vec(),
    })
}

#[async_trait]
impl ApiService for ApiClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json_value(
        &self,
        path: &str,
    ) -> Result<serde_json::Value, TransportError> {
        let url = self.build_url(path);
        log::debug!("[ApiClient] GET request to: {}", url);

        let response = self.execute_raw(self.client.get(&url)).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_binary(
        &self,
        path: &str,
    ) -> Result<BinaryResponse, TransportError> {
        let url = self.build_static_url(path);
        log::debug!("[ApiClient] GET binary from: {}", url);

        let response = self.execute_raw(self.client.get(&url)).await?;
        binary_body(response).await
    }
}
