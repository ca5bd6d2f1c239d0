//! API service trait
//!
//! The loaders only see this trait, so the coordinator can be driven by the
//! real [`ApiClient`](crate::infra::api_client::ApiClient) or by the stubs
//! in [`testing`](crate::infra::testing).

use crate::error::TransportError;
use async_trait::async_trait;
use std::fmt::Debug;

/// Raw body of a binary GET together with its declared content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryResponse {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl BinaryResponse {
    pub fn new(content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            content_type: Some(content_type.into()),
            bytes,
        }
    }
}

#[async_trait]
pub trait ApiService: Send + Sync + Debug {
    /// Server root, for diagnostics
    fn base_url(&self) -> &str;

    /// GET a versioned API path (`<base>/api/v1/<path>`) and parse the body as JSON
    async fn get_json_value(
        &self,
        path: &str,
    ) -> Result<serde_json::Value, TransportError>;

    /// GET an unversioned path (static assets) and return the raw body
    async fn get_binary(
        &self,
        path: &str,
    ) -> Result<BinaryResponse, TransportError>;
}
