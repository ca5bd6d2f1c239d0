//! Error types for the browser core
//!
//! Transport failures come out of the [`ApiService`](crate::infra::services::api::ApiService)
//! seam; the loaders translate them into the fail-soft [`LoadError`]
//! taxonomy that the coordinator records but never surfaces to the view.

use thiserror::Error;

/// Failure talking to the media server
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request could not be sent or the connection failed
    #[error("Request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status
    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The body could not be read or parsed
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() || err.is_body() {
            TransportError::Decode(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Decode(err.to_string())
    }
}

/// Loader failures, all of which degrade a single region of the view
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Banner unavailable: {0}")]
    BannerUnavailable(String),

    #[error("Invalid banner format: {0}")]
    InvalidBannerFormat(String),
}
