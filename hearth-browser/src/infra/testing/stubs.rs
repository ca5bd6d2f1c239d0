use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::TransportError;
use crate::infra::services::api::{ApiService, BinaryResponse};

/// A canned response, optionally delivered after a delay
#[derive(Debug, Clone)]
pub struct StubReply<T> {
    pub result: Result<T, TransportError>,
    pub delay: Duration,
}

impl<T> StubReply<T> {
    pub fn ok(value: T) -> Self {
        Self {
            result: Ok(value),
            delay: Duration::ZERO,
        }
    }

    pub fn err(error: TransportError) -> Self {
        Self {
            result: Err(error),
            delay: Duration::ZERO,
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Debug, Default)]
struct InnerStubState {
    json: HashMap<String, StubReply<serde_json::Value>>,
    binary: HashMap<String, StubReply<BinaryResponse>>,
    calls: Vec<String>,
}

/// [`ApiService`] that answers from a table of scripted replies.
///
/// Unknown paths answer with a 404 status error.
#[derive(Debug, Clone)]
pub struct StubApiService {
    inner: Arc<Mutex<InnerStubState>>,
    base_url: Arc<str>,
}

impl Default for StubApiService {
    fn default() -> Self {
        Self::new("http://localhost:8000")
    }
}

impl StubApiService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(InnerStubState::default())),
            base_url: Arc::from(base_url.into()),
        }
    }

    pub fn with_json(
        self,
        path: impl Into<String>,
        reply: StubReply<serde_json::Value>,
    ) -> Self {
        self.inner.lock().json.insert(path.into(), reply);
        self
    }

    pub fn with_binary(
        self,
        path: impl Into<String>,
        reply: StubReply<BinaryResponse>,
    ) -> Self {
        self.inner.lock().binary.insert(path.into(), reply);
        self
    }

    /// Every path requested so far, in request order
    pub fn calls(&self) -> Vec<String> {
        self.inner.lock().calls.clone()
    }

    pub fn call_count(&self, path: &str) -> usize {
        self.inner.lock().calls.iter().filter(|p| *p == path).count()
    }

    fn not_found(path: &str) -> TransportError {
        TransportError::Status {
            status: 404,
            body: format!("no stub registered for {path}"),
        }
    }
}

#[async_trait]
impl ApiService for StubApiService {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json_value(
        &self,
        path: &str,
    ) -> Result<serde_json::Value, TransportError> {
        let reply = {
            let mut guard = self.inner.lock();
            guard.calls.push(path.to_string());
            guard.json.get(path).cloned()
        };
        let Some(reply) = reply else {
            return Err(Self::not_found(path));
        };
        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply.result
    }

    async fn get_binary(
        &self,
        path: &str,
    ) -> Result<BinaryResponse, TransportError> {
        let reply = {
            let mut guard = self.inner.lock();
            guard.calls.push(path.to_string());
            guard.binary.get(path).cloned()
        };
        let Some(reply) = reply else {
            return Err(Self::not_found(path));
        };
        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply.result
    }
}
