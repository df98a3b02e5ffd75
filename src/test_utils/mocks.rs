//! Mock implementations for testing.

use async_trait::async_trait;
use secrecy::SecretString;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::{
    ApiRequest, AppError, ExternalServiceError, HttpMethod, TokenProvider, Transport,
};

/// Configuration for mock behavior
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    pub should_fail: bool,
    pub status_code: Option<u16>,
    pub error_message: Option<String>,
}

impl MockConfig {
    #[must_use]
    pub fn success() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failure(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            should_fail: true,
            status_code: Some(status_code),
            error_message: Some(message.into()),
        }
    }
}

/// Mock transport that records every request and replays canned JSON per route
pub struct MockTransport {
    routes: Mutex<HashMap<(HttpMethod, String), Value>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
    config: MockConfig,
}

impl MockTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MockConfig::success())
    }

    #[must_use]
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            routes: Mutex::new(HashMap::new()),
            requests: Arc::new(Mutex::new(Vec::new())),
            config,
        }
    }

    #[must_use]
    pub fn failing(status_code: u16, message: impl Into<String>) -> Self {
        Self::with_config(MockConfig::failure(status_code, message))
    }

    /// Registers the JSON returned for `method path`.
    #[must_use]
    pub fn with_response(self, method: HttpMethod, path: impl Into<String>, body: Value) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert((method, path.into()), body);
        self
    }

    /// All requests received so far, in order
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, AppError> {
        let key = (request.method, request.path.clone());
        self.requests.lock().unwrap().push(request);

        if self.config.should_fail {
            return Err(AppError::ExternalService(ExternalServiceError::ApiError {
                status_code: self.config.status_code.unwrap_or(500),
                message: self
                    .config
                    .error_message
                    .clone()
                    .unwrap_or_else(|| "Mock error".to_string()),
            }));
        }

        self.routes
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or_else(|| {
                AppError::ExternalService(ExternalServiceError::ApiError {
                    status_code: 404,
                    message: format!("no mock response for {} {}", key.0, key.1),
                })
            })
    }
}

/// Token provider returning a fixed token and counting calls
pub struct StaticTokenProvider {
    token: String,
    calls: AtomicUsize,
    invalidations: AtomicUsize,
}

impl StaticTokenProvider {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            calls: AtomicUsize::new(0),
            invalidations: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    pub fn invalidations(&self) -> usize {
        self.invalidations.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn token(&self) -> Result<SecretString, AppError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(SecretString::from(self.token.clone()))
    }

    async fn invalidate(&self, _rejected: &SecretString) {
        self.invalidations.fetch_add(1, Ordering::Relaxed);
    }
}
