//! reqwest-backed [`Transport`] for the Rize REST API.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use crate::config::RizeConfig;
use crate::domain::{
    ApiRequest, AppError, ExternalServiceError, HttpMethod, TokenProvider, Transport,
};

use super::auth::HmacAuthenticator;

/// Sends requests with the bearer token from a [`TokenProvider`].
pub struct HttpTransport {
    http_client: Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl HttpTransport {
    pub fn new(http_client: Client, base_url: &str, tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// Builds the shared HTTP client and an [`HmacAuthenticator`] from config.
    pub fn from_config(config: &RizeConfig) -> Result<Self, AppError> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                AppError::ExternalService(ExternalServiceError::Configuration(format!(
                    "failed to build HTTP client: {e}"
                )))
            })?;

        let base_url = config.base_url();
        let tokens = Arc::new(HmacAuthenticator::new(
            http_client.clone(),
            &base_url,
            config.program_uid.clone(),
            config.hmac.clone(),
        ));

        Ok(Self::new(http_client, &base_url, tokens))
    }

    fn method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    fn map_send_error(e: reqwest::Error) -> AppError {
        if e.is_timeout() {
            AppError::ExternalService(ExternalServiceError::Timeout(e.to_string()))
        } else {
            AppError::ExternalService(ExternalServiceError::Network(e.to_string()))
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn send(&self, request: ApiRequest) -> Result<Value, AppError> {
        let token = self.tokens.token().await?;
        let url = format!("{}{}", self.base_url, request.path);

        debug!(url = %url, query_len = request.query.len(), "Sending Rize API request");

        let mut builder = self
            .http_client
            .request(Self::method(request.method), &url)
            .header(reqwest::header::AUTHORIZATION, token.expose_secret())
            .header(reqwest::header::ACCEPT, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            error!(error = %e, "Rize API request failed");
            Self::map_send_error(e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!(error = %e, "Failed to read Rize API response");
            Self::map_send_error(e)
        })?;

        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                warn!("Rize API rejected token, invalidating credential");
                self.tokens.invalidate(&token).await;
            }
            error!(status = %status, body = %body, "Rize API returned error");
            return Err(AppError::ExternalService(ExternalServiceError::ApiError {
                status_code: status.as_u16(),
                message: body,
            }));
        }

        debug!(status = %status, "Rize API request complete");

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "Failed to parse Rize API response");
            AppError::ExternalService(ExternalServiceError::ParseError(e.to_string()))
        })
    }
}
