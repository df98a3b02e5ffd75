//! HMAC token exchange against the Rize `/auth` endpoint.
//!
//! A short JWS signed with the program HMAC is traded for a bearer token,
//! which is then reused until it is close to expiry.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, error, instrument};

use crate::domain::{AppError, ExternalServiceError, TokenProvider};

/// Issued tokens live 24 hours; refresh an hour early.
pub const TOKEN_TTL: Duration = Duration::from_secs(23 * 60 * 60);

#[derive(Debug, Serialize, Deserialize)]
struct AuthClaims {
    sub: String,
    iat: i64,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: Option<String>,
}

struct CachedToken {
    token: SecretString,
    issued_at: Instant,
}

/// Exchanges the program HMAC for API tokens
pub struct HmacAuthenticator {
    http_client: Client,
    auth_url: String,
    program_uid: String,
    hmac: SecretString,
    token_ttl: Duration,
    cached: Mutex<Option<CachedToken>>,
}

impl HmacAuthenticator {
    pub fn new(
        http_client: Client,
        base_url: &str,
        program_uid: impl Into<String>,
        hmac: SecretString,
    ) -> Self {
        Self {
            http_client,
            auth_url: format!("{}/auth", base_url.trim_end_matches('/')),
            program_uid: program_uid.into(),
            hmac,
            token_ttl: TOKEN_TTL,
            cached: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    /// Signs `{ sub: program_uid, iat: now }` with HS512.
    pub fn sign_request_jws(&self) -> Result<String, AppError> {
        let claims = AuthClaims {
            sub: self.program_uid.clone(),
            iat: Utc::now().timestamp(),
        };
        let key = EncodingKey::from_secret(self.hmac.expose_secret().as_bytes());

        encode(&Header::new(Algorithm::HS512), &claims, &key)
            .map_err(|e| AppError::Authentication(format!("failed to sign request: {e}")))
    }

    async fn request_token(&self) -> Result<SecretString, AppError> {
        let jws = self.sign_request_jws()?;

        debug!(url = %self.auth_url, "Requesting Rize API token");

        let response = self
            .http_client
            .post(&self.auth_url)
            .header(reqwest::header::AUTHORIZATION, jws)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Rize auth request failed");
                if e.is_timeout() {
                    AppError::ExternalService(ExternalServiceError::Timeout(e.to_string()))
                } else {
                    AppError::ExternalService(ExternalServiceError::Network(e.to_string()))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Rize auth returned error");
            return Err(AppError::Authentication(format!(
                "{} {}",
                status.as_u16(),
                body
            )));
        }

        let auth: AuthResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to parse Rize auth response");
            AppError::ExternalService(ExternalServiceError::ParseError(e.to_string()))
        })?;

        auth.token
            .filter(|t| !t.is_empty())
            .map(SecretString::from)
            .ok_or_else(|| AppError::Authentication("response contained no token".to_string()))
    }
}

#[async_trait]
impl TokenProvider for HmacAuthenticator {
    #[instrument(skip(self), fields(program_uid = %self.program_uid))]
    async fn token(&self) -> Result<SecretString, AppError> {
        let mut cached = self.cached.lock().await;

        if let Some(entry) = cached
            .as_ref()
            .filter(|entry| entry.issued_at.elapsed() < self.token_ttl)
        {
            return Ok(entry.token.clone());
        }

        let token = self.request_token().await?;
        *cached = Some(CachedToken {
            token: token.clone(),
            issued_at: Instant::now(),
        });
        debug!("Rize API token refreshed");
        Ok(token)
    }

    async fn invalidate(&self, rejected: &SecretString) {
        let mut cached = self.cached.lock().await;
        if cached
            .as_ref()
            .is_some_and(|entry| entry.token.expose_secret() == rejected.expose_secret())
        {
            cached.take();
            debug!("Rize API token invalidated");
        }
    }
}
