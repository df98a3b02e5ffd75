//! Client configuration.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::domain::ConfigError;

/// Default request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 80_000;

/// Rize deployment the client talks to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Sandbox,
    Integration,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Integration => "integration",
            Self::Production => "production",
        }
    }

    /// API root for this environment, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("https://{}.rizefs.com/api/v1", self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sandbox" => Ok(Self::Sandbox),
            "integration" => Ok(Self::Integration),
            "production" => Ok(Self::Production),
            _ => Err(ConfigError::InvalidEnvironment(s.to_string())),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Credentials and connection settings for a [`crate::RizeClient`].
#[derive(Debug, Clone)]
pub struct RizeConfig {
    pub program_uid: String,
    pub hmac: SecretString,
    pub environment: Environment,
    pub timeout: Duration,
    base_url: Option<String>,
}

impl RizeConfig {
    /// Creates a sandbox configuration with the default timeout.
    pub fn new(program_uid: impl Into<String>, hmac: SecretString) -> Result<Self, ConfigError> {
        let program_uid = program_uid.into();
        if program_uid.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "program_uid",
                reason: "must not be empty".to_string(),
            });
        }
        if hmac.expose_secret().trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "hmac",
                reason: "must not be empty".to_string(),
            });
        }

        Ok(Self {
            program_uid,
            hmac,
            environment: Environment::default(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            base_url: None,
        })
    }

    /// Reads `RIZE_PROGRAM_ID`, `RIZE_HMAC`, `RIZE_ENVIRONMENT` and
    /// `RIZE_TIMEOUT_MS`. The last two are optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        let program_uid =
            env::var("RIZE_PROGRAM_ID").map_err(|_| ConfigError::MissingVariable("RIZE_PROGRAM_ID"))?;
        let hmac = env::var("RIZE_HMAC").map_err(|_| ConfigError::MissingVariable("RIZE_HMAC"))?;

        let mut config = Self::new(program_uid, SecretString::from(hmac))?;

        if let Some(environment) = env::var("RIZE_ENVIRONMENT").ok().filter(|v| !v.is_empty()) {
            config.environment = environment.parse()?;
        }

        if let Some(timeout) = env::var("RIZE_TIMEOUT_MS").ok().filter(|v| !v.is_empty()) {
            let millis = timeout
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidValue {
                    name: "RIZE_TIMEOUT_MS",
                    reason: e.to_string(),
                })?;
            config.timeout = Duration::from_millis(millis);
        }

        Ok(config)
    }

    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Points the client at a custom API root, e.g. a local mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    #[must_use]
    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| self.environment.base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RizeConfig {
        RizeConfig::new("program_uid", SecretString::from("hmac")).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = config();
        assert_eq!(config.environment, Environment::Sandbox);
        assert_eq!(config.timeout, Duration::from_millis(80_000));
        assert_eq!(config.base_url(), "https://sandbox.rizefs.com/api/v1");
    }

    #[test]
    fn test_environment_base_urls() {
        assert_eq!(
            config()
                .with_environment(Environment::Integration)
                .base_url(),
            "https://integration.rizefs.com/api/v1"
        );
        assert_eq!(
            Environment::Production.base_url(),
            "https://production.rizefs.com/api/v1"
        );
    }

    #[test]
    fn test_base_url_override_trims_slash() {
        let config = config().with_base_url("http://127.0.0.1:8080/");
        assert_eq!(config.base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_environment_from_str() {
        assert_eq!("sandbox".parse::<Environment>(), Ok(Environment::Sandbox));
        assert_eq!(
            "PRODUCTION".parse::<Environment>(),
            Ok(Environment::Production)
        );
        let err = "staging".parse::<Environment>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"staging\" is not a Rize environment. Accepted values are: sandbox | integration | production"
        );
    }

    #[test]
    fn test_empty_credentials_rejected() {
        assert!(RizeConfig::new("", SecretString::from("hmac")).is_err());
        assert!(RizeConfig::new("program", SecretString::from("  ")).is_err());
    }
}
