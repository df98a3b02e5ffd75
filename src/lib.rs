//! Typed client for the Rize banking-as-a-service API.
//!
//! Every service method validates its arguments before any network I/O and
//! returns a field-addressed [`domain::ValidationError`] on bad input.
//!
//! ```rust,no_run
//! # use rize_client::{RizeClient, RizeConfig, domain::AppError};
//! # async fn run() -> Result<(), AppError> {
//! let client = RizeClient::new(RizeConfig::from_env()?)?;
//! let customer = client.customer.get("h9MzupcjtA3LPW2e").await?;
//! println!("{}", customer.uid);
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod config;
pub mod domain;
pub mod infra;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use app::RizeClient;
pub use config::{Environment, RizeConfig};
