//! Infrastructure layer implementations.

pub mod auth;
pub mod http;

pub use auth::{HmacAuthenticator, TOKEN_TTL};
pub use http::HttpTransport;
