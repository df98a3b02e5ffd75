//! Application layer: the client facade and one service object per resource.

pub mod client;
pub mod compliance_workflow;
pub mod customer;
pub mod document;
pub mod kyc_document;
pub mod transaction;

pub use client::RizeClient;
pub use compliance_workflow::ComplianceWorkflowService;
pub use customer::CustomerService;
pub use document::DocumentService;
pub use kyc_document::KycDocumentService;
pub use transaction::TransactionService;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, warn};

use crate::domain::{AppError, ExternalServiceError, ValidationError};

/// Logs a validation failure and lifts it into [`AppError`].
pub(crate) fn rejected(e: ValidationError) -> AppError {
    warn!(error = %e, "Request rejected by validation");
    AppError::Validation(e)
}

/// Query validation already returns [`AppError`]; only log it.
pub(crate) fn log_rejection(e: AppError) -> AppError {
    if let Some(v) = e.as_validation() {
        warn!(error = %v, "Request rejected by validation");
    }
    e
}

/// Deserializes a response body into its documented record.
pub(crate) fn decode<T: DeserializeOwned>(body: Value) -> Result<T, AppError> {
    serde_json::from_value(body).map_err(|e| {
        error!(error = %e, "Rize API response did not match the expected shape");
        AppError::ExternalService(ExternalServiceError::ParseError(e.to_string()))
    })
}

/// Serializes a request payload for validation and sending.
pub(crate) fn encode<T: serde::Serialize + ?Sized>(payload: &T) -> Result<Value, AppError> {
    serde_json::to_value(payload).map_err(|e| AppError::Serialization(e.to_string()))
}
