//! Client facade grouping the resource services.

use std::sync::Arc;

use tracing::info;

use crate::config::RizeConfig;
use crate::domain::{AppError, Transport};
use crate::infra::HttpTransport;

use super::{
    ComplianceWorkflowService, CustomerService, DocumentService, KycDocumentService,
    TransactionService,
};

/// Entry point to the Rize API.
///
/// Every service shares one transport, so the client is cheap to clone and
/// one auth token serves all of them.
#[derive(Clone)]
pub struct RizeClient {
    pub customer: CustomerService,
    pub compliance_workflow: ComplianceWorkflowService,
    pub document: DocumentService,
    pub kyc_document: KycDocumentService,
    pub transaction: TransactionService,
}

impl RizeClient {
    /// Connects to the configured environment with HMAC authentication.
    pub fn new(config: RizeConfig) -> Result<Self, AppError> {
        let transport = HttpTransport::from_config(&config)?;
        info!(
            environment = %config.environment,
            base_url = %config.base_url(),
            timeout = ?config.timeout,
            "Rize client initialized"
        );
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Builds the services on top of any [`Transport`].
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            customer: CustomerService::new(Arc::clone(&transport)),
            compliance_workflow: ComplianceWorkflowService::new(Arc::clone(&transport)),
            document: DocumentService::new(Arc::clone(&transport)),
            kyc_document: KycDocumentService::new(Arc::clone(&transport)),
            transaction: TransactionService::new(transport),
        }
    }
}
