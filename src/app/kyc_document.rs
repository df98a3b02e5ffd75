//! KYC Document operations.

use std::sync::Arc;

use tracing::instrument;

use crate::domain::validation::{require_arg, require_uid};
use crate::domain::{ApiRequest, AppError, KycDocument, RizeList, Transport};

use super::{decode, rejected};

#[derive(Clone)]
pub struct KycDocumentService {
    transport: Arc<dyn Transport>,
}

impl KycDocumentService {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Lists KYC documents, optionally for one evaluation.
    #[instrument(skip(self))]
    pub async fn get_list(
        &self,
        evaluation_uid: Option<&str>,
    ) -> Result<RizeList<KycDocument>, AppError> {
        let mut request = ApiRequest::get("/kyc_documents");
        if let Some(evaluation_uid) = evaluation_uid {
            require_arg(evaluation_uid, "evaluationUid").map_err(rejected)?;
            request = request.with_query(vec![(
                "evaluation_uid".to_string(),
                evaluation_uid.to_string(),
            )]);
        }
        decode(self.transport.send(request).await?)
    }

    #[instrument(skip(self))]
    pub async fn get_metadata(&self, uid: &str) -> Result<KycDocument, AppError> {
        require_uid(uid, "KYC Document").map_err(rejected)?;
        decode(
            self.transport
                .send(ApiRequest::get(format!("/kyc_documents/{uid}")))
                .await?,
        )
    }
}
