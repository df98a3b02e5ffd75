//! Statement Document operations.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::validation::require_uid;
use crate::domain::{
    ApiRequest, AppError, Document, DocumentListQuery, ListQuery, RizeList, Transport,
};

use super::{decode, log_rejection, rejected};

/// `/documents` endpoints
#[derive(Clone)]
pub struct DocumentService {
    transport: Arc<dyn Transport>,
}

impl DocumentService {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    #[instrument(skip(self))]
    pub async fn get(&self, uid: &str) -> Result<Document, AppError> {
        require_uid(uid, "Document").map_err(rejected)?;
        decode(
            self.transport
                .send(ApiRequest::get(format!("/documents/{uid}")))
                .await?,
        )
    }

    #[instrument(skip(self, query))]
    pub async fn get_list(&self, query: &DocumentListQuery) -> Result<RizeList<Document>, AppError> {
        let pairs = query.to_query_pairs().map_err(log_rejection)?;
        let list: RizeList<Document> = decode(
            self.transport
                .send(ApiRequest::get("/documents").with_query(pairs))
                .await?,
        )?;
        debug!(count = list.count, "Document list retrieved");
        Ok(list)
    }
}
