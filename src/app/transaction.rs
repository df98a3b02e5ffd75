//! Transactions and their settlement records.
//!
//! A Transaction moves funds between Synthetic Accounts. Each is backed by
//! Transaction Events between Custodial Accounts, which in turn produce
//! Synthetic and Custodial Line Items.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::domain::validation::require_uid;
use crate::domain::{
    ApiRequest, AppError, CustodialLineItem, CustodialLineItemListQuery, ListQuery, RizeList,
    SyntheticLineItem, SyntheticLineItemListQuery, Transaction, TransactionEvent,
    TransactionEventListQuery, TransactionListQuery, Transport,
};

use super::{decode, log_rejection, rejected};

/// `/transactions`, `/transaction_events`, `/synthetic_line_items` and
/// `/custodial_line_items` endpoints
#[derive(Clone)]
pub struct TransactionService {
    transport: Arc<dyn Transport>,
}

impl TransactionService {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        collection: &str,
        resource: &'static str,
        uid: &str,
    ) -> Result<T, AppError> {
        require_uid(uid, resource).map_err(rejected)?;
        decode(
            self.transport
                .send(ApiRequest::get(format!("/{collection}/{uid}")))
                .await?,
        )
    }

    async fn fetch_list<T, Q>(&self, collection: &str, query: &Q) -> Result<RizeList<T>, AppError>
    where
        T: DeserializeOwned,
        Q: ListQuery,
    {
        let pairs = query.to_query_pairs().map_err(log_rejection)?;
        let list: RizeList<T> = decode(
            self.transport
                .send(ApiRequest::get(format!("/{collection}")).with_query(pairs))
                .await?,
        )?;
        debug!(
            collection = collection,
            count = list.count,
            total = list.total_count,
            "List retrieved"
        );
        Ok(list)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, uid: &str) -> Result<Transaction, AppError> {
        self.fetch("transactions", "Transaction", uid).await
    }

    #[instrument(skip(self, query))]
    pub async fn get_list(
        &self,
        query: &TransactionListQuery,
    ) -> Result<RizeList<Transaction>, AppError> {
        self.fetch_list("transactions", query).await
    }

    #[instrument(skip(self))]
    pub async fn get_transaction_event(&self, uid: &str) -> Result<TransactionEvent, AppError> {
        self.fetch("transaction_events", "Transaction Event", uid)
            .await
    }

    #[instrument(skip(self, query))]
    pub async fn get_transaction_event_list(
        &self,
        query: &TransactionEventListQuery,
    ) -> Result<RizeList<TransactionEvent>, AppError> {
        self.fetch_list("transaction_events", query).await
    }

    #[instrument(skip(self))]
    pub async fn get_synthetic_line_item(&self, uid: &str) -> Result<SyntheticLineItem, AppError> {
        self.fetch("synthetic_line_items", "Synthetic Line Item", uid)
            .await
    }

    #[instrument(skip(self, query))]
    pub async fn get_synthetic_line_item_list(
        &self,
        query: &SyntheticLineItemListQuery,
    ) -> Result<RizeList<SyntheticLineItem>, AppError> {
        self.fetch_list("synthetic_line_items", query).await
    }

    #[instrument(skip(self))]
    pub async fn get_custodial_line_item(&self, uid: &str) -> Result<CustodialLineItem, AppError> {
        self.fetch("custodial_line_items", "Custodial Line Item", uid)
            .await
    }

    #[instrument(skip(self, query))]
    pub async fn get_custodial_line_item_list(
        &self,
        query: &CustodialLineItemListQuery,
    ) -> Result<RizeList<CustodialLineItem>, AppError> {
        self.fetch_list("custodial_line_items", query).await
    }
}
