//! Customer operations.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::{debug, info, instrument};

use crate::domain::validation::{
    require_arg, require_email, require_uid, validate_customer_details, validate_optional_email,
};
use crate::domain::{
    ApiRequest, AppError, Customer, CustomerListQuery, CustomerType, ListQuery, RizeList,
    Transport,
};

use super::{decode, encode, log_rejection, rejected};

const RESOURCE: &str = "Customer";

/// `/customers` endpoints
#[derive(Clone)]
pub struct CustomerService {
    transport: Arc<dyn Transport>,
}

impl CustomerService {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Creates a new Customer in the Program.
    #[instrument(skip(self, email))]
    pub async fn create(
        &self,
        customer_type: CustomerType,
        external_uid: Option<&str>,
        email: &str,
    ) -> Result<Customer, AppError> {
        if let Some(external_uid) = external_uid {
            require_arg(external_uid, "externalUid").map_err(rejected)?;
        }
        require_email(email, "email").map_err(rejected)?;

        let mut body = Map::new();
        body.insert("customer_type".to_string(), json!(customer_type));
        if let Some(external_uid) = external_uid {
            body.insert("external_uid".to_string(), json!(external_uid));
        }
        body.insert("email".to_string(), json!(email));

        let customer: Customer = decode(
            self.transport
                .send(ApiRequest::post("/customers").with_body(Value::Object(body)))
                .await?,
        )?;
        info!(uid = %customer.uid, "Customer created");
        Ok(customer)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, uid: &str) -> Result<Customer, AppError> {
        require_uid(uid, RESOURCE).map_err(rejected)?;
        decode(
            self.transport
                .send(ApiRequest::get(format!("/customers/{uid}")))
                .await?,
        )
    }

    #[instrument(skip(self, query))]
    pub async fn get_list(&self, query: &CustomerListQuery) -> Result<RizeList<Customer>, AppError> {
        let pairs = query.to_query_pairs().map_err(log_rejection)?;
        let list: RizeList<Customer> = decode(
            self.transport
                .send(ApiRequest::get("/customers").with_query(pairs))
                .await?,
        )?;
        debug!(count = list.count, total = list.total_count, "Customer list retrieved");
        Ok(list)
    }

    /// Submits identifying details for a Customer.
    ///
    /// `details` may be a [`crate::domain::CustomerDetails`] or any value with
    /// the same JSON shape. An empty or absent `email` is left unchanged.
    #[instrument(skip(self, email, details))]
    pub async fn update<D>(
        &self,
        uid: &str,
        email: Option<&str>,
        details: &D,
        customer_type: Option<CustomerType>,
    ) -> Result<Customer, AppError>
    where
        D: Serialize + ?Sized,
    {
        require_uid(uid, RESOURCE).map_err(rejected)?;
        validate_optional_email(email, "email").map_err(rejected)?;
        let details = encode(details)?;
        validate_customer_details(&details, customer_type).map_err(rejected)?;

        let mut body = Map::new();
        if let Some(email) = email.filter(|e| !e.is_empty()) {
            body.insert("email".to_string(), json!(email));
        }
        body.insert("details".to_string(), details);
        if let Some(customer_type) = customer_type {
            body.insert("customer_type".to_string(), json!(customer_type));
        }

        decode(
            self.transport
                .send(ApiRequest::put(format!("/customers/{uid}")).with_body(Value::Object(body)))
                .await?,
        )
    }

    /// Archives a Customer. The service answers with no body.
    #[instrument(skip(self))]
    pub async fn archive(&self, uid: &str) -> Result<(), AppError> {
        require_uid(uid, RESOURCE).map_err(rejected)?;
        self.transport
            .send(ApiRequest::delete(format!("/customers/{uid}")))
            .await?;
        info!("Customer archived");
        Ok(())
    }

    /// Confirms the Customer's identifying details are accurate.
    #[instrument(skip(self))]
    pub async fn identity_confirmation(&self, uid: &str) -> Result<Customer, AppError> {
        require_uid(uid, RESOURCE).map_err(rejected)?;
        decode(
            self.transport
                .send(ApiRequest::put(format!(
                    "/customers/{uid}/identity_confirmation"
                )))
                .await?,
        )
    }

    #[instrument(skip(self, lock_note))]
    pub async fn lock(
        &self,
        uid: &str,
        lock_reason: &str,
        lock_note: Option<&str>,
    ) -> Result<Customer, AppError> {
        require_uid(uid, RESOURCE).map_err(rejected)?;
        require_arg(lock_reason, "lockReason").map_err(rejected)?;

        let mut body = Map::new();
        body.insert("lock_reason".to_string(), json!(lock_reason));
        if let Some(lock_note) = lock_note {
            body.insert("lock_note".to_string(), json!(lock_note));
        }

        let customer: Customer = decode(
            self.transport
                .send(
                    ApiRequest::put(format!("/customers/{uid}/lock"))
                        .with_body(Value::Object(body)),
                )
                .await?,
        )?;
        info!("Customer locked");
        Ok(customer)
    }

    #[instrument(skip(self))]
    pub async fn unlock(&self, uid: &str, unlock_reason: Option<&str>) -> Result<Customer, AppError> {
        require_uid(uid, RESOURCE).map_err(rejected)?;

        let mut body = Map::new();
        if let Some(unlock_reason) = unlock_reason {
            body.insert("unlock_reason".to_string(), json!(unlock_reason));
        }

        let customer: Customer = decode(
            self.transport
                .send(
                    ApiRequest::put(format!("/customers/{uid}/unlock"))
                        .with_body(Value::Object(body)),
                )
                .await?,
        )?;
        info!("Customer unlocked");
        Ok(customer)
    }
}
