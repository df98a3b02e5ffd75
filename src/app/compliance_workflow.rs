//! Compliance Workflow operations.
//!
//! A workflow is the ordered set of Compliance Documents a Customer must be
//! shown and must acknowledge before the Customer can be activated.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::{info, instrument};

use crate::domain::validation::{require_arg, require_email, require_uid, validate_acknowledgement};
use crate::domain::{ApiRequest, AppError, ComplianceWorkflow, Transport, ValidationError};

use super::{decode, encode, rejected};

const RESOURCE: &str = "Compliance Workflow";

/// `/compliance_workflows` endpoints
#[derive(Clone)]
pub struct ComplianceWorkflowService {
    transport: Arc<dyn Transport>,
}

impl ComplianceWorkflowService {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Starts onboarding for a new Customer.
    #[instrument(skip(self, email))]
    pub async fn create(
        &self,
        customer_external_uid: &str,
        email: &str,
    ) -> Result<ComplianceWorkflow, AppError> {
        require_arg(customer_external_uid, "customerExternalUid").map_err(rejected)?;
        require_email(email, "email").map_err(rejected)?;

        let workflow: ComplianceWorkflow = decode(
            self.transport
                .send(ApiRequest::post("/compliance_workflows").with_body(json!({
                    "customer_external_uid": customer_external_uid,
                    "email": email,
                })))
                .await?,
        )?;
        info!(uid = %workflow.uid, "Compliance Workflow created");
        Ok(workflow)
    }

    /// Replaces an expired workflow for an existing Customer.
    #[instrument(skip(self, email))]
    pub async fn renew(
        &self,
        customer_external_uid: &str,
        customer_uid: &str,
        email: &str,
    ) -> Result<ComplianceWorkflow, AppError> {
        require_arg(customer_external_uid, "customerExternalUid").map_err(rejected)?;
        require_arg(customer_uid, "customerUid").map_err(rejected)?;
        require_email(email, "email").map_err(rejected)?;

        let workflow: ComplianceWorkflow = decode(
            self.transport
                .send(ApiRequest::post("/compliance_workflows/renew").with_body(json!({
                    "customer_external_uid": customer_external_uid,
                    "customer_uid": customer_uid,
                    "email": email,
                })))
                .await?,
        )?;
        info!(uid = %workflow.uid, "Compliance Workflow renewed");
        Ok(workflow)
    }

    #[instrument(skip(self))]
    pub async fn view_latest(&self, customer_uid: &str) -> Result<ComplianceWorkflow, AppError> {
        require_arg(customer_uid, "customerUid").map_err(rejected)?;
        decode(
            self.transport
                .send(ApiRequest::get(format!(
                    "/compliance_workflows/latest/{customer_uid}"
                )))
                .await?,
        )
    }

    /// Records the Customer's answer to one or more Compliance Documents.
    ///
    /// `documents` serializes to a single acknowledgement object or an array
    /// of them, e.g. `&[ComplianceDocumentAcknowledgementRequest]`. A single
    /// document goes to `acknowledge_document`; several go to the batch
    /// endpoint.
    #[instrument(skip(self, documents))]
    pub async fn acknowledge_compliance_documents<D>(
        &self,
        uid: &str,
        customer_uid: &str,
        documents: &D,
    ) -> Result<ComplianceWorkflow, AppError>
    where
        D: Serialize + ?Sized,
    {
        require_uid(uid, RESOURCE).map_err(rejected)?;
        require_arg(customer_uid, "customerUid").map_err(rejected)?;

        let documents = match encode(documents)? {
            Value::Array(items) => items,
            object @ Value::Object(_) => vec![object],
            _ => {
                return Err(rejected(ValidationError::InvalidType {
                    field: "documents".to_string(),
                    expected: "an array",
                }));
            }
        };

        let request = match documents.as_slice() {
            [] => return Err(rejected(ValidationError::MissingField("documents".to_string()))),
            [document] => {
                validate_acknowledgement(document, "").map_err(rejected)?;

                let mut body = Map::new();
                body.insert("customer_uid".to_string(), json!(customer_uid));
                if let Some(fields) = document.as_object() {
                    body.extend(fields.clone());
                }
                ApiRequest::put(format!("/compliance_workflows/{uid}/acknowledge_document"))
                    .with_body(Value::Object(body))
            }
            many => {
                for (i, document) in many.iter().enumerate() {
                    validate_acknowledgement(document, &format!("documents[{i}]."))
                        .map_err(rejected)?;
                }
                ApiRequest::put(format!(
                    "/compliance_workflows/{uid}/batch_acknowledge_documents"
                ))
                .with_body(json!({
                    "customer_uid": customer_uid,
                    "documents": many,
                }))
            }
        };

        let workflow: ComplianceWorkflow = decode(self.transport.send(request).await?)?;
        info!(
            accepted = workflow.accepted_documents.len(),
            pending = workflow.current_step_documents_pending.len(),
            "Compliance Documents acknowledged"
        );
        Ok(workflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Acceptance, ComplianceDocumentAcknowledgementRequest, HttpMethod};
    use crate::test_utils::MockTransport;

    fn ack(document_uid: &str) -> ComplianceDocumentAcknowledgementRequest {
        ComplianceDocumentAcknowledgementRequest {
            document_uid: document_uid.to_string(),
            accept: Acceptance::Yes,
            user_name: "Olive Oyl".to_string(),
            ip_address: "107.56.230.156".to_string(),
        }
    }

    fn workflow_json() -> Value {
        json!({
            "uid": "wf1",
            "customer": { "uid": "cust1", "external_uid": "ext1", "email": "a@b.com" },
            "summary": {
                "accepted_quantity": 1,
                "begun": true,
                "completed_step": 1,
                "current_step": 2,
                "status": "in_progress"
            },
            "accepted_documents": [],
            "current_step_documents_pending": [],
            "all_documents": []
        })
    }

    #[tokio::test]
    async fn test_create_validation() {
        let service = ComplianceWorkflowService::new(Arc::new(MockTransport::new()));

        let err = service.create(" ", "a@b.com").await.unwrap_err();
        assert_eq!(err.to_string(), "\"customerExternalUid\" is required.");

        let err = service.create("ext1", "not-an-email").await.unwrap_err();
        assert_eq!(err.to_string(), "\"email\" is invalid.");
    }

    #[tokio::test]
    async fn test_single_document_uses_acknowledge_endpoint() {
        let transport = Arc::new(MockTransport::new().with_response(
            HttpMethod::Put,
            "/compliance_workflows/wf1/acknowledge_document",
            workflow_json(),
        ));
        let service = ComplianceWorkflowService::new(transport.clone());

        service
            .acknowledge_compliance_documents("wf1", "cust1", &[ack("doc1")])
            .await
            .unwrap();

        let body = transport.last_request().unwrap().body.unwrap();
        assert_eq!(body["customer_uid"], "cust1");
        assert_eq!(body["document_uid"], "doc1");
        assert_eq!(body["accept"], "yes");
    }

    #[tokio::test]
    async fn test_many_documents_use_batch_endpoint() {
        let transport = Arc::new(MockTransport::new().with_response(
            HttpMethod::Put,
            "/compliance_workflows/wf1/batch_acknowledge_documents",
            workflow_json(),
        ));
        let service = ComplianceWorkflowService::new(transport.clone());

        service
            .acknowledge_compliance_documents("wf1", "cust1", &[ack("doc1"), ack("doc2")])
            .await
            .unwrap();

        let body = transport.last_request().unwrap().body.unwrap();
        assert_eq!(body["documents"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_acknowledgement_errors_are_addressed() {
        let service = ComplianceWorkflowService::new(Arc::new(MockTransport::new()));

        let mut bad = ack("doc2");
        bad.ip_address = "not-an-ip".to_string();
        let err = service
            .acknowledge_compliance_documents("wf1", "cust1", &[ack("doc1"), bad])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "\"documents[1].ip_address\" is invalid.");

        let err = service
            .acknowledge_compliance_documents("wf1", "cust1", &json!({ "document_uid": "d", "accept": "maybe" }))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "\"accept\" should be \"yes\" or \"no\".");

        let empty: [ComplianceDocumentAcknowledgementRequest; 0] = [];
        let err = service
            .acknowledge_compliance_documents("wf1", "cust1", &empty)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "\"documents\" is required.");

        let err = service
            .acknowledge_compliance_documents("wf1", "cust1", "doc1")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "\"documents\" must be an array.");
    }
}
