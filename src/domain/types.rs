//! Records and enumerations mirrored from the Rize API.
//!
//! Nothing here is created or mutated locally. Records are deserialized
//! from responses; unknown response fields are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Declares a string-valued wire enum with `as_str`, `FromStr`, `Display`
/// and a `VALUES` table listing every accepted wire value in order.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $wire:tt),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every accepted wire value, in declaration order.
            pub const VALUES: &'static [&'static str] = &[$($wire),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(format!(
                        "Invalid {}: {}",
                        stringify!($name),
                        s
                    )),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Lifecycle status of a Customer
    CustomerStatus {
        Initiated => "initiated",
        Queued => "queued",
        IdentityVerified => "identity_verified",
        Active => "active",
        ManualReview => "manual_review",
        Rejected => "rejected",
        Archived => "archived",
        UnderReview => "under_review",
        PendingArchival => "pending_archival",
    }
}

wire_enum! {
    /// KYC evaluation status of a Customer
    KycStatus {
        Approved => "approved",
        Denied => "denied",
        DocumentsProvided => "documents_provided",
        DocumentsRejected => "documents_rejected",
        ManualReview => "manual_review",
        PendingDocuments => "pending_documents",
        ReadyForCustodialPartnerReview => "ready_for_custodial_partner_review",
        UnderReview => "under_review",
    }
}

wire_enum! {
    /// Customer classification. Sole proprietors must carry a business name.
    CustomerType {
        Unaffiliated => "unaffiliated",
        SoleProprietor => "sole_proprietor",
    }
}

wire_enum! {
    CustomerSort {
        FirstNameAsc => "first_name_asc",
        FirstNameDesc => "first_name_desc",
        LastNameAsc => "last_name_asc",
        LastNameDesc => "last_name_desc",
        EmailAsc => "email_asc",
        EmailDesc => "email_desc",
    }
}

wire_enum! {
    /// What a statement Document is scoped to
    DocumentScopeType {
        CustodialAccount => "custodial_account",
        Customer => "customer",
        SyntheticAccount => "synthetic_account",
    }
}

wire_enum! {
    /// Answer recorded when a Customer acknowledges a Compliance Document
    Acceptance {
        Yes => "yes",
        No => "no",
    }
}

wire_enum! {
    TransactionStatus {
        /// Being prepared as a result of a Transfer request
        Queued => "queued",
        /// Waiting on related Transaction Events to settle
        Pending => "pending",
        Settled => "settled",
        /// One of the related Transaction Events could not be settled
        Failed => "failed",
    }
}

wire_enum! {
    TransactionType {
        AtmWithdrawal => "atm_withdrawal",
        CardPurchase => "card_purchase",
        CardRefund => "card_refund",
        Dispute => "dispute",
        ExternalTransfer => "external_transfer",
        Fee => "fee",
        InternalTransfer => "internal_transfer",
        Other => "other",
        ReversedTransfer => "reversed_transfer",
        ThirdPartyTransfer => "third_party_transfer",
    }
}

wire_enum! {
    /// Direction of the Customer's asset movement
    NetAsset {
        Positive => "positive",
        Negative => "negative",
        Neutral => "neutral",
    }
}

wire_enum! {
    TransactionSort {
        CreatedAtAsc => "created_at_asc",
        CreatedAtDesc => "created_at_desc",
        DescriptionAsc => "description_asc",
        DescriptionDesc => "description_desc",
        IdAsc => "id_asc",
        IdDesc => "id_desc",
        SettledIndexAsc => "settled_index_asc",
        SettledIndexDesc => "settled_index_desc",
        UsDollarAmountAsc => "us_dollar_amount_asc",
        UsDollarAmountDesc => "us_dollar_amount_desc",
    }
}

wire_enum! {
    TransactionEventType {
        OdfiAchDeposit => "odfi_ach_deposit",
        OdfiAchWithdrawal => "odfi_ach_withdrawal",
        RdfiAchDeposit => "rdfi_ach_deposit",
        RdfiAchWithdrawal => "rdfi_ach_withdrawal",
    }
}

wire_enum! {
    /// Sort order shared by Transaction Events and both line item lists
    SettlementSort {
        CreatedAtAsc => "created_at_asc",
        CreatedAtDesc => "created_at_desc",
        DescriptionAsc => "description_asc",
        DescriptionDesc => "description_desc",
        SettledIndexAsc => "settled_index_asc",
        SettledIndexDesc => "settled_index_desc",
        UsDollarAmountAsc => "us_dollar_amount_asc",
        UsDollarAmountDesc => "us_dollar_amount_desc",
    }
}

wire_enum! {
    SyntheticLineItemStatus {
        Begun => "begun",
        Failed => "failed",
        InProgress => "in_progress",
        Settled => "settled",
    }
}

wire_enum! {
    CustodialLineItemStatus {
        Settled => "settled",
        Voided => "voided",
    }
}

/// Envelope shared by every list endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RizeList<T> {
    /// Total count of items available to retrieve
    pub total_count: u64,
    /// Number of items retrieved
    pub count: u64,
    pub limit: u64,
    pub offset: u64,
    pub data: Vec<T>,
}

impl<T> RizeList<T> {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Postal address, used both in requests and in Customer records
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Address {
    pub street1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

/// Identifying details submitted on `customer.update`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CustomerDetails {
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    pub phone: String,
    /// Required for sole proprietors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    /// Formatted `###-##-####`
    pub ssn: String,
    /// Formatted `YYYY-MM-DD`
    pub dob: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

/// Details as returned by the service. The SSN is never echoed back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CustomerRecordDetails {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub ssn_last_four: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

/// End user of a Program
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub uid: String,
    #[serde(default)]
    pub external_uid: Option<String>,
    #[serde(default)]
    pub customer_type: Option<CustomerType>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: Option<CustomerStatus>,
    #[serde(default)]
    pub kyc_status: Option<KycStatus>,
    #[serde(default)]
    pub kyc_status_reasons: Vec<String>,
    #[serde(default)]
    pub program_uid: Option<String>,
    #[serde(default)]
    pub primary_customer_uid: Option<String>,
    #[serde(default)]
    pub total_balance: Option<String>,
    #[serde(default)]
    pub lock_reason: Option<String>,
    #[serde(default)]
    pub locked_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub activated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub details: CustomerRecordDetails,
}

impl Customer {
    pub fn is_locked(&self) -> bool {
        self.locked_at.is_some()
    }
}

/// Monthly statement or other generated document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub uid: String,
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub scope_type: Option<DocumentScopeType>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub period_started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub period_ended_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub custodial_account_uids: Vec<String>,
    #[serde(default)]
    pub customer_uids: Vec<String>,
    #[serde(default)]
    pub synthetic_account_uids: Vec<String>,
}

/// Metadata of a document uploaded for a KYC evaluation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KycDocument {
    pub uid: String,
    #[serde(default, rename = "type")]
    pub document_type: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Customer reference embedded in a Compliance Workflow
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkflowCustomer {
    pub uid: String,
    #[serde(default)]
    pub external_uid: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkflowSummary {
    #[serde(default)]
    pub accepted_quantity: u32,
    #[serde(default)]
    pub begun: bool,
    #[serde(default)]
    pub completed_step: u32,
    #[serde(default)]
    pub current_step: u32,
    #[serde(default)]
    pub status: Option<String>,
}

/// A document the Customer must be presented with during onboarding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComplianceDocument {
    pub uid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default)]
    pub step: Option<u32>,
    #[serde(default)]
    pub electronic_signature_required: Option<String>,
    #[serde(default)]
    pub external_storage_name: Option<String>,
    #[serde(default)]
    pub compliance_document_url: Option<String>,
    #[serde(default)]
    pub accepted_at: Option<DateTime<Utc>>,
}

/// Entry of the complete document list; these carry no uid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComplianceDocumentSummary {
    #[serde(default)]
    pub step: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<u32>,
}

/// Ordered group of Compliance Documents a Customer must acknowledge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComplianceWorkflow {
    pub uid: String,
    pub customer: WorkflowCustomer,
    pub summary: WorkflowSummary,
    #[serde(default)]
    pub accepted_documents: Vec<ComplianceDocument>,
    #[serde(default)]
    pub current_step_documents_pending: Vec<ComplianceDocument>,
    #[serde(default)]
    pub all_documents: Vec<ComplianceDocumentSummary>,
}

/// One acknowledgement sent to `acknowledge_compliance_documents`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComplianceDocumentAcknowledgementRequest {
    pub document_uid: String,
    pub accept: Acceptance,
    pub user_name: String,
    pub ip_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub uid: String,
    /// Creation order
    pub id: u64,
    /// Settlement order. `None` while queued or pending.
    #[serde(default)]
    pub settled_index: Option<u64>,
    #[serde(default)]
    pub transfer_uid: Option<String>,
    pub source_synthetic_account_uid: String,
    pub destination_synthetic_account_uid: String,
    #[serde(default)]
    pub transaction_event_uids: Vec<String>,
    #[serde(default)]
    pub custodial_account_uids: Vec<String>,
    pub status: TransactionStatus,
    /// Never negative
    pub us_dollar_amount: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub net_asset: NetAsset,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub settled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionEvent {
    pub uid: String,
    #[serde(default)]
    pub settled_index: Option<u64>,
    pub transaction_uid: String,
    /// Custodial transfers in later phases wait for every earlier phase to settle
    pub phase: u32,
    pub source_custodial_account_uid: String,
    pub destination_custodial_account_uid: String,
    #[serde(default)]
    pub custodial_line_item_uids: Vec<String>,
    pub status: String,
    pub us_dollar_amount: String,
    #[serde(rename = "type")]
    pub event_type: TransactionEventType,
    pub net_asset: NetAsset,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub settled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyntheticLineItem {
    pub uid: String,
    #[serde(default)]
    pub settled_index: Option<u64>,
    pub transaction_uid: String,
    pub synthetic_account_uid: String,
    pub status: String,
    /// Signed amount
    pub us_dollar_amount: String,
    #[serde(default)]
    pub running_us_dollar_balance: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub settled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustodialLineItem {
    pub uid: String,
    #[serde(default)]
    pub settled_index: Option<u64>,
    pub transaction_uid: String,
    pub transaction_event_uid: String,
    pub custodial_account_uid: String,
    pub status: String,
    pub us_dollar_amount: String,
    /// Empty unless settled or voided
    #[serde(default)]
    pub running_us_dollar_balance: Option<String>,
    #[serde(rename = "type")]
    pub line_item_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub occurred_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub settled_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_customer_status_display_and_parsing() {
        for value in CustomerStatus::VALUES {
            let status = CustomerStatus::from_str(value).unwrap();
            assert_eq!(status.as_str(), *value);
            assert_eq!(status.to_string(), *value);
        }
        assert!(CustomerStatus::from_str("invalid").is_err());
    }

    #[test]
    fn test_enum_tables_follow_declaration_order() {
        assert_eq!(CustomerType::VALUES, &["unaffiliated", "sole_proprietor"]);
        assert_eq!(Acceptance::VALUES, &["yes", "no"]);
        assert_eq!(TransactionSort::VALUES.len(), 10);
        assert_eq!(SettlementSort::VALUES.len(), 8);
    }

    #[test]
    fn test_serde_uses_wire_values() {
        let json = serde_json::to_string(&KycStatus::ReadyForCustodialPartnerReview).unwrap();
        assert_eq!(json, "\"ready_for_custodial_partner_review\"");
        let parsed: TransactionType = serde_json::from_str("\"third_party_transfer\"").unwrap();
        assert_eq!(parsed, TransactionType::ThirdPartyTransfer);
    }

    #[test]
    fn test_customer_details_skip_absent_optionals() {
        let details = CustomerDetails {
            first_name: "Olive".to_string(),
            last_name: "Oyl".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&details).unwrap();
        assert!(value.get("middle_name").is_none());
        assert!(value.get("address").is_none());
        assert_eq!(value["first_name"], "Olive");
    }

    #[test]
    fn test_transaction_deserialization() {
        let json = serde_json::json!({
            "uid": "EhrQZJNjCd79LLYq",
            "id": 1,
            "settled_index": null,
            "transfer_uid": "EhrQZJNjCd79LLYq",
            "source_synthetic_account_uid": "a",
            "destination_synthetic_account_uid": "b",
            "transaction_event_uids": [],
            "custodial_account_uids": [],
            "status": "queued",
            "us_dollar_amount": "2.52",
            "type": "internal_transfer",
            "net_asset": "neutral",
            "description": "Transfer",
            "created_at": "2021-04-13T19:32:26.934Z",
            "settled_at": null,
            "unknown_field": true
        });
        let tx: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(tx.status, TransactionStatus::Queued);
        assert_eq!(tx.transaction_type, TransactionType::InternalTransfer);
        assert!(tx.settled_index.is_none());
        assert!(tx.settled_at.is_none());
    }

    #[test]
    fn test_rize_list_envelope() {
        let json = serde_json::json!({
            "total_count": 1,
            "count": 1,
            "limit": 100,
            "offset": 0,
            "data": [{ "uid": "kyc1", "type": "passport", "filename": "p.png" }]
        });
        let list: RizeList<KycDocument> = serde_json::from_value(json).unwrap();
        assert!(!list.is_empty());
        assert_eq!(list.data[0].document_type.as_deref(), Some("passport"));
    }
}
