//! Domain layer containing records, queries, validation, traits, and error definitions.

pub mod error;
pub mod query;
pub mod traits;
pub mod types;
pub mod validation;

pub use error::{AppError, ConfigError, ExternalServiceError, ValidationError};
pub use query::{
    CustodialLineItemListQuery, CustomerListQuery, DocumentListQuery, ListQuery,
    SyntheticLineItemListQuery, TransactionEventListQuery, TransactionListQuery,
};
pub use traits::{ApiRequest, HttpMethod, TokenProvider, Transport};
pub use types::{
    Acceptance, Address, ComplianceDocument, ComplianceDocumentAcknowledgementRequest,
    ComplianceWorkflow, CustodialLineItem, CustodialLineItemStatus, Customer, CustomerDetails,
    CustomerRecordDetails, CustomerSort, CustomerStatus, CustomerType, Document,
    DocumentScopeType, KycDocument, KycStatus, NetAsset, RizeList, SettlementSort,
    SyntheticLineItem, SyntheticLineItemStatus, Transaction, TransactionEvent,
    TransactionEventType, TransactionSort, TransactionStatus, TransactionType,
};
