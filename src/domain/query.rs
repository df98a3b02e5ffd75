//! Typed list queries and their validation schemas.
//!
//! Each query can be built directly or parsed from a raw JSON object with
//! `TryFrom<serde_json::Value>`. Both paths run the same [`QuerySchema`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::AppError;
use super::types::{
    CustodialLineItemStatus, CustomerSort, CustomerStatus, CustomerType, DocumentScopeType,
    KycStatus, SettlementSort, SyntheticLineItemStatus, TransactionEventType, TransactionSort,
    TransactionStatus, TransactionType,
};
use super::validation::{FieldRule, QuerySchema, query_pairs, validate_query};

/// A list query with a validation schema.
pub trait ListQuery: Serialize + DeserializeOwned {
    const SCHEMA: &'static QuerySchema;

    /// Validates the query and flattens it into URL pairs.
    fn to_query_pairs(&self) -> Result<Vec<(String, String)>, AppError> {
        let value =
            serde_json::to_value(self).map_err(|e| AppError::Serialization(e.to_string()))?;
        validate_query(&value, Self::SCHEMA)?;
        Ok(query_pairs(&value, Self::SCHEMA))
    }

    /// Parses an untyped query object, failing on the first invalid field.
    fn from_value(value: Value) -> Result<Self, AppError> {
        validate_query(&value, Self::SCHEMA)?;
        serde_json::from_value(value).map_err(|e| AppError::Deserialization(e.to_string()))
    }
}

macro_rules! impl_try_from_value {
    ($($query:ty),+ $(,)?) => {
        $(
            impl TryFrom<Value> for $query {
                type Error = AppError;

                fn try_from(value: Value) -> Result<Self, Self::Error> {
                    <Self as ListQuery>::from_value(value)
                }
            }
        )+
    };
}

const LIMIT: (&str, FieldRule) = ("limit", FieldRule::Integer);
const OFFSET: (&str, FieldRule) = ("offset", FieldRule::Integer);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CustomerStatus>,
    /// Include Customers still in the `initiated` status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_initiated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kyc_status: Option<KycStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_type: Option<CustomerType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_uid: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<CustomerSort>,
}

impl ListQuery for CustomerListQuery {
    const SCHEMA: &'static QuerySchema = &QuerySchema {
        name: "CustomerListQuery",
        fields: &[
            ("status", FieldRule::Enum(CustomerStatus::VALUES)),
            ("include_initiated", FieldRule::Boolean),
            ("kyc_status", FieldRule::Enum(KycStatus::VALUES)),
            ("first_name", FieldRule::String),
            ("last_name", FieldRule::String),
            ("customer_type", FieldRule::Enum(CustomerType::VALUES)),
            ("email", FieldRule::String),
            ("locked", FieldRule::Boolean),
            ("program_uid", FieldRule::String),
            ("external_uid", FieldRule::String),
            ("pool_uid", FieldRule::StringArray),
            LIMIT,
            OFFSET,
            ("sort", FieldRule::Enum(CustomerSort::VALUES)),
        ],
    };
}

/// Filters for statement Documents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope_type: Option<DocumentScopeType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custodial_account_uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_uid: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synthetic_account_uid: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl ListQuery for DocumentListQuery {
    const SCHEMA: &'static QuerySchema = &QuerySchema {
        name: "DocumentListQuery",
        fields: &[
            ("month", FieldRule::Integer),
            ("year", FieldRule::Integer),
            ("scope_type", FieldRule::Enum(DocumentScopeType::VALUES)),
            ("custodial_account_uid", FieldRule::String),
            ("customer_uid", FieldRule::StringArray),
            ("synthetic_account_uid", FieldRule::StringArray),
            LIMIT,
            OFFSET,
        ],
    };
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_uid: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_synthetic_account_uid: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_synthetic_account_uid: Option<Vec<String>>,
    /// Matches either source or destination
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synthetic_account_uid: Option<Vec<String>>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<Vec<TransactionType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<TransactionStatus>>,
    /// `*` acts as a wildcard
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<TransactionSort>,
}

impl ListQuery for TransactionListQuery {
    const SCHEMA: &'static QuerySchema = &QuerySchema {
        name: "TransactionListQuery",
        fields: &[
            ("customer_uid", FieldRule::StringArray),
            ("source_synthetic_account_uid", FieldRule::StringArray),
            ("destination_synthetic_account_uid", FieldRule::StringArray),
            ("synthetic_account_uid", FieldRule::StringArray),
            ("type", FieldRule::EnumArray(TransactionType::VALUES)),
            ("status", FieldRule::EnumArray(TransactionStatus::VALUES)),
            ("search_description", FieldRule::String),
            LIMIT,
            OFFSET,
            ("sort", FieldRule::Enum(TransactionSort::VALUES)),
        ],
    };
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionEventListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_custodial_account_uid: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_custodial_account_uid: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custodial_account_uid: Option<Vec<String>>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<Vec<TransactionEventType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_uid: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SettlementSort>,
}

impl ListQuery for TransactionEventListQuery {
    const SCHEMA: &'static QuerySchema = &QuerySchema {
        name: "TransactionEventListQuery",
        fields: &[
            ("source_custodial_account_uid", FieldRule::StringArray),
            ("destination_custodial_account_uid", FieldRule::StringArray),
            ("custodial_account_uid", FieldRule::StringArray),
            ("type", FieldRule::EnumArray(TransactionEventType::VALUES)),
            ("transaction_uid", FieldRule::StringArray),
            LIMIT,
            OFFSET,
            ("sort", FieldRule::Enum(SettlementSort::VALUES)),
        ],
    };
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticLineItemListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_uid: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_uid: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synthetic_account_uid: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_uid: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<SyntheticLineItemStatus>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SettlementSort>,
}

impl ListQuery for SyntheticLineItemListQuery {
    const SCHEMA: &'static QuerySchema = &QuerySchema {
        name: "SyntheticLineItemListQuery",
        fields: &[
            ("customer_uid", FieldRule::StringArray),
            ("pool_uid", FieldRule::StringArray),
            ("synthetic_account_uid", FieldRule::StringArray),
            LIMIT,
            OFFSET,
            ("transaction_uid", FieldRule::StringArray),
            ("status", FieldRule::EnumArray(SyntheticLineItemStatus::VALUES)),
            ("sort", FieldRule::Enum(SettlementSort::VALUES)),
        ],
    };
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustodialLineItemListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_uid: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custodial_account_uid: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<CustodialLineItemStatus>>,
    /// Records at or below this amount
    #[serde(skip_serializing_if = "Option::is_none")]
    pub us_dollar_amount_max: Option<f64>,
    /// Records at or above this amount
    #[serde(skip_serializing_if = "Option::is_none")]
    pub us_dollar_amount_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_event_uid: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_uid: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SettlementSort>,
}

impl ListQuery for CustodialLineItemListQuery {
    const SCHEMA: &'static QuerySchema = &QuerySchema {
        name: "CustodialLineItemListQuery",
        fields: &[
            ("customer_uid", FieldRule::StringArray),
            ("custodial_account_uid", FieldRule::StringArray),
            ("status", FieldRule::EnumArray(CustodialLineItemStatus::VALUES)),
            ("us_dollar_amount_max", FieldRule::Number),
            ("us_dollar_amount_min", FieldRule::Number),
            ("transaction_event_uid", FieldRule::StringArray),
            ("transaction_uid", FieldRule::StringArray),
            LIMIT,
            OFFSET,
            ("sort", FieldRule::Enum(SettlementSort::VALUES)),
        ],
    };
}

impl_try_from_value!(
    CustomerListQuery,
    DocumentListQuery,
    TransactionListQuery,
    TransactionEventListQuery,
    SyntheticLineItemListQuery,
    CustodialLineItemListQuery,
);
