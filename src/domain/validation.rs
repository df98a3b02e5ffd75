//! Request validation applied before any network call.
//!
//! Checks operate on the JSON wire shape of a request so that typed callers
//! and raw `serde_json::Value` callers get identical, field-addressed
//! errors. Every check stops at the first failure.

use serde_json::{Map, Value};
use validator::{ValidateEmail, ValidateIp};

use super::error::ValidationError;
use super::types::{Acceptance, CustomerType};

pub const SSN_PATTERN: &str = "###-##-####";
pub const DATE_PATTERN: &str = "YYYY-MM-DD";

/// Constraint applied to one list-query field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    String,
    Boolean,
    /// Non-negative JSON integer that fits in a `u32`
    Integer,
    Number,
    /// Non-empty array of strings
    StringArray,
    /// String from the allowed set
    Enum(&'static [&'static str]),
    /// Non-empty array of strings from the allowed set
    EnumArray(&'static [&'static str]),
}

/// Ordered field rules of one list query. Fields are checked in this order.
#[derive(Debug)]
pub struct QuerySchema {
    /// Type name used in the "must be a ... object" message
    pub name: &'static str,
    pub fields: &'static [(&'static str, FieldRule)],
}

/// Rejects empty and whitespace-only identifiers of a named resource.
pub fn require_uid(uid: &str, resource: &'static str) -> Result<(), ValidationError> {
    if uid.trim().is_empty() {
        return Err(ValidationError::MissingUid { resource });
    }
    Ok(())
}

/// Rejects empty and whitespace-only positional arguments.
pub fn require_arg(value: &str, name: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(name.to_string()));
    }
    Ok(())
}

/// Requires a syntactically valid email address.
pub fn require_email(email: &str, name: &str) -> Result<(), ValidationError> {
    require_arg(email, name)?;
    validate_email(email, name)
}

/// Validates an email address that is allowed to be absent.
pub fn validate_optional_email(email: Option<&str>, name: &str) -> Result<(), ValidationError> {
    match email {
        Some(email) if !email.is_empty() => validate_email(email, name),
        _ => Ok(()),
    }
}

fn validate_email(email: &str, name: &str) -> Result<(), ValidationError> {
    if !email.validate_email() {
        return Err(ValidationError::InvalidField(name.to_string()));
    }
    Ok(())
}

/// `###-##-####`, checked by shape only.
pub fn is_formatted_ssn(ssn: &str) -> bool {
    let bytes = ssn.as_bytes();
    bytes.len() == 11
        && bytes.iter().enumerate().all(|(i, b)| match i {
            3 | 6 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Calendar date formatted `YYYY-MM-DD`.
pub fn is_formatted_date(date: &str) -> bool {
    date.len() == 10 && chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
}

fn blank(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(s)) => s.trim().is_empty(),
        _ => true,
    }
}

fn require_field(
    object: &Map<String, Value>,
    prefix: &str,
    field: &str,
) -> Result<(), ValidationError> {
    if blank(object.get(field)) {
        return Err(ValidationError::MissingField(format!("{prefix}{field}")));
    }
    Ok(())
}

/// Validates the `details` payload of a Customer update.
///
/// Order: first_name, last_name, business_name (sole proprietors only),
/// phone, ssn, dob, then the address object and its fields.
pub fn validate_customer_details(
    details: &Value,
    customer_type: Option<CustomerType>,
) -> Result<(), ValidationError> {
    let details = details
        .as_object()
        .ok_or_else(|| ValidationError::InvalidShape {
            field: "details".to_string(),
            expected: "a CustomerDetails object".to_string(),
        })?;

    require_field(details, "details.", "first_name")?;
    require_field(details, "details.", "last_name")?;
    if customer_type == Some(CustomerType::SoleProprietor) {
        require_field(details, "details.", "business_name")?;
    }
    require_field(details, "details.", "phone")?;

    require_field(details, "details.", "ssn")?;
    if !details
        .get("ssn")
        .and_then(Value::as_str)
        .is_some_and(is_formatted_ssn)
    {
        return Err(ValidationError::InvalidFormat {
            field: "details.ssn".to_string(),
            pattern: SSN_PATTERN,
        });
    }

    require_field(details, "details.", "dob")?;
    if !details
        .get("dob")
        .and_then(Value::as_str)
        .is_some_and(is_formatted_date)
    {
        return Err(ValidationError::InvalidFormat {
            field: "details.dob".to_string(),
            pattern: DATE_PATTERN,
        });
    }

    validate_address(details.get("address"), "details.address")
}

/// Validates an address object found at `path`.
pub fn validate_address(address: Option<&Value>, path: &str) -> Result<(), ValidationError> {
    let address = address
        .and_then(Value::as_object)
        .ok_or_else(|| ValidationError::InvalidShape {
            field: path.to_string(),
            expected: "an Address object".to_string(),
        })?;

    let prefix = format!("{path}.");
    for field in ["street1", "city", "state", "postal_code"] {
        require_field(address, &prefix, field)?;
    }
    Ok(())
}

/// Validates one Compliance Document acknowledgement. `prefix` addresses the
/// document inside a batch, e.g. `documents[1].`.
pub fn validate_acknowledgement(document: &Value, prefix: &str) -> Result<(), ValidationError> {
    let document = document
        .as_object()
        .ok_or_else(|| ValidationError::InvalidShape {
            field: prefix.trim_end_matches('.').to_string(),
            expected: "a ComplianceDocumentAcknowledgementRequest object".to_string(),
        })?;

    require_field(document, prefix, "document_uid")?;

    let accepted = document
        .get("accept")
        .and_then(Value::as_str)
        .is_some_and(|a| Acceptance::VALUES.contains(&a));
    if !accepted {
        return Err(ValidationError::InvalidShape {
            field: format!("{prefix}accept"),
            expected: "\"yes\" or \"no\"".to_string(),
        });
    }

    require_field(document, prefix, "user_name")?;
    require_field(document, prefix, "ip_address")?;
    let ip_valid = document
        .get("ip_address")
        .and_then(Value::as_str)
        .is_some_and(|ip| ip.validate_ip());
    if !ip_valid {
        return Err(ValidationError::InvalidField(format!("{prefix}ip_address")));
    }
    Ok(())
}

/// Checks a list query against its schema. Absent fields are skipped;
/// unknown fields are ignored.
pub fn validate_query(query: &Value, schema: &QuerySchema) -> Result<(), ValidationError> {
    let query = query
        .as_object()
        .ok_or(ValidationError::InvalidQuery(schema.name))?;

    for &(field, rule) in schema.fields {
        if let Some(value) = query.get(field) {
            check_rule(field, rule, value)?;
        }
    }
    Ok(())
}

fn is_string_array(value: &Value, allowed: Option<&[&str]>) -> bool {
    match value.as_array() {
        Some(items) if !items.is_empty() => items.iter().all(|item| match item.as_str() {
            Some(s) => allowed.is_none_or(|set| set.contains(&s)),
            None => false,
        }),
        _ => false,
    }
}

fn check_rule(field: &'static str, rule: FieldRule, value: &Value) -> Result<(), ValidationError> {
    let valid = match rule {
        FieldRule::String => value.is_string(),
        FieldRule::Boolean => value.is_boolean(),
        FieldRule::Integer => value
            .as_u64()
            .is_some_and(|n| n <= u64::from(u32::MAX)),
        FieldRule::Number => value.is_number(),
        FieldRule::StringArray => is_string_array(value, None),
        FieldRule::Enum(allowed) => value.as_str().is_some_and(|s| allowed.contains(&s)),
        FieldRule::EnumArray(allowed) => is_string_array(value, Some(allowed)),
    };
    if valid {
        return Ok(());
    }

    Err(match rule {
        FieldRule::String => ValidationError::InvalidQueryField {
            field,
            expected: "a string",
        },
        FieldRule::Boolean => ValidationError::InvalidQueryField {
            field,
            expected: "boolean",
        },
        FieldRule::Integer => ValidationError::InvalidQueryField {
            field,
            expected: "an integer",
        },
        FieldRule::Number => ValidationError::InvalidQueryField {
            field,
            expected: "a number",
        },
        FieldRule::StringArray => ValidationError::InvalidQueryField {
            field,
            expected: "an array of strings",
        },
        FieldRule::Enum(allowed) => ValidationError::InvalidQueryEnum {
            field,
            expected: "a string",
            allowed,
        },
        FieldRule::EnumArray(allowed) => ValidationError::InvalidQueryEnum {
            field,
            expected: "an array of strings",
            allowed,
        },
    })
}

/// Flattens a validated query into URL pairs in schema order.
///
/// Arrays become repeated `key[]` pairs.
pub fn query_pairs(query: &Value, schema: &QuerySchema) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let Some(query) = query.as_object() else {
        return pairs;
    };

    for &(field, _) in schema.fields {
        match query.get(field) {
            None | Some(Value::Null) => {}
            Some(Value::Array(items)) => {
                let key = format!("{field}[]");
                pairs.extend(items.iter().map(|item| (key.clone(), scalar_to_string(item))));
            }
            Some(value) => pairs.push((field.to_string(), scalar_to_string(value))),
        }
    }
    pairs
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TEST_SCHEMA: QuerySchema = QuerySchema {
        name: "TestQuery",
        fields: &[
            ("status", FieldRule::Enum(&["active", "archived"])),
            ("locked", FieldRule::Boolean),
            ("first_name", FieldRule::String),
            ("pool_uid", FieldRule::StringArray),
            ("type", FieldRule::EnumArray(&["fee", "other"])),
            ("limit", FieldRule::Integer),
            ("amount_min", FieldRule::Number),
        ],
    };

    fn full_details() -> Value {
        json!({
            "first_name": "Olive",
            "last_name": "Oyl",
            "phone": "5555551212",
            "ssn": "111-22-3333",
            "dob": "1990-01-31",
            "address": {
                "street1": "123 Abc St.",
                "city": "Chicago",
                "state": "IL",
                "postal_code": "12345"
            }
        })
    }

    #[test]
    fn test_require_uid_rejects_blank() {
        for uid in ["", " ", "\t\n"] {
            let err = require_uid(uid, "Customer").unwrap_err();
            assert_eq!(err.to_string(), "Customer \"uid\" is required.");
        }
        assert!(require_uid("h9MzupcjtA3LPW2e", "Customer").is_ok());
    }

    #[test]
    fn test_require_arg_rejects_whitespace() {
        let err = require_arg(" ", "lockReason").unwrap_err();
        assert_eq!(err.to_string(), "\"lockReason\" is required.");
    }

    #[test]
    fn test_optional_email() {
        assert!(validate_optional_email(None, "email").is_ok());
        assert!(validate_optional_email(Some(""), "email").is_ok());
        assert!(validate_optional_email(Some("olive@example.com"), "email").is_ok());
        let err = validate_optional_email(Some("test"), "email").unwrap_err();
        assert_eq!(err.to_string(), "\"email\" is invalid.");
    }

    #[test]
    fn test_ssn_shape() {
        assert!(is_formatted_ssn("111-22-3333"));
        assert!(is_formatted_ssn("000-00-0000"));
        assert!(!is_formatted_ssn("111223333"));
        assert!(!is_formatted_ssn("111-223-333"));
        assert!(!is_formatted_ssn("aaa-bb-cccc"));
        assert!(!is_formatted_ssn("111-22-33333"));
    }

    #[test]
    fn test_date_shape() {
        assert!(is_formatted_date("1990-01-31"));
        assert!(!is_formatted_date("1990-1-31"));
        assert!(!is_formatted_date("1990-02-30"));
        assert!(!is_formatted_date("01/31/1990"));
    }

    #[test]
    fn test_details_must_be_object() {
        let err = validate_customer_details(&json!(""), None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"details\" should be a CustomerDetails object."
        );
    }

    #[test]
    fn test_details_hierarchical_order() {
        let cases: Vec<(Vec<&str>, &str)> = vec![
            (vec![], "\"details.first_name\" is required."),
            (vec!["first_name"], "\"details.last_name\" is required."),
            (vec!["first_name", "last_name"], "\"details.phone\" is required."),
            (
                vec!["first_name", "last_name", "phone"],
                "\"details.ssn\" is required.",
            ),
            (
                vec!["first_name", "last_name", "phone", "ssn"],
                "\"details.dob\" is required.",
            ),
            (
                vec!["first_name", "last_name", "phone", "ssn", "dob"],
                "\"details.address\" should be an Address object.",
            ),
        ];

        let full = full_details();
        for (present, expected) in cases {
            let mut details = serde_json::Map::new();
            for key in &present {
                details.insert(key.to_string(), full[*key].clone());
            }
            let err = validate_customer_details(&Value::Object(details), None).unwrap_err();
            assert_eq!(err.to_string(), expected, "present fields: {present:?}");
        }
    }

    #[test]
    fn test_address_field_order() {
        let mut details = full_details();
        details["address"] = json!({});
        let err = validate_customer_details(&details, None).unwrap_err();
        assert_eq!(err.to_string(), "\"details.address.street1\" is required.");

        details["address"] = json!({ "street1": "123 Abc St." });
        let err = validate_customer_details(&details, None).unwrap_err();
        assert_eq!(err.to_string(), "\"details.address.city\" is required.");

        details["address"] = json!({ "street1": "123 Abc St.", "city": "Chicago" });
        let err = validate_customer_details(&details, None).unwrap_err();
        assert_eq!(err.to_string(), "\"details.address.state\" is required.");

        details["address"] = json!({ "street1": "a", "city": "b", "state": "IL" });
        let err = validate_customer_details(&details, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"details.address.postal_code\" is required."
        );
    }

    #[test]
    fn test_invalid_ssn_format() {
        let mut details = full_details();
        details["ssn"] = json!("111223333");
        let err = validate_customer_details(&details, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"details.ssn\" should be formatted as ###-##-####"
        );
    }

    #[test]
    fn test_business_name_required_only_for_sole_proprietor() {
        let details = full_details();
        assert!(validate_customer_details(&details, None).is_ok());
        assert!(validate_customer_details(&details, Some(CustomerType::Unaffiliated)).is_ok());

        let err =
            validate_customer_details(&details, Some(CustomerType::SoleProprietor)).unwrap_err();
        assert_eq!(err.to_string(), "\"details.business_name\" is required.");

        let partial = json!({ "first_name": "Olive", "last_name": "Oyl" });
        let err =
            validate_customer_details(&partial, Some(CustomerType::SoleProprietor)).unwrap_err();
        assert_eq!(err.to_string(), "\"details.business_name\" is required.");

        let mut with_business = full_details();
        with_business["business_name"] = json!("Oyl Inc.");
        assert!(
            validate_customer_details(&with_business, Some(CustomerType::SoleProprietor)).is_ok()
        );
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let mut details = full_details();
        details["phone"] = json!("   ");
        let err = validate_customer_details(&details, None).unwrap_err();
        assert_eq!(err.to_string(), "\"details.phone\" is required.");
    }

    #[test]
    fn test_acknowledgement_validation() {
        let valid = json!({
            "document_uid": "Yqyjk5b2xgQ9FrxS",
            "accept": "yes",
            "user_name": "Olive Oyl",
            "ip_address": "152.32.111.61"
        });
        assert!(validate_acknowledgement(&valid, "").is_ok());

        let mut doc = valid.clone();
        doc["accept"] = json!("maybe");
        let err = validate_acknowledgement(&doc, "").unwrap_err();
        assert_eq!(err.to_string(), "\"accept\" should be \"yes\" or \"no\".");

        let mut doc = valid.clone();
        doc["ip_address"] = json!("not-an-ip");
        let err = validate_acknowledgement(&doc, "documents[1].").unwrap_err();
        assert_eq!(err.to_string(), "\"documents[1].ip_address\" is invalid.");

        let mut doc = valid;
        doc["document_uid"] = json!("");
        let err = validate_acknowledgement(&doc, "").unwrap_err();
        assert_eq!(err.to_string(), "\"document_uid\" is required.");
    }

    #[test]
    fn test_query_must_be_object() {
        let err = validate_query(&json!(""), &TEST_SCHEMA).unwrap_err();
        assert_eq!(err.to_string(), "\"query\" must be a TestQuery object.");
    }

    #[test]
    fn test_query_enum_lists_allowed_values() {
        let err = validate_query(&json!({ "status": " " }), &TEST_SCHEMA).unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"status\" query must be a string. Accepted values are: active | archived"
        );

        let err = validate_query(&json!({ "type": ["fee", "bogus"] }), &TEST_SCHEMA).unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"type\" query must be an array of strings. Accepted values are: fee | other"
        );
    }

    #[test]
    fn test_query_scalar_types() {
        let err = validate_query(&json!({ "locked": " " }), &TEST_SCHEMA).unwrap_err();
        assert_eq!(err.to_string(), "\"locked\" query must be boolean.");

        let err = validate_query(&json!({ "locked": "true" }), &TEST_SCHEMA).unwrap_err();
        assert_eq!(err.to_string(), "\"locked\" query must be boolean.");

        let err = validate_query(&json!({ "first_name": null }), &TEST_SCHEMA).unwrap_err();
        assert_eq!(err.to_string(), "\"first_name\" query must be a string.");

        let err = validate_query(&json!({ "limit": " " }), &TEST_SCHEMA).unwrap_err();
        assert_eq!(err.to_string(), "\"limit\" query must be an integer.");

        let err = validate_query(&json!({ "limit": 1.5 }), &TEST_SCHEMA).unwrap_err();
        assert_eq!(err.to_string(), "\"limit\" query must be an integer.");

        let err = validate_query(&json!({ "limit": 4_294_967_296u64 }), &TEST_SCHEMA).unwrap_err();
        assert_eq!(err.to_string(), "\"limit\" query must be an integer.");

        let err = validate_query(&json!({ "amount_min": "5" }), &TEST_SCHEMA).unwrap_err();
        assert_eq!(err.to_string(), "\"amount_min\" query must be a number.");
    }

    #[test]
    fn test_query_string_arrays() {
        for bad in [json!([]), json!(["test", null]), json!("test"), json!([1])] {
            let err = validate_query(&json!({ "pool_uid": bad }), &TEST_SCHEMA).unwrap_err();
            assert_eq!(err.to_string(), "\"pool_uid\" query must be an array of strings.");
        }
        assert!(validate_query(&json!({ "pool_uid": ["a", "b"] }), &TEST_SCHEMA).is_ok());
    }

    #[test]
    fn test_query_first_failure_follows_schema_order() {
        let query = json!({ "limit": "x", "status": "bogus" });
        let err = validate_query(&query, &TEST_SCHEMA).unwrap_err();
        assert!(err.to_string().starts_with("\"status\" query"));
    }

    #[test]
    fn test_unknown_query_fields_ignored() {
        assert!(validate_query(&json!({ "whatever": [null] }), &TEST_SCHEMA).is_ok());
        let pairs = query_pairs(&json!({ "whatever": 1, "limit": 5 }), &TEST_SCHEMA);
        assert_eq!(pairs, vec![("limit".to_string(), "5".to_string())]);
    }

    #[test]
    fn test_query_pairs_normalization() {
        let query = json!({
            "pool_uid": ["p1", "p2"],
            "locked": false,
            "status": "active",
            "limit": 50
        });
        let pairs = query_pairs(&query, &TEST_SCHEMA);
        let expected: Vec<(String, String)> = [
            ("status", "active"),
            ("locked", "false"),
            ("pool_uid[]", "p1"),
            ("pool_uid[]", "p2"),
            ("limit", "50"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(pairs, expected);
    }
}
