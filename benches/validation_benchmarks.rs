use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::json;

use rize_client::RizeClient;
use rize_client::domain::validation::validate_customer_details;
use rize_client::domain::{
    CustomerListQuery, CustomerSort, CustomerStatus, HttpMethod, ListQuery, TransactionListQuery,
    TransactionStatus, TransactionType,
};
use rize_client::test_utils::MockTransport;

fn bench_customer_details(c: &mut Criterion) {
    let details = json!({
        "first_name": "Olive",
        "last_name": "Oyl",
        "phone": "5555551212",
        "ssn": "111-22-3333",
        "dob": "1990-01-31",
        "address": {
            "street1": "123 Abc St.",
            "city": "Chicago",
            "state": "IL",
            "postal_code": "60654"
        }
    });

    c.bench_function("validate_customer_details", |b| {
        b.iter(|| {
            let _ = validate_customer_details(black_box(&details), None);
        })
    });
}

fn bench_query_normalization(c: &mut Criterion) {
    let customers = CustomerListQuery {
        status: Some(CustomerStatus::Active),
        locked: Some(false),
        pool_uid: Some(vec!["pool1".to_string(), "pool2".to_string()]),
        limit: Some(100),
        sort: Some(CustomerSort::LastNameAsc),
        ..Default::default()
    };
    let transactions = TransactionListQuery {
        customer_uid: Some(vec!["c1".to_string()]),
        transaction_type: Some(vec![TransactionType::CardPurchase, TransactionType::Fee]),
        status: Some(vec![TransactionStatus::Settled]),
        ..Default::default()
    };
    let raw = json!({ "status": "active", "include_initiated": true, "limit": 50 });

    c.bench_function("customer_query_pairs", |b| {
        b.iter(|| black_box(&customers).to_query_pairs())
    });
    c.bench_function("transaction_query_pairs", |b| {
        b.iter(|| black_box(&transactions).to_query_pairs())
    });
    c.bench_function("customer_query_from_value", |b| {
        b.iter(|| CustomerListQuery::from_value(black_box(raw.clone())))
    });
}

fn bench_get_list_round_trip(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let transport = Arc::new(MockTransport::new().with_response(
        HttpMethod::Get,
        "/customers",
        json!({ "total_count": 0, "count": 0, "limit": 100, "offset": 0, "data": [] }),
    ));
    let client = RizeClient::with_transport(transport);
    let query = CustomerListQuery {
        status: Some(CustomerStatus::Active),
        ..Default::default()
    };

    c.bench_function("customer_get_list_mock", |b| {
        b.to_async(&runtime)
            .iter(|| async { client.customer.get_list(black_box(&query)).await })
    });
}

criterion_group!(
    benches,
    bench_customer_details,
    bench_query_normalization,
    bench_get_list_round_trip
);
criterion_main!(benches);
