//! Pre-built records for exercising transforms.

use crate::record::Record;
use serde_json::{Value, json};

/// Convert a JSON array of objects into records.
///
/// # Panics
/// Panics if `value` is not an array of objects.
///
/// ```
/// use ironnest::testing::records;
/// use serde_json::json;
///
/// let rs = records(json!([{"a": 1}, {"a": 2}]));
/// assert_eq!(rs.len(), 2);
/// ```
#[must_use]
pub fn records(value: Value) -> Vec<Record> {
    let items = match value {
        Value::Array(items) => items,
        other => panic!("expected a JSON array of records, got {other}"),
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(r) => r,
            other => panic!("expected a JSON object record, got {other}"),
        })
        .collect()
}

/// Build a single record from a JSON object.
///
/// # Panics
/// Panics if `value` is not an object.
#[must_use]
pub fn record(value: Value) -> Record {
    match value {
        Value::Object(r) => r,
        other => panic!("expected a JSON object record, got {other}"),
    }
}

/// Six money transfers across four countries and four currencies, in an
/// order that is not sorted on any field.
///
/// Two London rows differ only by currency (`GBP` and the deliberately
/// misspelled `FBP`), which splits them under `currency` but joins them
/// under `city`.
#[must_use]
pub fn sample_transactions() -> Vec<Record> {
    records(json!([
        {"country": "US", "city": "Boston", "currency": "USD", "amount": 100},
        {"country": "FR", "city": "Paris", "currency": "EUR", "amount": 20},
        {"country": "FR", "city": "Lyon", "currency": "EUR", "amount": 11.4},
        {"country": "ES", "city": "Madrid", "currency": "EUR", "amount": 8.9},
        {"country": "UK", "city": "London", "currency": "GBP", "amount": 12.2},
        {"country": "UK", "city": "London", "currency": "FBP", "amount": 10.9}
    ]))
}

/// People with a surname and a score; several share a team and surname so
/// leaf lists with more than one entry appear at every depth.
#[must_use]
pub fn sample_roster() -> Vec<Record> {
    records(json!([
        {"team": "ALV", "squad": "ALV2", "surname": "CAN", "number": 2},
        {"team": "ALV", "squad": "ALV1", "surname": "COLL", "number": 8},
        {"team": "VAL", "squad": "VAL1", "surname": "LES", "number": 5},
        {"team": "ALV", "squad": "ALV2", "surname": "DEL", "number": 1}
    ]))
}
