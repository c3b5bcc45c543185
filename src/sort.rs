//! Record Sorter: order records by their tuple of grouping values.

use crate::error::{NestError, Result};
use crate::keys::GroupingKeys;
use crate::record::{OrdValue, Record};
use std::cmp::Ordering;

/// Sort `records` ascending by `(r[keys[0]], r[keys[1]], ...)`.
///
/// The sort is stable: records with an identical key tuple keep their input
/// order. Field presence is never altered.
///
/// # Errors
/// [`NestError::InvalidKey`] naming the first record (by input position) that
/// lacks one of the keys. Presence is checked before any reordering.
///
/// # Example
/// ```
/// use ironnest::{sort_records, GroupingKeys, Record};
/// use serde_json::json;
///
/// let records: Vec<Record> = vec![
///     json!({"country": "US", "amount": 100}),
///     json!({"country": "FR", "amount": 20}),
/// ]
/// .into_iter()
/// .map(|v| v.as_object().cloned().unwrap())
/// .collect();
///
/// let keys = GroupingKeys::new(["country"]).unwrap();
/// let sorted = sort_records(records, &keys).unwrap();
/// assert_eq!(sorted[0]["country"], "FR");
/// ```
pub fn sort_records(mut records: Vec<Record>, keys: &GroupingKeys) -> Result<Vec<Record>> {
    for (i, r) in records.iter().enumerate() {
        if let Some(missing) = keys.iter().find(|k| !r.contains_key(k.as_str())) {
            return Err(NestError::missing_key(missing, i));
        }
    }
    records.sort_by(|a, b| compare_by_keys(a, b, keys));
    Ok(records)
}

/// Compare two records on the key tuple. Both must contain every key.
fn compare_by_keys(a: &Record, b: &Record, keys: &[String]) -> Ordering {
    keys.iter()
        .map(|k| match (a.get(k), b.get(k)) {
            (Some(x), Some(y)) => OrdValue(x).cmp(&OrdValue(y)),
            // unreachable after the presence check
            _ => Ordering::Equal,
        })
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}
