//! Key Extractor: strip one grouping key from every record.

use crate::error::{NestError, Result};
use crate::record::Record;
use serde_json::Value;

/// Output of [`extract_key`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Extracted {
    /// Removed values, aligned with the non-empty input records.
    pub values: Vec<Value>,
    /// Every input record, in input order, with the key removed.
    pub residuals: Vec<Record>,
}

/// Remove `key` from each record and collect the removed values in order.
///
/// Records are taken by value, so the caller's collection is never mutated
/// behind its back; the residuals come back in [`Extracted::residuals`].
/// A record with no fields left is passed through untouched and contributes
/// no value, so `values.len()` can be smaller than `residuals.len()`.
/// Field order of the remaining fields is kept.
///
/// # Errors
/// [`NestError::InvalidKey`] if a non-empty record lacks `key`.
///
/// ```
/// use ironnest::{extract_key, Record};
/// use serde_json::json;
///
/// let records: Vec<Record> = vec![
///     json!({"currency": "USD", "amount": 100}).as_object().cloned().unwrap(),
///     Record::new(),
/// ];
/// let out = extract_key("currency", records).unwrap();
/// assert_eq!(out.values, vec![json!("USD")]);
/// assert_eq!(out.residuals.len(), 2);
/// ```
pub fn extract_key(key: &str, records: Vec<Record>) -> Result<Extracted> {
    let mut values = Vec::with_capacity(records.len());
    let mut residuals = Vec::with_capacity(records.len());
    for (i, mut r) in records.into_iter().enumerate() {
        if !r.is_empty() {
            let v = r.shift_remove(key).ok_or_else(|| NestError::missing_key(key, i))?;
            values.push(v);
        }
        residuals.push(r);
    }
    Ok(Extracted { values, residuals })
}
