//! Transform Orchestrator: sort, extract every key, build paths, merge.

use crate::error::{NestError, Result};
use crate::extract::extract_key;
use crate::keys::GroupingKeys;
use crate::path::build_path;
use crate::record::Record;
use crate::sort::sort_records;
use crate::tree::{ResultTree, merge};
use serde_json::Value;
use tracing::debug;

/// Group `records` into a tree nested by `keys`, outermost key first.
///
/// Records are consumed; the residual records in the leaf lists are the
/// input records minus every grouping key, in sorted order.
///
/// # Errors
/// - [`NestError::InvalidKey`] if any record lacks a grouping key.
/// - [`NestError::ShapeMismatch`] if extracted values and residual records
///   stop lining up. Sorting has already checked every record for every key,
///   so this only guards the transpose below.
///
/// # Example
/// ```
/// use ironnest::{transform, GroupingKeys, Record};
/// use serde_json::json;
///
/// let records: Vec<Record> = serde_json::from_value(json!([
///     {"country": "FR", "amount": 20},
///     {"country": "FR", "amount": 11.4},
///     {"country": "US", "amount": 100},
/// ]))
/// .unwrap();
///
/// let tree = transform(records, &GroupingKeys::new(["country"]).unwrap()).unwrap();
/// assert_eq!(
///     tree.to_value(),
///     json!({"FR": [{"amount": 20}, {"amount": 11.4}], "US": [{"amount": 100}]})
/// );
/// ```
pub fn transform(records: Vec<Record>, keys: &GroupingKeys) -> Result<ResultTree> {
    debug!(records = records.len(), keys = %keys, "grouping records");
    let mut residuals = sort_records(records, keys)?;

    let mut columns: Vec<Vec<Value>> = Vec::with_capacity(keys.len());
    for key in keys.iter() {
        let extracted = extract_key(key, residuals)?;
        columns.push(extracted.values);
        residuals = extracted.residuals;
    }

    // Unreachable while every record carries every key: extraction never
    // skips a record then. A short column would misalign the transpose.
    if let Some((key, col)) = keys
        .iter()
        .zip(&columns)
        .find(|(_, col)| col.len() != residuals.len())
    {
        return Err(NestError::ShapeMismatch(format!(
            "{} values extracted for `{key}`, {} residual records",
            col.len(),
            residuals.len()
        )));
    }

    let mut columns: Vec<_> = columns.into_iter().map(Vec::into_iter).collect();
    let paths = residuals.into_iter().map(|residual| {
        let row: Vec<Value> = columns.iter_mut().filter_map(Iterator::next).collect();
        build_path(&row, residual)
    });
    let tree = merge(paths)?;
    debug!(
        leaves = tree.leaves().count(),
        depth = ?tree.depth(),
        "grouping finished"
    );
    Ok(tree)
}

/// Convenience wrapper validating a plain key list before [`transform`].
///
/// # Errors
/// [`NestError::InvalidKeySpec`] for an empty or repeated key list, plus
/// everything [`transform`] reports.
pub fn transform_by<I, S>(records: Vec<Record>, keys: I) -> Result<ResultTree>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    transform(records, &GroupingKeys::new(keys)?)
}
