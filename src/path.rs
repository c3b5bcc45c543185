//! Path Builder: one record's grouping values plus its residual record,
//! shaped as a single-branch tree.

use crate::record::{Record, render_key};
use serde_json::Value;

/// A singleton path `{ v0: { v1: { ... : [residual] } } }`.
///
/// The chain of single-key mappings is kept flat as a list of rendered keys;
/// [`NestedPath::to_value`] materializes the nested document.
#[derive(Debug, Clone, PartialEq)]
pub struct NestedPath {
    segments: Vec<String>,
    residual: Record,
}

/// Build the nested path for one record.
///
/// `values` are the record's grouping values in key order and `residual` is
/// what is left of the record. With no values at all the path is just the
/// one-element leaf list `[residual]`.
///
/// ```
/// use ironnest::{build_path, Record};
/// use serde_json::json;
///
/// let residual = json!({"amount": 20}).as_object().cloned().unwrap();
/// let path = build_path(&[json!("EUR"), json!("FR")], residual);
/// assert_eq!(path.to_value(), json!({"EUR": {"FR": [{"amount": 20}]}}));
///
/// let leaf = build_path(&[], Record::new());
/// assert_eq!(leaf.to_value(), json!([{}]));
/// ```
pub fn build_path(values: &[Value], residual: Record) -> NestedPath {
    NestedPath {
        segments: values.iter().map(render_key).collect(),
        residual,
    }
}

impl NestedPath {
    /// Number of mapping levels above the leaf list.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn residual(&self) -> &Record {
        &self.residual
    }

    pub fn into_parts(self) -> (Vec<String>, Record) {
        (self.segments, self.residual)
    }

    /// Materialize the path as a nested JSON document, innermost level first.
    pub fn to_value(&self) -> Value {
        let leaf = Value::Array(vec![Value::Object(self.residual.clone())]);
        self.segments.iter().rev().fold(leaf, |inner, key| {
            let mut level = serde_json::Map::with_capacity(1);
            level.insert(key.clone(), inner);
            Value::Object(level)
        })
    }
}

impl From<NestedPath> for Value {
    fn from(path: NestedPath) -> Self {
        path.to_value()
    }
}
