//! # Ironnest
//!
//! Turn a flat table of JSON records into a **nested tree keyed by column
//! values**: a multi-level `GROUP BY` whose result is a document instead of
//! rows.
//!
//! ## Quick Start
//!
//! ```
//! use ironnest::*;
//! use serde_json::json;
//! # fn main() -> anyhow::Result<()> {
//!
//! let records: Vec<Record> = serde_json::from_value(json!([
//!     {"country": "FR", "currency": "EUR", "amount": 20},
//!     {"country": "ES", "currency": "EUR", "amount": 8.9},
//!     {"country": "US", "currency": "USD", "amount": 100},
//! ]))?;
//!
//! let keys = GroupingKeys::new(["currency", "country"])?;
//! let tree = transform(records, &keys)?;
//!
//! assert_eq!(
//!     tree.to_value(),
//!     json!({
//!         "EUR": {"ES": [{"amount": 8.9}], "FR": [{"amount": 20}]},
//!         "USD": {"US": [{"amount": 100}]}
//!     })
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## How a transform runs
//!
//! 1. [`sort_records`] orders records by their tuple of grouping values
//!    (stable, natural ordering of JSON values, see [`record::OrdValue`]).
//! 2. [`extract_key`] strips each grouping key in turn, collecting its values.
//! 3. [`build_path`] pairs one record's values with its residual record,
//!    giving a single-branch [`NestedPath`].
//! 4. [`merge`] folds all paths into one [`ResultTree`], sharing common key
//!    prefixes and appending to leaf lists when the full prefix matches.
//!
//! Every leaf list sits exactly `keys.len()` levels below the root; branches
//! and leaf entries keep the sorted order of the input.
//!
//! ## Errors
//!
//! The transform stages return [`NestError`]: an unusable key list, a record
//! missing a grouping key, or misaligned intermediate results. The I/O
//! helpers ([`source`], [`sink`], [`config`]) return `anyhow::Result` with
//! context attached.
//!
//! ## Feature Flags
//!
//! - `cli` - Build the `ironnest` command-line binary
//! - `compression-gzip` - Read and write `.gz` files
//! - `compression-zstd` - Read and write `.zst` files
//!
//! ## Module Overview
//!
//! - [`transform`](mod@transform) - the orchestrator
//! - [`sort`], [`extract`], [`path`], [`tree`] - the individual stages
//! - [`keys`] - validated grouping key lists
//! - [`record`] - the record type and value ordering
//! - [`source`] / [`sink`] - reading records and persisting trees
//! - [`config`] - file and environment configuration
//! - [`testing`] - fixtures and tree assertions

pub mod compression;
pub mod config;
pub mod error;
pub mod extract;
pub mod keys;
pub mod path;
pub mod record;
pub mod sink;
pub mod sort;
pub mod source;
pub mod testing;
pub mod transform;
pub mod tree;

pub use error::{NestError, Result};
pub use extract::{Extracted, extract_key};
pub use keys::GroupingKeys;
pub use path::{NestedPath, build_path};
pub use record::Record;
pub use sink::{SinkMode, SinkOptions, SinkOutcome, write_tree, write_tree_to};
pub use sort::sort_records;
pub use source::{read_records, read_records_file};
pub use transform::{transform, transform_by};
pub use tree::{Branch, Node, ResultTree, merge};
