//! Testing utilities for ironnest transforms.
//!
//! - **Fixtures**: the transaction dataset used throughout the test-suite
//! - **Assertions**: check the shape laws a result tree must obey
//!
//! # Quick Start
//!
//! ```
//! use ironnest::*;
//! use ironnest::testing::*;
//!
//! let tree = transform_by(sample_transactions(), ["currency", "country"]).unwrap();
//! assert_uniform_depth(&tree, 2);
//! assert_complete(&tree, sample_transactions().len());
//! ```

pub mod assertions;
pub mod fixtures;

pub use assertions::*;
pub use fixtures::*;
