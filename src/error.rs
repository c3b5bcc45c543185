//! Error taxonomy for the grouping transform.
//!
//! Every variant is fatal to a single [`transform`](crate::transform()) call:
//! no partial tree is returned. I/O-facing layers ([`source`](crate::source),
//! [`sink`](crate::sink), [`config`](crate::config)) report through
//! `anyhow::Error` instead and wrap these errors with context.

use thiserror::Error;

/// Result alias used by the core transform stages.
pub type Result<T, E = NestError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NestError {
    /// The grouping key list cannot be used (empty, blank or repeated keys).
    #[error("invalid grouping key list: {0}")]
    InvalidKeySpec(String),

    /// A record lacks one of the requested grouping keys.
    ///
    /// `record` is the position of the offending record in the sequence the
    /// failing stage was handed.
    #[error("record #{record} has no field `{key}`")]
    InvalidKey { key: String, record: usize },

    /// Extracted key values and residual records do not line up, or a path
    /// disagrees with the depth of the tree it is merged into.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
}

impl NestError {
    /// Whether the failure is caused by the caller's input.
    ///
    /// The core performs no I/O, so every error it raises maps to a client
    /// error at the boundary.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        match self {
            NestError::InvalidKeySpec(_)
            | NestError::InvalidKey { .. }
            | NestError::ShapeMismatch(_) => true,
        }
    }

    pub(crate) fn missing_key(key: &str, record: usize) -> Self {
        NestError::InvalidKey {
            key: key.to_string(),
            record,
        }
    }
}
