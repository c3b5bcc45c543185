//! The ordered list of grouping keys.

use crate::error::{NestError, Result};
use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;

/// An ordered, non-empty list of distinct field names.
///
/// Position defines nesting depth: `keys[0]` is the outermost tree level and
/// the last key is the level directly above the leaf lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupingKeys(Vec<String>);

impl GroupingKeys {
    /// Validate and wrap a key list.
    ///
    /// # Errors
    /// [`NestError::InvalidKeySpec`] if the list is empty, contains an empty
    /// name, or names the same key twice.
    ///
    /// ```
    /// use ironnest::GroupingKeys;
    ///
    /// let keys = GroupingKeys::new(["currency", "country"]).unwrap();
    /// assert_eq!(keys.len(), 2);
    /// assert!(GroupingKeys::new(Vec::<String>::new()).is_err());
    /// ```
    pub fn new<I, S>(keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        if keys.is_empty() {
            return Err(NestError::InvalidKeySpec(
                "at least one grouping key is required".into(),
            ));
        }
        let mut seen = HashSet::with_capacity(keys.len());
        for k in &keys {
            if k.is_empty() {
                return Err(NestError::InvalidKeySpec("empty key name".into()));
            }
            if !seen.insert(k.as_str()) {
                return Err(NestError::InvalidKeySpec(format!("key `{k}` is repeated")));
            }
        }
        Ok(Self(keys))
    }

    /// Build a key list from a URL query string: parameter names are the keys,
    /// in the order given, and any values are ignored.
    ///
    /// ```
    /// use ironnest::GroupingKeys;
    ///
    /// let keys = GroupingKeys::from_query("?currency&country=").unwrap();
    /// assert_eq!(keys.as_slice(), ["currency", "country"]);
    /// ```
    pub fn from_query(query: &str) -> Result<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::new(
            query
                .split('&')
                .filter(|pair| !pair.is_empty())
                .map(|pair| pair.split_once('=').map_or(pair, |(name, _)| name)),
        )
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Deref for GroupingKeys {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for GroupingKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

impl TryFrom<Vec<String>> for GroupingKeys {
    type Error = NestError;

    fn try_from(keys: Vec<String>) -> Result<Self> {
        Self::new(keys)
    }
}
