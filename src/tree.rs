//! Result tree and the Tree Merger.
//!
//! A [`ResultTree`] maps rendered grouping values to sub-branches, level by
//! level, ending in leaf lists of residual records. Every root-to-leaf path
//! has the same number of levels: one per grouping key. Merging never
//! collapses a single-key level.
//!
//! Branch entries keep first-seen order, which is the sorted order of the
//! records the paths were built from.

use crate::error::{NestError, Result};
use crate::path::NestedPath;
use crate::record::Record;
use indexmap::IndexMap;
use indexmap::map::Iter;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// One level of the tree: either more levels below, or the leaf list.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Branch(Branch),
    Leaf(Vec<Record>),
}

/// An insertion-ordered mapping from rendered key to [`Node`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Branch {
    entries: IndexMap<String, Node>,
}

impl Branch {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(key)
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, n)| (k.as_str(), n))
    }

    fn to_value(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(k, n)| (k.clone(), n.to_value()))
                .collect(),
        )
    }
}

impl Node {
    pub fn as_branch(&self) -> Option<&Branch> {
        match self {
            Node::Branch(b) => Some(b),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&[Record]> {
        match self {
            Node::Leaf(records) => Some(records.as_slice()),
            Node::Branch(_) => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Node::Branch(b) => b.to_value(),
            Node::Leaf(records) => {
                Value::Array(records.iter().cloned().map(Value::Object).collect())
            }
        }
    }
}

/// The merged, nested document produced by a transform.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTree {
    root: Branch,
    depth: Option<usize>,
}

impl ResultTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> &Branch {
        &self.root
    }

    /// Levels of mapping above every leaf list; `None` while the tree is empty.
    pub fn depth(&self) -> Option<usize> {
        self.depth
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Look up the node reached by following `path` from the root.
    ///
    /// An empty path yields `None`; use [`ResultTree::root`] for the top level.
    pub fn get(&self, path: &[&str]) -> Option<&Node> {
        let (first, rest) = path.split_first()?;
        let mut node = self.root.get(first)?;
        for key in rest {
            node = node.as_branch()?.get(key)?;
        }
        Some(node)
    }

    /// Fold one nested path into the tree.
    ///
    /// New keys become new sibling branches after the existing ones; a path
    /// whose full key prefix already exists appends its residual record to
    /// that leaf list.
    ///
    /// # Errors
    /// [`NestError::ShapeMismatch`] if the path has no levels or its depth
    /// differs from the paths already merged. The tree is left unchanged.
    pub fn insert(&mut self, path: NestedPath) -> Result<()> {
        let depth = path.depth();
        if let Some(expected) = self.depth
            && expected != depth
        {
            return Err(NestError::ShapeMismatch(format!(
                "path has {depth} levels, tree has {expected}"
            )));
        }
        let (mut segments, residual) = path.into_parts();
        let Some(leaf_key) = segments.pop() else {
            return Err(NestError::ShapeMismatch(
                "path has no grouping levels".into(),
            ));
        };

        let mut branch = &mut self.root;
        for (level, key) in segments.into_iter().enumerate() {
            branch = match branch
                .entries
                .entry(key)
                .or_insert_with(|| Node::Branch(Branch::default()))
            {
                Node::Branch(b) => b,
                Node::Leaf(_) => {
                    return Err(NestError::ShapeMismatch(format!(
                        "level {level} holds a leaf list"
                    )));
                }
            };
        }
        match branch
            .entries
            .entry(leaf_key)
            .or_insert_with(|| Node::Leaf(Vec::new()))
        {
            Node::Leaf(records) => records.push(residual),
            Node::Branch(_) => {
                return Err(NestError::ShapeMismatch(format!(
                    "level {} holds a branch, not a leaf list",
                    depth - 1
                )));
            }
        }
        self.depth = Some(depth);
        Ok(())
    }

    /// Iterate `(key path, leaf list)` pairs in document order.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            stack: vec![self.root.entries.iter()],
            prefix: Vec::new(),
        }
    }

    /// Total number of residual records across all leaf lists.
    pub fn record_count(&self) -> usize {
        self.leaves().map(|(_, records)| records.len()).sum()
    }

    pub fn to_value(&self) -> Value {
        self.root.to_value()
    }
}

/// Fold a sequence of nested paths into one tree.
///
/// ```
/// use ironnest::{build_path, merge, Record};
/// use serde_json::json;
///
/// let rec = |amount: f64| json!({"amount": amount}).as_object().cloned().unwrap();
/// let tree = merge([
///     build_path(&[json!("EUR"), json!("FR")], rec(20.0)),
///     build_path(&[json!("EUR"), json!("FR")], rec(11.4)),
///     build_path(&[json!("USD"), json!("US")], rec(100.0)),
/// ])
/// .unwrap();
///
/// assert_eq!(
///     tree.to_value(),
///     json!({"EUR": {"FR": [{"amount": 20.0}, {"amount": 11.4}]},
///            "USD": {"US": [{"amount": 100.0}]}})
/// );
/// ```
pub fn merge<I>(paths: I) -> Result<ResultTree>
where
    I: IntoIterator<Item = NestedPath>,
{
    let mut tree = ResultTree::new();
    for path in paths {
        tree.insert(path)?;
    }
    Ok(tree)
}

/// Iterator returned by [`ResultTree::leaves`].
pub struct Leaves<'a> {
    stack: Vec<Iter<'a, String, Node>>,
    prefix: Vec<&'a str>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = (Vec<&'a str>, &'a [Record]);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.stack.last_mut()?;
            match level.next() {
                None => {
                    self.stack.pop();
                    self.prefix.pop();
                }
                Some((key, Node::Leaf(records))) => {
                    let mut path = self.prefix.clone();
                    path.push(key.as_str());
                    return Some((path, records.as_slice()));
                }
                Some((key, Node::Branch(b))) => {
                    self.prefix.push(key.as_str());
                    self.stack.push(b.entries.iter());
                }
            }
        }
    }
}

impl Serialize for Branch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Branch(b) => b.serialize(serializer),
            Node::Leaf(records) => records.serialize(serializer),
        }
    }
}

impl Serialize for ResultTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}
