//! Assertion functions for result trees.
//!
//! Each assertion panics with the offending path and the full document so a
//! failing test shows what the tree actually looked like.

use crate::tree::{Node, ResultTree};
use serde_json::Value;

/// Assert every leaf list sits exactly `depth` mapping levels below the root.
///
/// # Panics
///
/// Panics if the tree reports a different depth or any leaf path has a
/// different length.
pub fn assert_uniform_depth(tree: &ResultTree, depth: usize) {
    if let Some(actual) = tree.depth() {
        assert_eq!(
            actual,
            depth,
            "Tree depth mismatch:\n  Expected: {depth}\n  Actual: {actual}\n  Tree: {}",
            tree.to_value()
        );
    }
    for (path, _) in tree.leaves() {
        assert_eq!(
            path.len(),
            depth,
            "Leaf at {path:?} has {} levels, expected {depth}\n  Tree: {}",
            path.len(),
            tree.to_value()
        );
    }
}

/// Assert the leaf lists hold `expected` residual records in total and no
/// leaf list is empty.
///
/// # Panics
///
/// Panics if the record count differs or an empty leaf list exists.
pub fn assert_complete(tree: &ResultTree, expected: usize) {
    for (path, records) in tree.leaves() {
        assert!(
            !records.is_empty(),
            "Empty leaf list at {path:?}\n  Tree: {}",
            tree.to_value()
        );
    }
    let actual = tree.record_count();
    assert_eq!(
        actual,
        expected,
        "Record count mismatch:\n  Expected: {expected}\n  Actual: {actual}\n  Tree: {}",
        tree.to_value()
    );
}

/// Assert the leaf list at `path` equals `expected`, in order.
///
/// # Panics
///
/// Panics if `path` does not exist, does not end in a leaf list, or the
/// list differs from `expected`.
///
/// # Example
///
/// ```
/// use ironnest::*;
/// use ironnest::testing::*;
/// use serde_json::json;
///
/// let tree = transform_by(sample_transactions(), ["currency", "country"]).unwrap();
/// assert_leaf(
///     &tree,
///     &["EUR", "FR"],
///     json!([{"city": "Paris", "amount": 20}, {"city": "Lyon", "amount": 11.4}]),
/// );
/// ```
pub fn assert_leaf(tree: &ResultTree, path: &[&str], expected: Value) {
    let Some(node) = tree.get(path) else {
        panic!("No node at {path:?}\n  Tree: {}", tree.to_value());
    };
    let Node::Leaf(records) = node else {
        panic!("Node at {path:?} is a branch, not a leaf list\n  Tree: {}", tree.to_value());
    };
    let actual = Value::Array(records.iter().cloned().map(Value::Object).collect());
    assert_eq!(
        actual, expected,
        "Leaf list mismatch at {path:?}\n  Expected: {expected}\n  Actual: {actual}"
    );
}

/// Assert the keys of the branch at `path` (the root for an empty path)
/// appear in exactly this order.
///
/// # Panics
///
/// Panics if `path` does not lead to a branch or the key order differs.
pub fn assert_keys_in_order(tree: &ResultTree, path: &[&str], expected: &[&str]) {
    let branch = if path.is_empty() {
        tree.root()
    } else {
        match tree.get(path) {
            Some(Node::Branch(b)) => b,
            _ => panic!("No branch at {path:?}\n  Tree: {}", tree.to_value()),
        }
    };
    let actual: Vec<&str> = branch.keys().collect();
    assert_eq!(
        actual, expected,
        "Key order mismatch at {path:?}\n  Expected: {expected:?}\n  Actual: {actual:?}"
    );
}
