//! Property tests for the grouping laws: stable ordering, uniform depth,
//! grouping correctness and completeness.

use std::collections::BTreeMap;

use ironnest::record::render_key;
use ironnest::testing::{assert_complete, assert_uniform_depth};
use ironnest::{GroupingKeys, Record, build_path, sort_records, transform};
use proptest::prelude::*;
use serde_json::{Value, json};

/// Rows of `(a, b)` grouping values; each becomes a record tagged with its
/// input position as `id`.
fn arb_rows() -> impl Strategy<Value = Vec<(i64, String)>> {
    proptest::collection::vec((0i64..3, "[xy]{1,2}"), 0..40)
}

fn to_records(rows: &[(i64, String)]) -> Vec<Record> {
    rows.iter()
        .enumerate()
        .map(|(id, (a, b))| {
            let mut r = Record::new();
            r.insert("a".into(), json!(a));
            r.insert("b".into(), json!(b));
            r.insert("id".into(), json!(id));
            r
        })
        .collect()
}

fn arb_keys() -> impl Strategy<Value = Vec<&'static str>> {
    prop_oneof![
        Just(vec!["a"]),
        Just(vec!["b"]),
        Just(vec!["a", "b"]),
        Just(vec!["b", "a"]),
    ]
}

fn ids(records: &[Record]) -> Vec<u64> {
    records.iter().filter_map(|r| r["id"].as_u64()).collect()
}

proptest! {
    #[test]
    fn prop_sort_is_stable_and_idempotent(rows in arb_rows(), keys in arb_keys()) {
        let keys = GroupingKeys::new(keys).unwrap();
        let once = sort_records(to_records(&rows), &keys).unwrap();
        let twice = sort_records(once.clone(), &keys).unwrap();
        prop_assert_eq!(&once, &twice);

        for pair in once.windows(2) {
            let same_tuple = keys.iter().all(|k| pair[0][k.as_str()] == pair[1][k.as_str()]);
            if same_tuple {
                prop_assert!(pair[0]["id"].as_u64() < pair[1]["id"].as_u64());
            }
        }
    }

    #[test]
    fn prop_every_leaf_is_key_count_deep(rows in arb_rows(), keys in arb_keys()) {
        let keys = GroupingKeys::new(keys).unwrap();
        let tree = transform(to_records(&rows), &keys).unwrap();
        assert_uniform_depth(&tree, keys.len());
        if !rows.is_empty() {
            prop_assert_eq!(tree.depth(), Some(keys.len()));
        }
    }

    #[test]
    fn prop_records_are_grouped_by_tuple_in_input_order(rows in arb_rows(), keys in arb_keys()) {
        let keys = GroupingKeys::new(keys).unwrap();
        let records = to_records(&rows);

        let mut expected: BTreeMap<Vec<String>, Vec<u64>> = BTreeMap::new();
        for (id, r) in records.iter().enumerate() {
            let tuple = keys.iter().map(|k| render_key(&r[k.as_str()])).collect();
            expected.entry(tuple).or_default().push(id as u64);
        }

        let tree = transform(records, &keys).unwrap();
        let actual: BTreeMap<Vec<String>, Vec<u64>> = tree
            .leaves()
            .map(|(path, leaf)| (path.into_iter().map(String::from).collect(), ids(leaf)))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_every_record_appears_once(rows in arb_rows(), keys in arb_keys()) {
        let keys = GroupingKeys::new(keys).unwrap();
        let tree = transform(to_records(&rows), &keys).unwrap();
        assert_complete(&tree, rows.len());

        let mut seen: Vec<u64> = tree.leaves().flat_map(|(_, leaf)| ids(leaf)).collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..rows.len() as u64).collect::<Vec<_>>());

        for (_, leaf) in tree.leaves() {
            for r in leaf {
                prop_assert!(keys.iter().all(|k| !r.contains_key(k.as_str())));
            }
        }
    }

    #[test]
    fn prop_build_path_is_deterministic(values in proptest::collection::vec(0i64..5, 0..6)) {
        let values: Vec<Value> = values.into_iter().map(|v| json!(v)).collect();
        let mut residual = Record::new();
        residual.insert("x".into(), json!(1));
        prop_assert_eq!(build_path(&values, residual.clone()), build_path(&values, residual));
    }
}
