use ironnest::record::{OrdValue, compare_values, render_key};
use serde_json::{Value, json};
use std::cmp::Ordering;

fn sorted(mut values: Vec<Value>) -> Vec<Value> {
    values.sort_by(compare_values);
    values
}

#[test]
fn kinds_order_null_bool_number_string_array_object() {
    assert_eq!(
        sorted(vec![
            json!({"a": 1}),
            json!([1]),
            json!("s"),
            json!(0),
            json!(true),
            json!(null)
        ]),
        vec![
            json!(null),
            json!(true),
            json!(0),
            json!("s"),
            json!([1]),
            json!({"a": 1})
        ]
    );
}

#[test]
fn integers_compare_exactly_and_floats_numerically() {
    assert_eq!(
        compare_values(&json!(u64::MAX), &json!(i64::MIN)),
        Ordering::Greater
    );
    assert_eq!(
        compare_values(&json!(9_007_199_254_740_993u64), &json!(9_007_199_254_740_992u64)),
        Ordering::Greater
    );
    assert_eq!(compare_values(&json!(1), &json!(1.0)), Ordering::Equal);
    assert_eq!(compare_values(&json!(2), &json!(11.5)), Ordering::Less);
    assert_eq!(
        compare_values(&json!(9_007_199_254_740_993u64), &json!(9_007_199_254_740_992.0)),
        Ordering::Greater
    );
}

#[test]
fn arrays_and_objects_compare_element_wise() {
    assert!(OrdValue(&json!([1, 2])) < OrdValue(&json!([1, 3])));
    assert!(OrdValue(&json!([1])) < OrdValue(&json!([1, 0])));
    assert!(OrdValue(&json!({"a": 1})) < OrdValue(&json!({"a": 2})));
    assert_eq!(OrdValue(&json!("x")), OrdValue(&json!("x")));
}

#[test]
fn keys_render_as_json_text_except_strings() {
    assert_eq!(render_key(&json!("EUR")), "EUR");
    assert_eq!(render_key(&json!(100)), "100");
    assert_eq!(render_key(&json!(8.9)), "8.9");
    assert_eq!(render_key(&json!(false)), "false");
    assert_eq!(render_key(&json!(null)), "null");
    assert_eq!(render_key(&json!([1, "a"])), r#"[1,"a"]"#);
}

#[test]
fn equal_numbers_render_the_same_key() {
    assert_eq!(render_key(&json!(1.0)), "1");
    assert_eq!(render_key(&json!(-0.0)), "0");
    assert_eq!(render_key(&json!(-3.0)), render_key(&json!(-3)));
    assert_eq!(render_key(&json!(2.5)), "2.5");
    assert_eq!(render_key(&json!([1.0, {"a": 2.0}])), r#"[1,{"a":2}]"#);

    for (a, b) in [(json!(1), json!(1.0)), (json!([1]), json!([1.0])), (json!(7), json!(7.5))] {
        let same_order = compare_values(&a, &b) == Ordering::Equal;
        assert_eq!(same_order, render_key(&a) == render_key(&b), "{a} vs {b}");
    }
}
