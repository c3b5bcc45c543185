//! Records and the natural ordering of their field values.

use ordered_float::OrderedFloat;
use serde_json::{Number, Value};
use std::cmp::Ordering;

/// A flat record: field name to scalar (or nested) JSON value.
///
/// `serde_json` is built with `preserve_order`, so a record keeps the field
/// order it was parsed with.
pub type Record = serde_json::Map<String, Value>;

/// A borrowed JSON value with a total, natural ordering.
///
/// Values of different kinds order by kind first:
/// `null < bool < number < string < array < object`.
/// Integers, and floats with no fractional part, compare exactly, so `1` and
/// `1.0` are equal. Other floats compare through [`OrderedFloat`].
///
/// # Examples
///
/// ```
/// use ironnest::record::OrdValue;
/// use serde_json::json;
///
/// let (a, b) = (json!(2), json!(11.5));
/// assert!(OrdValue(&a) < OrdValue(&b));
///
/// let (n, s) = (json!(100), json!("1"));
/// assert!(OrdValue(&n) < OrdValue(&s));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct OrdValue<'a>(pub &'a Value);

impl PartialEq for OrdValue<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrdValue<'_> {}

impl PartialOrd for OrdValue<'_> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrdValue<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_values(self.0, other.0)
    }
}

fn kind_rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// The integer `n` denotes exactly, if any.
fn as_integer(n: &Number) -> Option<i128> {
    if let Some(i) = n.as_i64() {
        return Some(i.into());
    }
    if let Some(u) = n.as_u64() {
        return Some(u.into());
    }
    let f = n.as_f64()?;
    (f.fract() == 0.0 && f.abs() < 2f64.powi(127)).then_some(f as i128)
}

fn compare_numbers(a: &Number, b: &Number) -> Ordering {
    match (as_integer(a), as_integer(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => {
            let x = OrderedFloat(a.as_f64().unwrap_or(f64::NAN));
            let y = OrderedFloat(b.as_f64().unwrap_or(f64::NAN));
            x.cmp(&y)
        }
    }
}

/// Compare two JSON values by their natural ordering. See [`OrdValue`].
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(xs), Value::Array(ys)) => xs
            .iter()
            .map(OrdValue)
            .cmp(ys.iter().map(OrdValue)),
        (Value::Object(xs), Value::Object(ys)) => xs
            .iter()
            .map(|(k, v)| (k, OrdValue(v)))
            .cmp(ys.iter().map(|(k, v)| (k, OrdValue(v)))),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

/// Render a grouping value as the key it gets in the result tree.
///
/// Strings are used verbatim; every other value becomes its compact JSON
/// text, so `20` becomes `"20"` and `null` becomes `"null"`. Numbers that
/// compare equal under [`OrdValue`] render the same: `1.0` becomes `"1"`.
///
/// ```
/// use ironnest::record::render_key;
/// use serde_json::json;
///
/// assert_eq!(render_key(&json!("EUR")), "EUR");
/// assert_eq!(render_key(&json!(11.4)), "11.4");
/// assert_eq!(render_key(&json!(1.0)), "1");
/// assert_eq!(render_key(&json!(true)), "true");
/// ```
pub fn render_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match as_integer(n) {
            Some(i) => i.to_string(),
            None => n.to_string(),
        },
        other => canonical(other).to_string(),
    }
}

/// Rewrite integral floats as integers, at any depth.
fn canonical(value: &Value) -> Value {
    match value {
        Value::Number(n) => as_integer(n)
            .and_then(|i| {
                i64::try_from(i)
                    .map(Value::from)
                    .or_else(|_| u64::try_from(i).map(Value::from))
                    .ok()
            })
            .unwrap_or_else(|| value.clone()),
        Value::Array(items) => Value::Array(items.iter().map(canonical).collect()),
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), canonical(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}
