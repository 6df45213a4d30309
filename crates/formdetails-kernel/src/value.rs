//! Emptiness rules shared by the merger and the normalizer.

use serde_json::Value;

/// Whether a JSON value counts as "present" for inclusion decisions.
///
/// `null`, `false`, `0`, `""`, `[]` and `{}` are empty; everything else is
/// not.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Look up `key` on `value` and return it only when truthy.
pub(crate) fn truthy_member<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|member| is_truthy(member))
}
