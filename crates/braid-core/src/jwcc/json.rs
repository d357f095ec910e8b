//! Projection of a JWCC tree onto plain `serde_json` values.
//!
//! Comments are dropped; member order is preserved. Used for consumers that
//! cannot read JWCC.

use super::{Object, Scalar, Value};

pub fn to_plain(value: &Value) -> serde_json::Value {
    match value {
        Value::Scalar(s) => scalar_to_plain(s),
        Value::Array(a) => serde_json::Value::Array(a.values.iter().map(to_plain).collect()),
        Value::Object(o) => serde_json::Value::Object(to_plain_object(o)),
    }
}

pub fn to_plain_object(obj: &Object) -> serde_json::Map<String, serde_json::Value> {
    obj.members
        .iter()
        .map(|m| (m.key.text().into_owned(), to_plain(&m.value)))
        .collect()
}

fn scalar_to_plain(scalar: &Scalar) -> serde_json::Value {
    // The lexeme is already valid JSON for strings, numbers, booleans, and
    // null; fall back to the decoded text if it somehow is not.
    serde_json::from_str(scalar.raw())
        .unwrap_or_else(|_| serde_json::Value::String(scalar.text().into_owned()))
}
