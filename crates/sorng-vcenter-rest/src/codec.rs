//! Parameter encoding: query strings for GET, JSON bodies for everything else.
//!
//! Query strings follow the bracket conventions vCenter's `/rest` filters are
//! usually written with (`filter.names[0]=a&filter.names[1]=b`). JSON bodies
//! turn numeric strings into numbers before serialising.

use serde_json::{Number, Value};
use url::form_urlencoded;

use crate::error::VmwareResult;
use crate::types::Params;

/// URL-encode `params` as `application/x-www-form-urlencoded`.
///
/// Nulls are skipped, booleans become `1` / `0`, arrays and objects expand to
/// `key[index]` / `key[field]` pairs.
pub fn build_query(params: &Params) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        append_pairs(&mut serializer, key, value);
    }
    serializer.finish()
}

fn append_pairs(serializer: &mut form_urlencoded::Serializer<'_, String>, key: &str, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(b) => {
            serializer.append_pair(key, if *b { "1" } else { "0" });
        }
        Value::Number(n) => {
            serializer.append_pair(key, &n.to_string());
        }
        Value::String(s) => {
            serializer.append_pair(key, s);
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                append_pairs(serializer, &format!("{key}[{i}]"), item);
            }
        }
        Value::Object(fields) => {
            for (field, item) in fields {
                append_pairs(serializer, &format!("{key}[{field}]"), item);
            }
        }
    }
}

/// Serialise `params` as a JSON object after numeric coercion.
pub fn encode_json_body(params: &Params) -> VmwareResult<String> {
    let body = coerce_numeric(Value::Object(params.clone()));
    Ok(serde_json::to_string(&body)?)
}

/// Recursively replace strings that read as numbers with JSON numbers.
pub fn coerce_numeric(value: Value) -> Value {
    match value {
        Value::String(s) => match numeric_literal(&s) {
            Some(n) => Value::Number(n),
            None => Value::String(s),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(coerce_numeric).collect()),
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(k, v)| (k, coerce_numeric(v)))
                .collect(),
        ),
        other => other,
    }
}

fn numeric_literal(raw: &str) -> Option<Number> {
    let s = raw.trim();
    let plausible = s.bytes().any(|b| b.is_ascii_digit())
        && s
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !plausible {
        return None;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Some(Number::from(i));
    }
    s.parse::<f64>().ok().and_then(Number::from_f64)
}
