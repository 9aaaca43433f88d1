//! Flattening of filter objects into URL query parameters.
//!
//! List endpoints take their filters as query parameters. Any serializable
//! filter struct is flattened with these rules:
//!
//! - `null` and empty arrays are skipped,
//! - scalars become their string form,
//! - arrays are joined with commas (`status=pending,confirmed`),
//! - nested objects become `{field}{Key}` pairs, so a range
//!   `{ "price": { "min": 10, "max": 50 } }` yields `priceMin=10&priceMax=50`.

use serde::Serialize;
use serde_json::Value;

use crate::error::Error;

/// Flatten a serializable filter object into query pairs.
pub fn to_query_pairs<T: Serialize + ?Sized>(value: &T) -> Result<Vec<(String, String)>, Error> {
    let value = serde_json::to_value(value)
        .map_err(|e| Error::InvalidRequest(format!("filters are not serializable: {e}")))?;

    let Value::Object(map) = value else {
        return match value {
            Value::Null => Ok(Vec::new()),
            other => Err(Error::InvalidRequest(format!(
                "filters must serialize to an object, got {other}"
            ))),
        };
    };

    let mut pairs = Vec::new();
    for (key, value) in map {
        push_pairs(&mut pairs, key, &value);
    }
    Ok(pairs)
}

fn push_pairs(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Array(items) => {
            let joined: Vec<String> = items.iter().filter_map(scalar).collect();
            if !joined.is_empty() {
                pairs.push((key, joined.join(",")));
            }
        }
        Value::Object(map) => {
            for (sub, v) in map {
                push_pairs(pairs, format!("{key}{}", capitalize(sub)), v);
            }
        }
        other => {
            if let Some(s) = scalar(other) {
                pairs.push((key, s));
            }
        }
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
