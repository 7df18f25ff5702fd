//! JSON text codec for stored values
//!
//! Values are stored as JSON text. Encoding is checked: a value JSON cannot
//! represent faithfully is rejected with `Error::SerializationError` rather
//! than silently rewritten. Rejected inputs are:
//! - non-finite floats (`NaN`, `inf`)
//! - nesting deeper than `Limits::nesting_depth`
//! - integers outside the signed 64-bit range

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::value::Value;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encode a value to stored text
///
/// Anything this accepts, [`decode`] reads back unchanged.
pub fn encode(value: &Value, limits: &Limits) -> Result<String> {
    check_depth(value, limits)?;
    Ok(serde_json::to_string(&to_json(value)?)?)
}

/// Decode stored text into a value
pub fn decode(text: &str) -> Result<Value> {
    let json: serde_json::Value = serde_json::from_str(text)?;
    from_json(json)
}

/// Convert any serializable type into a [`Value`]
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    from_json(serde_json::to_value(value)?)
}

/// Convert a [`Value`] into any deserializable type
pub fn from_value<T: DeserializeOwned>(value: &Value, limits: &Limits) -> Result<T> {
    check_depth(value, limits)?;
    Ok(serde_json::from_value(to_json(value)?)?)
}

fn check_depth(value: &Value, limits: &Limits) -> Result<()> {
    let max = limits.nesting_depth();
    if value.depth() > max {
        return Err(Error::SerializationError(format!(
            "value nesting exceeds maximum depth {}",
            max
        )));
    }
    Ok(())
}

/// Checked conversion from JSON; integers must fit in an `i64`
fn from_json(json: serde_json::Value) -> Result<Value> {
    Ok(match json {
        serde_json::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Value::Int(i),
            _ if n.is_u64() => {
                return Err(Error::SerializationError(format!(
                    "integer {} does not fit in a signed 64-bit value",
                    n
                )))
            }
            (None, Some(f)) => Value::Float(f),
            (None, None) => {
                return Err(Error::SerializationError(format!(
                    "unrepresentable number {}",
                    n
                )))
            }
        },
        serde_json::Value::Array(items) => {
            Value::Array(items.into_iter().map(from_json).collect::<Result<_>>()?)
        }
        serde_json::Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| Ok((k, from_json(v)?)))
                .collect::<Result<_>>()?,
        ),
        other => Value::from(other),
    })
}

fn to_json(value: &Value) -> Result<serde_json::Value> {
    Ok(match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .ok_or_else(|| {
                Error::SerializationError(format!("cannot store non-finite float {}", f))
            })?,
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(items) => serde_json::Value::Array(
            items
                .iter()
                .map(to_json)
                .collect::<Result<_>>()?,
        ),
        Value::Object(map) => serde_json::Value::Object(
            map.iter()
                .map(|(k, v)| Ok((k.clone(), to_json(v)?)))
                .collect::<Result<_>>()?,
        ),
    })
}
