//! Extended JSON for host values.
//!
//! Plain JSON maps onto host values directly. Host kinds JSON cannot express are written
//! as single-key marker objects:
//!
//! | Marker | Host value |
//! |---|---|
//! | `{"$date": 1700000000000}` | Date at that time value (ms) |
//! | `{"$undefined": true}` | `undefined` |
//! | `{"$symbol": "desc"}` / `{"$symbol": null}` | Symbol |
//! | `{"$function": "name"}` | Function |
//! | `{"$bigint": "123"}` | BigInt |
//!
//! Object key order is preserved (`serde_json` is built with `preserve_order`).

use crate::error::BridgeError;
use crate::host::{HostObject, HostValue};
use serde_json::{Map, Number, Value};

/// Parse an extended-JSON document into a host value.
pub fn parse_host(json: &str) -> Result<HostValue, BridgeError> {
    let value: Value = serde_json::from_str(json)?;
    host_from_json(value)
}

/// Render a host value as compact extended JSON.
pub fn render_host(value: &HostValue) -> String {
    host_to_json(value).to_string()
}

/// Render a host value as indented extended JSON.
pub fn render_host_pretty(value: &HostValue) -> Result<String, BridgeError> {
    Ok(serde_json::to_string_pretty(&host_to_json(value))?)
}

pub fn host_from_json(value: Value) -> Result<HostValue, BridgeError> {
    Ok(match value {
        Value::Null => HostValue::Null,
        Value::Bool(b) => HostValue::Boolean(b),
        Value::Number(n) => HostValue::Number(number_to_f64(&n)?),
        Value::String(s) => HostValue::String(s),
        Value::Array(items) => HostValue::Array(
            items
                .into_iter()
                .map(host_from_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Value::Object(map) => match single_marker(&map) {
            Some(marker) => parse_marker(marker, map)?,
            None => {
                let mut object = HostObject::with_capacity(map.len());
                for (key, item) in map {
                    object.set(key, host_from_json(item)?);
                }
                HostValue::Object(object)
            }
        },
    })
}

pub fn host_to_json(value: &HostValue) -> Value {
    match value {
        HostValue::Undefined => marker("$undefined", Value::Bool(true)),
        HostValue::Null => Value::Null,
        HostValue::Boolean(b) => Value::Bool(*b),
        HostValue::Number(n) => f64_to_json(*n),
        HostValue::String(s) => Value::String(s.clone()),
        HostValue::Date(ms) => marker("$date", f64_to_json(*ms)),
        HostValue::Array(items) => Value::Array(items.iter().map(host_to_json).collect()),
        HostValue::Object(object) => Value::Object(
            object
                .iter()
                .map(|(key, item)| (key.to_string(), host_to_json(item)))
                .collect(),
        ),
        HostValue::Symbol(description) => marker(
            "$symbol",
            description.clone().map(Value::String).unwrap_or(Value::Null),
        ),
        HostValue::Function(name) => marker("$function", Value::String(name.clone())),
        HostValue::BigInt(n) => marker("$bigint", Value::String(n.to_string())),
    }
}

const MARKERS: [&str; 5] = ["$date", "$undefined", "$symbol", "$function", "$bigint"];

fn single_marker(map: &Map<String, Value>) -> Option<&'static str> {
    if map.len() != 1 {
        return None;
    }
    let key = map.keys().next()?;
    MARKERS.iter().copied().find(|m| *m == key.as_str())
}

fn parse_marker(name: &'static str, map: Map<String, Value>) -> Result<HostValue, BridgeError> {
    let payload = map.into_iter().next().map(|(_, v)| v).unwrap_or(Value::Null);
    let invalid = |message: &str| BridgeError::Marker {
        marker: name,
        message: message.to_string(),
    };
    match (name, payload) {
        ("$date", Value::Number(n)) => Ok(HostValue::Date(number_to_f64(&n)?)),
        ("$date", Value::Null) => Ok(HostValue::Date(f64::NAN)),
        ("$date", _) => Err(invalid("expected a time value in milliseconds")),
        ("$undefined", Value::Bool(true)) => Ok(HostValue::Undefined),
        ("$undefined", _) => Err(invalid("expected true")),
        ("$symbol", Value::String(s)) => Ok(HostValue::Symbol(Some(s))),
        ("$symbol", Value::Null) => Ok(HostValue::Symbol(None)),
        ("$symbol", _) => Err(invalid("expected a description string or null")),
        ("$function", Value::String(s)) => Ok(HostValue::Function(s)),
        ("$function", _) => Err(invalid("expected a function name")),
        ("$bigint", Value::String(s)) => s
            .parse::<i128>()
            .map(HostValue::BigInt)
            .map_err(|e| invalid(&e.to_string())),
        ("$bigint", _) => Err(invalid("expected a decimal string")),
        _ => Err(invalid("unknown marker")),
    }
}

fn marker(name: &str, payload: Value) -> Value {
    let mut map = Map::new();
    map.insert(name.to_string(), payload);
    Value::Object(map)
}

fn number_to_f64(n: &Number) -> Result<f64, BridgeError> {
    n.as_f64().ok_or_else(|| BridgeError::Marker {
        marker: "number",
        message: format!("{n} is not representable as a double"),
    })
}

/// Integral doubles are written without a fraction; non-finite values become `null`.
fn f64_to_json(n: f64) -> Value {
    if n == n.trunc() && n.abs() < 9.007_199_254_740_992e15 {
        return Value::Number(Number::from(n as i64));
    }
    Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
}
