//! The dynamic value model of the embedding host runtime.
//!
//! [`HostValue`] mirrors what a JavaScript engine exposes through its value API: arrays,
//! insertion-ordered objects, strings, doubles, booleans, dates (as time values in
//! milliseconds), `null` and `undefined`. Symbols, functions and bigints are modelled only
//! so that converting them can fail with a proper error.

use crate::error::TypeConversion;
use chrono::DateTime;
use std::fmt;

/// A value in the host runtime's dynamic type system.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    /// Milliseconds since the Unix epoch, UTC. NaN is an invalid date.
    Date(f64),
    Array(Vec<HostValue>),
    Object(HostObject),
    /// A symbol with its optional description.
    Symbol(Option<String>),
    /// A function, identified by name.
    Function(String),
    BigInt(i128),
}

/// Observable kind of a [`HostValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostKind {
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    Date,
    Array,
    Object,
    Symbol,
    Function,
    BigInt,
}

impl HostKind {
    pub fn name(self) -> &'static str {
        match self {
            HostKind::Undefined => "undefined",
            HostKind::Null => "null",
            HostKind::Boolean => "boolean",
            HostKind::Number => "number",
            HostKind::String => "string",
            HostKind::Date => "date",
            HostKind::Array => "array",
            HostKind::Object => "object",
            HostKind::Symbol => "symbol",
            HostKind::Function => "function",
            HostKind::BigInt => "bigint",
        }
    }
}

impl fmt::Display for HostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl HostValue {
    pub fn kind(&self) -> HostKind {
        match self {
            HostValue::Undefined => HostKind::Undefined,
            HostValue::Null => HostKind::Null,
            HostValue::Boolean(_) => HostKind::Boolean,
            HostValue::Number(_) => HostKind::Number,
            HostValue::String(_) => HostKind::String,
            HostValue::Date(_) => HostKind::Date,
            HostValue::Array(_) => HostKind::Array,
            HostValue::Object(_) => HostKind::Object,
            HostValue::Symbol(_) => HostKind::Symbol,
            HostValue::Function(_) => HostKind::Function,
            HostValue::BigInt(_) => HostKind::BigInt,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, HostValue::Undefined)
    }

    /// Coerce this value into an object property key, following the host's `ToString`.
    ///
    /// Symbols are rejected: host objects here are keyed by strings only.
    pub fn to_property_key(&self) -> Result<String, TypeConversion> {
        match self {
            HostValue::Undefined => Ok("undefined".to_string()),
            HostValue::Null => Ok("null".to_string()),
            HostValue::Boolean(b) => Ok(b.to_string()),
            HostValue::Number(n) => Ok(number_to_string(*n)),
            HostValue::String(s) => Ok(s.clone()),
            HostValue::Date(ms) => Ok(date_to_string(*ms)),
            HostValue::Array(items) => {
                let parts = items
                    .iter()
                    .map(|item| match item {
                        HostValue::Undefined | HostValue::Null => Ok(String::new()),
                        other => other.to_property_key(),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(parts.join(","))
            }
            HostValue::Object(_) => Ok("[object Object]".to_string()),
            HostValue::Function(name) => Ok(format!("function {name}() {{ [native code] }}")),
            HostValue::BigInt(n) => Ok(n.to_string()),
            HostValue::Symbol(_) => Err(TypeConversion::InvalidPropertyKey(HostKind::Symbol)),
        }
    }
}

impl From<bool> for HostValue {
    fn from(value: bool) -> Self {
        HostValue::Boolean(value)
    }
}

impl From<f64> for HostValue {
    fn from(value: f64) -> Self {
        HostValue::Number(value)
    }
}

impl From<&str> for HostValue {
    fn from(value: &str) -> Self {
        HostValue::String(value.to_string())
    }
}

impl From<String> for HostValue {
    fn from(value: String) -> Self {
        HostValue::String(value)
    }
}

impl From<Vec<HostValue>> for HostValue {
    fn from(value: Vec<HostValue>) -> Self {
        HostValue::Array(value)
    }
}

impl From<HostObject> for HostValue {
    fn from(value: HostObject) -> Self {
        HostValue::Object(value)
    }
}

/// A host object: string-keyed properties in enumeration (insertion) order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostObject {
    properties: Vec<(String, HostValue)>,
}

impl HostObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            properties: Vec::with_capacity(capacity),
        }
    }

    /// Define or overwrite a property. Overwriting keeps the original enumeration position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<HostValue>) {
        let key = key.into();
        let value = value.into();
        match self.properties.iter_mut().find(|(k, _)| *k == key) {
            Some(property) => property.1 = value,
            None => self.properties.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&HostValue> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Own property names in enumeration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HostValue)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl<K: Into<String>, V: Into<HostValue>> FromIterator<(K, V)> for HostObject {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut object = HostObject::new();
        for (key, value) in iter {
            object.set(key, value);
        }
        object
    }
}

/// Narrowing of a [`HostValue`] to a concrete host type.
pub trait FromHost: Sized {
    const EXPECTED: &'static str;

    fn from_host(value: HostValue) -> Result<Self, HostValue>;
}

impl FromHost for HostValue {
    const EXPECTED: &'static str = "any";

    fn from_host(value: HostValue) -> Result<Self, HostValue> {
        Ok(value)
    }
}

impl FromHost for Vec<HostValue> {
    const EXPECTED: &'static str = "array";

    fn from_host(value: HostValue) -> Result<Self, HostValue> {
        match value {
            HostValue::Array(items) => Ok(items),
            other => Err(other),
        }
    }
}

impl FromHost for HostObject {
    const EXPECTED: &'static str = "object";

    fn from_host(value: HostValue) -> Result<Self, HostValue> {
        match value {
            HostValue::Object(object) => Ok(object),
            other => Err(other),
        }
    }
}

impl FromHost for String {
    const EXPECTED: &'static str = "string";

    fn from_host(value: HostValue) -> Result<Self, HostValue> {
        match value {
            HostValue::String(s) => Ok(s),
            other => Err(other),
        }
    }
}

impl FromHost for f64 {
    const EXPECTED: &'static str = "number";

    fn from_host(value: HostValue) -> Result<Self, HostValue> {
        match value {
            HostValue::Number(n) => Ok(n),
            other => Err(other),
        }
    }
}

impl FromHost for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_host(value: HostValue) -> Result<Self, HostValue> {
        match value {
            HostValue::Boolean(b) => Ok(b),
            other => Err(other),
        }
    }
}

/// Host `Number.prototype.toString()` for radix 10.
fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        let name = if n > 0.0 { "Infinity" } else { "-Infinity" };
        return name.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{n}");
    }
    // Exponential form: Rust prints `1e21` / `1.5e-7`, the host wants `1e+21` / `1.5e-7`.
    let formatted = format!("{n:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}

/// Host `Date.prototype.toString()`, rendered in UTC.
fn date_to_string(ms: f64) -> String {
    if !ms.is_finite() {
        return "Invalid Date".to_string();
    }
    match DateTime::from_timestamp_millis(ms.trunc() as i64) {
        Some(datetime) => datetime
            .format("%a %b %d %Y %H:%M:%S GMT+0000 (Coordinated Universal Time)")
            .to_string(),
        None => "Invalid Date".to_string(),
    }
}
