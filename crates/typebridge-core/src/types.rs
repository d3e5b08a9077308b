//! The internal typed value hierarchy.
//!
//! [`Type`] is a closed tagged union over the kinds the native library understands. Numbers
//! carry a secondary [`Subtype`] tag, dictionaries keep insertion order and dates keep the
//! offset they were created with.

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use std::fmt;

/// Largest time value (in milliseconds) a host date can hold.
const MAX_TIME_VALUE_MS: f64 = 8.64e15;

/// The runtime tag identifying which variant of [`Type`] a value is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Kind {
    Array,
    Dictionary,
    String,
    Number,
    Date,
    Null,
    Data,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Array => "array",
            Kind::Dictionary => "dictionary",
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Date => "date",
            Kind::Null => "null",
            Kind::Data => "data",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Storage subtype of a [`Number`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Subtype {
    Boolean,
    Integer,
    FloatingPoint,
}

impl Subtype {
    pub fn name(self) -> &'static str {
        match self {
            Subtype::Boolean => "boolean",
            Subtype::Integer => "integer",
            Subtype::FloatingPoint => "floatingPoint",
        }
    }
}

/// An internal value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Type {
    Array(Vec<Type>),
    Dictionary(Dictionary),
    String(String),
    Number(Number),
    Date(Date),
    Null,
    Data(Data),
}

impl Type {
    pub fn kind(&self) -> Kind {
        match self {
            Type::Array(_) => Kind::Array,
            Type::Dictionary(_) => Kind::Dictionary,
            Type::String(_) => Kind::String,
            Type::Number(_) => Kind::Number,
            Type::Date(_) => Kind::Date,
            Type::Null => Kind::Null,
            Type::Data(_) => Kind::Data,
        }
    }

    /// Human-readable name, refined to the subtype for numbers.
    pub fn type_name(&self) -> &'static str {
        match self {
            Type::Number(number) => number.subtype().name(),
            other => other.kind().name(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Type::Null)
    }

    pub fn as_array(&self) -> Option<&[Type]> {
        match self {
            Type::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Type::Dictionary(dictionary) => Some(dictionary),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Type::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Type::Number(number) => Some(number),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&Date> {
        match self {
            Type::Date(date) => Some(date),
            _ => None,
        }
    }
}

impl From<bool> for Type {
    fn from(value: bool) -> Self {
        Type::Number(Number::Boolean(value))
    }
}

impl From<i64> for Type {
    fn from(value: i64) -> Self {
        Type::Number(Number::Integer(value))
    }
}

impl From<f64> for Type {
    fn from(value: f64) -> Self {
        Type::Number(Number::Float(value))
    }
}

impl From<&str> for Type {
    fn from(value: &str) -> Self {
        Type::String(value.to_string())
    }
}

impl From<String> for Type {
    fn from(value: String) -> Self {
        Type::String(value)
    }
}

impl From<Number> for Type {
    fn from(value: Number) -> Self {
        Type::Number(value)
    }
}

impl From<Vec<Type>> for Type {
    fn from(value: Vec<Type>) -> Self {
        Type::Array(value)
    }
}

impl From<Dictionary> for Type {
    fn from(value: Dictionary) -> Self {
        Type::Dictionary(value)
    }
}

impl From<Date> for Type {
    fn from(value: Date) -> Self {
        Type::Date(value)
    }
}

impl From<Data> for Type {
    fn from(value: Data) -> Self {
        Type::Data(value)
    }
}

/// A numeric value tagged with its storage subtype.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "subtype", content = "value")]
pub enum Number {
    #[serde(rename = "boolean")]
    Boolean(bool),
    #[serde(rename = "integer")]
    Integer(i64),
    #[serde(rename = "floatingPoint")]
    Float(f64),
}

impl Number {
    pub fn subtype(&self) -> Subtype {
        match self {
            Number::Boolean(_) => Subtype::Boolean,
            Number::Integer(_) => Subtype::Integer,
            Number::Float(_) => Subtype::FloatingPoint,
        }
    }

    /// Pick the narrowest subtype for a double: integral values that fit an `i64` become
    /// integers, everything else (fractions, NaN, infinities, huge magnitudes) stays float.
    pub fn infer(value: f64) -> Self {
        // i64::MAX is not representable as f64; 2^63 is the first value past the range.
        if value == value.round() && value >= i64::MIN as f64 && value < i64::MAX as f64 {
            Number::Integer(value as i64)
        } else {
            Number::Float(value)
        }
    }
}

/// An insertion-ordered dictionary keyed by arbitrary internal values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dictionary {
    entries: Vec<(Type, Type)>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert or replace. A replaced key keeps its original position.
    pub fn set(&mut self, key: impl Into<Type>, value: impl Into<Type>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &Type) -> Option<&Type> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Keys in insertion order; parallel to [`Dictionary::values`].
    pub fn keys(&self) -> impl Iterator<Item = &Type> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Values in insertion order; parallel to [`Dictionary::keys`].
    pub fn values(&self) -> impl Iterator<Item = &Type> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Type, &Type)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<Type>, V: Into<Type>> FromIterator<(K, V)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dictionary = Dictionary::new();
        for (key, value) in iter {
            dictionary.set(key, value);
        }
        dictionary
    }
}

impl IntoIterator for Dictionary {
    type Item = (Type, Type);
    type IntoIter = std::vec::IntoIter<(Type, Type)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// A point in time together with the offset it was expressed in.
///
/// Equality compares instants, so the same moment in two offsets is equal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Date(DateTime<FixedOffset>);

impl Date {
    pub fn new(datetime: DateTime<FixedOffset>) -> Self {
        Self(datetime)
    }

    /// Build a UTC date from a host time value in milliseconds since the epoch.
    ///
    /// Returns `None` for NaN, infinities and values outside the host date range.
    /// Fractional milliseconds are truncated.
    pub fn from_millis(ms: f64) -> Option<Self> {
        if !ms.is_finite() || ms.abs() > MAX_TIME_VALUE_MS {
            return None;
        }
        DateTime::from_timestamp_millis(ms.trunc() as i64).map(|utc| Self(utc.fixed_offset()))
    }

    pub fn to_utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }

    pub fn millis_since_epoch(&self) -> i64 {
        self.0.timestamp_millis()
    }

    pub fn offset(&self) -> FixedOffset {
        *self.0.offset()
    }

    pub fn datetime(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

impl From<DateTime<Utc>> for Date {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value.fixed_offset())
    }
}

impl From<DateTime<FixedOffset>> for Date {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self(value)
    }
}

/// Opaque binary payload. Has no host representation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Data(Vec<u8>);

impl Data {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for Data {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for Data {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

/// Explicit extraction of a concrete payload from a [`Type`].
///
/// On a kind mismatch the original value is handed back so the caller can report what was
/// found instead.
pub trait FromType: Sized {
    /// Name of the expected kind or subtype, used in mismatch errors.
    const EXPECTED: &'static str;

    fn from_type(value: Type) -> Result<Self, Type>;
}

impl FromType for Type {
    const EXPECTED: &'static str = "any";

    fn from_type(value: Type) -> Result<Self, Type> {
        Ok(value)
    }
}

impl FromType for Vec<Type> {
    const EXPECTED: &'static str = "array";

    fn from_type(value: Type) -> Result<Self, Type> {
        match value {
            Type::Array(items) => Ok(items),
            other => Err(other),
        }
    }
}

impl FromType for Dictionary {
    const EXPECTED: &'static str = "dictionary";

    fn from_type(value: Type) -> Result<Self, Type> {
        match value {
            Type::Dictionary(dictionary) => Ok(dictionary),
            other => Err(other),
        }
    }
}

impl FromType for String {
    const EXPECTED: &'static str = "string";

    fn from_type(value: Type) -> Result<Self, Type> {
        match value {
            Type::String(s) => Ok(s),
            other => Err(other),
        }
    }
}

impl FromType for Number {
    const EXPECTED: &'static str = "number";

    fn from_type(value: Type) -> Result<Self, Type> {
        match value {
            Type::Number(number) => Ok(number),
            other => Err(other),
        }
    }
}

impl FromType for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_type(value: Type) -> Result<Self, Type> {
        match value {
            Type::Number(Number::Boolean(b)) => Ok(b),
            other => Err(other),
        }
    }
}

impl FromType for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_type(value: Type) -> Result<Self, Type> {
        match value {
            Type::Number(Number::Integer(i)) => Ok(i),
            other => Err(other),
        }
    }
}

impl FromType for f64 {
    const EXPECTED: &'static str = "floatingPoint";

    fn from_type(value: Type) -> Result<Self, Type> {
        match value {
            Type::Number(Number::Float(f)) => Ok(f),
            other => Err(other),
        }
    }
}

impl FromType for Date {
    const EXPECTED: &'static str = "date";

    fn from_type(value: Type) -> Result<Self, Type> {
        match value {
            Type::Date(date) => Ok(date),
            other => Err(other),
        }
    }
}

impl FromType for Data {
    const EXPECTED: &'static str = "data";

    fn from_type(value: Type) -> Result<Self, Type> {
        match value {
            Type::Data(data) => Ok(data),
            other => Err(other),
        }
    }
}
