//! Inbound conversion: host value tree → internal value tree.
//!
//! The walk is depth-first. Children of arrays and objects are converted and collected
//! into an owned buffer before the composite is built, so a failure anywhere aborts the
//! whole conversion and no half-built composite escapes.
//!
//! `undefined` converts to *absent* (`None`). At the top level that is the result; inside a
//! container the element or entry is dropped, never stored as a hole or as `null`.

use crate::error::{ExceptionMode, Result, TypeConversion};
use crate::host::HostValue;
use crate::types::{Date, Dictionary, FromType, Number, Type};

/// Convert a host value into an internal value.
///
/// Returns `Ok(None)` when the value is `undefined`. Unsupported host kinds (symbols,
/// functions, bigints) fail, presented according to `mode`.
///
/// # Examples
///
/// ```
/// use typebridge_core::{to_internal, ExceptionMode, HostValue, Type};
///
/// let value = to_internal(&HostValue::Number(3.0), ExceptionMode::Internal).unwrap();
/// assert_eq!(value, Some(Type::from(3i64)));
///
/// let absent = to_internal(&HostValue::Undefined, ExceptionMode::Internal).unwrap();
/// assert!(absent.is_none());
/// ```
pub fn to_internal(value: &HostValue, mode: ExceptionMode) -> Result<Option<Type>> {
    convert(value).map_err(|err| mode.present(err))
}

/// Convert a host value and narrow the result to `T`.
///
/// Fails if the produced value is not a `T`, including when the input is `undefined`.
pub fn to_internal_as<T: FromType>(value: &HostValue, mode: ExceptionMode) -> Result<T> {
    convert(value)
        .and_then(narrow::<T>)
        .map_err(|err| mode.present(err))
}

fn narrow<T: FromType>(value: Option<Type>) -> std::result::Result<T, TypeConversion> {
    let value = value.ok_or(TypeConversion::Mismatch {
        expected: T::EXPECTED,
        found: "absent",
    })?;
    T::from_type(value).map_err(|other| TypeConversion::Mismatch {
        expected: T::EXPECTED,
        found: other.type_name(),
    })
}

fn convert(value: &HostValue) -> std::result::Result<Option<Type>, TypeConversion> {
    let converted = match value {
        HostValue::Array(items) => {
            let mut elements = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                match convert(item)? {
                    Some(element) => elements.push(element),
                    None => tracing::trace!(index, "skipping undefined array element"),
                }
            }
            Type::Array(elements)
        }
        HostValue::Object(object) => {
            let mut entries = Vec::with_capacity(object.len());
            for (key, item) in object.iter() {
                match convert(item)? {
                    Some(entry) => entries.push((Type::String(key.to_string()), entry)),
                    None => tracing::trace!(key, "skipping undefined object property"),
                }
            }
            Type::Dictionary(entries.into_iter().collect::<Dictionary>())
        }
        HostValue::Boolean(b) => Type::Number(Number::Boolean(*b)),
        HostValue::Date(ms) => {
            Type::Date(Date::from_millis(*ms).ok_or(TypeConversion::InvalidDate(*ms))?)
        }
        HostValue::Null => Type::Null,
        HostValue::Number(n) => Type::Number(Number::infer(*n)),
        HostValue::String(s) => Type::String(s.clone()),
        HostValue::Undefined => return Ok(None),
        HostValue::Symbol(_) | HostValue::Function(_) | HostValue::BigInt(_) => {
            return Err(TypeConversion::UnsupportedHost(value.kind()));
        }
    };
    Ok(Some(converted))
}
