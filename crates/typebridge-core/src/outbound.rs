//! Outbound conversion: internal value tree → host value tree.
//!
//! Dispatch is on [`Type::kind`] with a second dispatch on the number subtype. `data` has
//! no host form and fails the whole conversion.

use crate::error::{ExceptionMode, Result, TypeConversion};
use crate::host::{FromHost, HostObject, HostValue};
use crate::types::{Kind, Number, Type};

/// Convert an internal value into a host value.
///
/// # Examples
///
/// ```
/// use typebridge_core::{to_host, Data, ExceptionMode, HostValue, Type};
///
/// let host = to_host(&Type::from(true), ExceptionMode::Internal).unwrap();
/// assert_eq!(host, HostValue::Boolean(true));
///
/// let err = to_host(&Type::Data(Data::from(vec![1, 2])), ExceptionMode::HostNative).unwrap_err();
/// assert_eq!(err.to_string(), "Cannot convert data type.");
/// ```
pub fn to_host(value: &Type, mode: ExceptionMode) -> Result<HostValue> {
    convert(value).map_err(|err| mode.present(err))
}

/// Convert an internal value and narrow the host result to `T`.
pub fn to_host_as<T: FromHost>(value: &Type, mode: ExceptionMode) -> Result<T> {
    convert(value)
        .and_then(|host| {
            T::from_host(host).map_err(|other| TypeConversion::Mismatch {
                expected: T::EXPECTED,
                found: other.kind().name(),
            })
        })
        .map_err(|err| mode.present(err))
}

fn convert(value: &Type) -> std::result::Result<HostValue, TypeConversion> {
    match value {
        Type::Array(items) => items
            .iter()
            .map(convert)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(HostValue::Array),
        Type::Data(_) => Err(TypeConversion::UnsupportedInternal(Kind::Data)),
        Type::Date(date) => Ok(HostValue::Date(date.to_utc().timestamp_millis() as f64)),
        Type::Dictionary(dictionary) => {
            let mut object = HostObject::with_capacity(dictionary.len());
            for (key, value) in dictionary.keys().zip(dictionary.values()) {
                let key = convert(key)?.to_property_key()?;
                let value = convert(value)?;
                object.set(key, value);
            }
            Ok(HostValue::Object(object))
        }
        Type::Null => Ok(HostValue::Null),
        Type::Number(number) => Ok(match number {
            Number::Boolean(b) => HostValue::Boolean(*b),
            Number::Integer(i) => HostValue::Number(*i as f64),
            Number::Float(f) => HostValue::Number(*f),
        }),
        Type::String(s) => Ok(HostValue::String(s.clone())),
    }
}
