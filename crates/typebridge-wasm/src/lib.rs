//! WASM bindings for typebridge-core.
//!
//! Marshals real JavaScript values into the core's host model, runs the conversion and
//! marshals the result back. With `hostNativeExceptions` set, failures throw a JS `Error`
//! with the message `Cannot convert data type.`; otherwise they throw a string describing
//! the type-conversion failure.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p typebridge-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/typebridge-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/typebridge_wasm.wasm
//! ```

use js_sys::{Array, Object, Reflect};
use typebridge_core::{ExceptionMode, HostObject, HostValue, TranscodeError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Convert a JS value to the internal representation.
///
/// Returns the kind-tagged internal tree as a JSON string, or `undefined` when the input
/// is `undefined`.
#[wasm_bindgen(js_name = "toInternal")]
pub fn to_internal(value: JsValue, host_native_exceptions: bool) -> Result<JsValue, JsValue> {
    let host = host_from_js(&value)?;
    let mode = ExceptionMode::from(host_native_exceptions);
    match typebridge_core::to_internal(&host, mode).map_err(present)? {
        Some(internal) => serde_json::to_string(&internal)
            .map(|json| JsValue::from_str(&json))
            .map_err(|e| JsValue::from_str(&e.to_string())),
        None => Ok(JsValue::UNDEFINED),
    }
}

/// Convert a JS value to the internal representation and back.
///
/// The result shows exactly what survives the trip: `undefined` entries are gone,
/// integral numbers are unchanged and dates keep their time value.
#[wasm_bindgen]
pub fn roundtrip(value: JsValue, host_native_exceptions: bool) -> Result<JsValue, JsValue> {
    let host = host_from_js(&value)?;
    let mode = ExceptionMode::from(host_native_exceptions);
    let back = match typebridge_core::to_internal(&host, mode).map_err(present)? {
        Some(internal) => typebridge_core::to_host(&internal, mode).map_err(present)?,
        None => HostValue::Undefined,
    };
    host_to_js(&back)
}

// ---------------------------------------------------------------------------
// Error presentation
// ---------------------------------------------------------------------------

fn present(err: TranscodeError) -> JsValue {
    match err {
        TranscodeError::Host(host) => js_sys::Error::new(host.message()).into(),
        TranscodeError::TypeConversion(cause) => {
            JsValue::from_str(&format!("TypeConversionException: {cause}"))
        }
    }
}

// ---------------------------------------------------------------------------
// JsValue <-> HostValue
// ---------------------------------------------------------------------------

/// Read a JS value into the host model. Only fails if a property getter throws.
fn host_from_js(value: &JsValue) -> Result<HostValue, JsValue> {
    if value.is_undefined() {
        return Ok(HostValue::Undefined);
    }
    if value.is_null() {
        return Ok(HostValue::Null);
    }
    if Array::is_array(value) {
        let array: &Array = value.unchecked_ref();
        let items = array
            .iter()
            .map(|item| host_from_js(&item))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(HostValue::Array(items));
    }
    if let Some(b) = value.as_bool() {
        return Ok(HostValue::Boolean(b));
    }
    if let Some(date) = value.dyn_ref::<js_sys::Date>() {
        return Ok(HostValue::Date(date.get_time()));
    }
    if let Some(n) = value.as_f64() {
        return Ok(HostValue::Number(n));
    }
    if let Some(s) = value.as_string() {
        return Ok(HostValue::String(s));
    }
    if let Some(symbol) = value.dyn_ref::<js_sys::Symbol>() {
        let description = js_sys::Reflect::get(symbol, &JsValue::from_str("description"))
            .ok()
            .and_then(|d| d.as_string());
        return Ok(HostValue::Symbol(description));
    }
    if let Some(function) = value.dyn_ref::<js_sys::Function>() {
        return Ok(HostValue::Function(function.name().into()));
    }
    if value.is_bigint() {
        let bigint: &js_sys::BigInt = value.unchecked_ref();
        // Magnitudes beyond i128 only affect diagnostics; bigints never convert.
        let n = bigint
            .to_string(10)
            .ok()
            .and_then(|digits| String::from(digits).parse::<i128>().ok())
            .unwrap_or_default();
        return Ok(HostValue::BigInt(n));
    }

    let object: &Object = value.unchecked_ref();
    let keys = Object::keys(object);
    let mut properties = HostObject::with_capacity(keys.length() as usize);
    for key in keys.iter() {
        let item = Reflect::get(object, &key)?;
        if let Some(name) = key.as_string() {
            properties.set(name, host_from_js(&item)?);
        }
    }
    Ok(HostValue::Object(properties))
}

fn host_to_js(value: &HostValue) -> Result<JsValue, JsValue> {
    Ok(match value {
        HostValue::Undefined => JsValue::UNDEFINED,
        HostValue::Null => JsValue::NULL,
        HostValue::Boolean(b) => JsValue::from_bool(*b),
        HostValue::Number(n) => JsValue::from_f64(*n),
        HostValue::String(s) => JsValue::from_str(s),
        HostValue::Date(ms) => js_sys::Date::new(&JsValue::from_f64(*ms)).into(),
        HostValue::Array(items) => {
            let array = Array::new_with_length(items.len() as u32);
            for (index, item) in items.iter().enumerate() {
                array.set(index as u32, host_to_js(item)?);
            }
            array.into()
        }
        HostValue::Object(properties) => {
            let object = Object::new();
            for (key, item) in properties.iter() {
                Reflect::set(&object, &JsValue::from_str(key), &host_to_js(item)?)?;
            }
            object.into()
        }
        HostValue::Symbol(description) => JsValue::symbol(description.as_deref()),
        HostValue::BigInt(n) => JsValue::from(*n),
        HostValue::Function(name) => {
            return Err(js_sys::Error::new(&format!("cannot create host function {name}")).into())
        }
    })
}
