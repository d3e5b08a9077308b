//! # typebridge-core
//!
//! Bidirectional transcoder between a dynamically-typed host runtime's values and a
//! strongly-typed internal value hierarchy.
//!
//! The host side ([`HostValue`]) looks like a JavaScript engine's value API: arrays,
//! objects, strings, doubles, booleans, dates, `null` and `undefined`. The internal side
//! ([`Type`]) is a closed tagged union of arrays, dictionaries, strings, numbers (with a
//! boolean/integer/floating-point subtype), dates, null and opaque data.
//!
//! ## Quick start
//!
//! ```rust
//! use typebridge_core::{to_host, to_internal, ExceptionMode, HostObject, HostValue, Type};
//!
//! let mut object = HostObject::new();
//! object.set("a", HostValue::Undefined);
//! object.set("b", 1.0);
//!
//! // host → internal: undefined entries are dropped, integral numbers become integers
//! let internal = to_internal(&HostValue::Object(object), ExceptionMode::Internal)
//!     .unwrap()
//!     .unwrap();
//! let dictionary = internal.as_dictionary().unwrap();
//! assert_eq!(dictionary.len(), 1);
//! assert_eq!(dictionary.get(&Type::from("b")), Some(&Type::from(1i64)));
//!
//! // internal → host
//! let host = to_host(&internal, ExceptionMode::Internal).unwrap();
//! assert_eq!(typebridge_core::render_host(&host), r#"{"b":1}"#);
//! ```
//!
//! ## Modules
//!
//! - [`inbound`] — host value → internal value
//! - [`outbound`] — internal value → host value
//! - [`types`] — the internal `Type` hierarchy
//! - [`host`] — the host `HostValue` model
//! - [`error`] — the type-conversion condition and its two presentations
//! - [`options`] — `TranscodeOptions` and the `Transcoder` convenience wrapper
//! - [`json`] — extended JSON for feeding host values in from text

pub mod error;
pub mod host;
pub mod inbound;
pub mod json;
pub mod options;
pub mod outbound;
pub mod types;

pub use error::{
    BridgeError, ExceptionMode, HostError, TranscodeError, TypeConversion, HOST_ERROR_MESSAGE,
};
pub use host::{FromHost, HostKind, HostObject, HostValue};
pub use inbound::{to_internal, to_internal_as};
pub use json::{host_from_json, host_to_json, parse_host, render_host, render_host_pretty};
pub use options::{TranscodeOptions, Transcoder};
pub use outbound::{to_host, to_host_as};
pub use types::{Data, Date, Dictionary, FromType, Kind, Number, Subtype, Type};
