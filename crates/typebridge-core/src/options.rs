//! Conversion options and a [`Transcoder`] that applies them.

use crate::error::{ExceptionMode, Result};
use crate::host::{FromHost, HostValue};
use crate::types::{FromType, Type};
use crate::{inbound, outbound};
use serde::{Deserialize, Serialize};

/// Options shared by every conversion a [`Transcoder`] performs.
///
/// Deserializes from camelCase JSON, e.g. `{"hostNativeExceptions": true}`; missing fields
/// take their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TranscodeOptions {
    /// Raise failures as host-native error objects instead of internal errors.
    pub host_native_exceptions: bool,
}

impl TranscodeOptions {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn mode(&self) -> ExceptionMode {
        ExceptionMode::from(self.host_native_exceptions)
    }
}

/// Runs conversions in both directions with fixed [`TranscodeOptions`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Transcoder {
    options: TranscodeOptions,
}

impl Transcoder {
    pub fn new(options: TranscodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> TranscodeOptions {
        self.options
    }

    pub fn to_internal(&self, value: &HostValue) -> Result<Option<Type>> {
        inbound::to_internal(value, self.options.mode())
    }

    pub fn to_internal_as<T: FromType>(&self, value: &HostValue) -> Result<T> {
        inbound::to_internal_as(value, self.options.mode())
    }

    pub fn to_host(&self, value: &Type) -> Result<HostValue> {
        outbound::to_host(value, self.options.mode())
    }

    pub fn to_host_as<T: FromHost>(&self, value: &Type) -> Result<T> {
        outbound::to_host_as(value, self.options.mode())
    }

    /// Host → internal → host. Absent stays `undefined`.
    pub fn roundtrip(&self, value: &HostValue) -> Result<HostValue> {
        match self.to_internal(value)? {
            Some(internal) => self.to_host(&internal),
            None => Ok(HostValue::Undefined),
        }
    }
}
