//! Error types for host/internal value conversion.
//!
//! Every failed conversion is the same condition, [`TypeConversion`]. How it reaches the
//! caller is decided once, at the public entry point, by [`ExceptionMode`]: either as a
//! host-native error object ([`HostError`]) or as the internal condition itself.

use crate::host::HostKind;
use crate::types::Kind;
use thiserror::Error;

/// Message carried by host-native error objects.
pub const HOST_ERROR_MESSAGE: &str = "Cannot convert data type.";

/// A value's kind has no mapping in the target model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TypeConversion {
    /// Host kinds such as symbols, functions and bigints have no internal counterpart.
    #[error("host {0} values have no internal representation")]
    UnsupportedHost(HostKind),

    /// Internal kinds such as `data` have no host counterpart.
    #[error("internal {0} values have no host representation")]
    UnsupportedInternal(Kind),

    /// A host date whose time value is NaN or outside the representable range.
    #[error("date time value {0} is out of range")]
    InvalidDate(f64),

    /// A host value that cannot be coerced into an object property key.
    #[error("host {0} value cannot be used as a property key")]
    InvalidPropertyKey(HostKind),

    /// A typed entry point produced a value of a different kind than requested.
    #[error("expected {expected}, found {found}")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },
}

/// An error object raised through the host runtime's native error channel.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct HostError {
    message: String,
    #[source]
    cause: TypeConversion,
}

impl HostError {
    /// Wrap a conversion failure as the host's "Cannot convert data type." error.
    pub fn cannot_convert(cause: TypeConversion) -> Self {
        Self {
            message: HOST_ERROR_MESSAGE.to_string(),
            cause,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> &TypeConversion {
        &self.cause
    }
}

/// What the public conversion functions return on failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranscodeError {
    /// Presented as a host-native error object.
    #[error(transparent)]
    Host(HostError),

    /// Presented as the generic internal type-conversion failure.
    #[error("type conversion failed: {0}")]
    TypeConversion(#[from] TypeConversion),
}

impl TranscodeError {
    /// The underlying condition, identical under both presentations.
    pub fn condition(&self) -> &TypeConversion {
        match self {
            TranscodeError::Host(err) => err.cause(),
            TranscodeError::TypeConversion(err) => err,
        }
    }

    pub fn is_host(&self) -> bool {
        matches!(self, TranscodeError::Host(_))
    }
}

/// Selects how a [`TypeConversion`] is presented to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExceptionMode {
    /// Raise a [`HostError`] carrying [`HOST_ERROR_MESSAGE`].
    HostNative,
    /// Raise the [`TypeConversion`] itself.
    #[default]
    Internal,
}

impl ExceptionMode {
    /// Resolve a conversion failure into its caller-facing form.
    pub fn present(self, err: TypeConversion) -> TranscodeError {
        tracing::debug!(mode = ?self, error = %err, "type conversion failed");
        match self {
            ExceptionMode::HostNative => TranscodeError::Host(HostError::cannot_convert(err)),
            ExceptionMode::Internal => TranscodeError::TypeConversion(err),
        }
    }
}

impl From<bool> for ExceptionMode {
    fn from(host_native_exceptions: bool) -> Self {
        if host_native_exceptions {
            ExceptionMode::HostNative
        } else {
            ExceptionMode::Internal
        }
    }
}

/// Errors from the extended-JSON bridge for host values.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The input string was not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A `$`-marker object whose payload has the wrong shape.
    #[error("invalid {marker} marker: {message}")]
    Marker {
        marker: &'static str,
        message: String,
    },
}

/// Convenience alias used throughout typebridge-core.
pub type Result<T> = std::result::Result<T, TranscodeError>;
