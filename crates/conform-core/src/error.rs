//! # Error Types
//!
//! Configuration errors use `thiserror` and are returned from constructors.
//! Validation errors are serializable records: a field reports every
//! violation it finds as a [`ValidationError`] in an ordered list.
//!
//! ## Pointers
//!
//! A pointer is a slash-delimited path from the validation root to the
//! offending location, outermost segment first and without a leading slash:
//! index 3 of a list, key `currency` of the element is `3/currency`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable classification of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorCode {
    /// The value has the wrong shape, type, or magnitude.
    Invalid,
    /// A required key is absent.
    Missing,
    /// The value is outside a restricted domain of known values.
    Unknown,
}

impl ErrorCode {
    /// Returns the wire identifier for this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invalid => "INVALID",
            Self::Missing => "MISSING",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation failure with its location in the validated value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Failure classification.
    pub code: ErrorCode,
    /// Human-readable description.
    pub message: String,
    /// Path to the offending location, `None` for the value itself.
    /// Segments are joined by `/` with no leading slash, e.g. `3/currency`.
    pub pointer: Option<String>,
}

impl ValidationError {
    /// Create an error with an explicit code and no pointer.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            pointer: None,
        }
    }

    /// Create an [`ErrorCode::Invalid`] error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Invalid, message)
    }

    /// Create an [`ErrorCode::Missing`] error.
    pub fn missing(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Missing, message)
    }

    /// Create an [`ErrorCode::Unknown`] error.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unknown, message)
    }

    /// Set the pointer.
    pub fn with_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.pointer = Some(pointer.into());
        self
    }

    /// Re-home a child error one level down, under `segment`.
    ///
    /// The code is preserved, the message becomes `"<prefix>: <message>"`,
    /// and `segment` becomes the outermost pointer segment.
    pub fn nested(&self, segment: impl fmt::Display, prefix: impl fmt::Display) -> Self {
        let pointer = match &self.pointer {
            Some(inner) => format!("{segment}/{inner}"),
            None => segment.to_string(),
        };
        Self {
            code: self.code,
            message: format!("{prefix}: {}", self.message),
            pointer: Some(pointer),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pointer {
            Some(pointer) => write!(f, "{pointer}: {}", self.message),
            None => write!(f, "(root): {}", self.message),
        }
    }
}

/// Error raised when a field is constructed with an impossible configuration.
///
/// A misconfigured field is never built: every constructor that can fail
/// returns `Result<_, ConfigError>`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A currency code is not three upper-case ASCII letters.
    #[error("invalid currency code '{code}': expected three upper-case ASCII letters")]
    InvalidCurrencyCode {
        /// The rejected code.
        code: String,
    },

    /// Two bound operators on the same side of the range were both set.
    #[error("conflicting bounds: '{first}' and '{second}' cannot both be set")]
    ConflictingBounds {
        /// First operator name.
        first: &'static str,
        /// Second operator name.
        second: &'static str,
    },

    /// A dictionary was given the same key twice.
    #[error("duplicate dictionary key '{key}'")]
    DuplicateKey {
        /// The repeated key.
        key: String,
    },

    /// A serialized options document could not be turned into field options.
    #[error("invalid options for {field}: {reason}")]
    InvalidOption {
        /// Field kind the options were meant for.
        field: &'static str,
        /// Deserialization failure detail.
        reason: String,
    },
}

/// Error converting a foreign document into a [`crate::Value`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A mapping key cannot be represented as a string.
    #[error("unsupported map key type: {0}")]
    UnsupportedKey(String),

    /// A number cannot be represented as `i64` or `f64`.
    #[error("unsupported number: {0}")]
    UnsupportedNumber(String),
}
