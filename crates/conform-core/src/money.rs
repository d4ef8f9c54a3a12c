//! # Monetary Domain Types
//!
//! The minimal monetary shape the amount fields depend on: a currency code
//! and an integer count of minor units (cents for USD, yen for JPY).
//! Amounts never carry floats.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// An ISO 4217 shaped currency code: exactly three upper-case ASCII letters.
///
/// Construction checks shape only: `XYZ` is a well-formed code. Use
/// [`CurrencyCode::is_known`] to ask whether it is a registered ISO 4217 code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Validate and wrap a currency code.
    pub fn new(code: impl Into<String>) -> Result<Self, ConfigError> {
        let code = code.into();
        if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) {
            Ok(Self(code))
        } else {
            Err(ConfigError::InvalidCurrencyCode { code })
        }
    }

    /// Access the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the code is registered in ISO 4217.
    pub fn is_known(&self) -> bool {
        is_known_currency(&self.0)
    }
}

/// True when `code` is a registered ISO 4217 alphabetic code.
pub fn is_known_currency(code: &str) -> bool {
    iso_currency::Currency::from_code(code).is_some()
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

/// A monetary amount in integer minor units of a currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Amount {
    currency: CurrencyCode,
    minor: i64,
}

impl Amount {
    /// Build an amount from an already validated currency.
    pub fn new(currency: CurrencyCode, minor: i64) -> Self {
        Self { currency, minor }
    }

    /// Build an amount from a raw currency code and a minor-unit value.
    pub fn from_code_and_minor(code: &str, minor: i64) -> Result<Self, ConfigError> {
        Ok(Self::new(CurrencyCode::new(code)?, minor))
    }

    /// The currency of this amount.
    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    /// The value in minor units.
    pub fn minor(&self) -> i64 {
        self.minor
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.minor, self.currency)
    }
}
