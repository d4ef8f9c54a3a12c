//! # Monetary Amount Fields
//!
//! Two fields share one configuration ([`AmountOptions`]): a restricted set
//! of currency codes and integer bounds on the minor-unit value.
//!
//! - [`Amount`] judges an opaque [`conform_core::Amount`]. A currency outside the
//!   allowed set is `INVALID` and suppresses the range checks.
//! - [`AmountDictionary`] judges a plain `{currency, value}` mapping. A
//!   currency outside the allowed set is `UNKNOWN` and the range checks
//!   still run, so both failures can be reported together.
//!
//! With no currencies configured, a code must still be a registered ISO 4217
//! code.
//!
//! Options are checked when the field is built. A malformed currency code or
//! a conflicting pair of bounds means no field is constructed at all.

use std::collections::{BTreeMap, BTreeSet};

use conform_core::{is_known_currency, ConfigError, CurrencyCode, ValidationError, Value};
use serde::{Deserialize, Serialize};

use crate::collections::extra_keys_error;
use crate::field::{introspection_base, Field};
use crate::range::RangeBounds;

const AMOUNT_TYPE: &str = "currint.Amount";
const AMOUNT_DICTIONARY_TYPE: &str = "currint.AmountDictionary";

const CURRENCY_KEY: &str = "currency";
const VALUE_KEY: &str = "value";

/// Configuration shared by [`Amount`] and [`AmountDictionary`].
///
/// Can be deserialized from host configuration (JSON or YAML). Currency
/// codes are validated while deserializing; bounds must be integers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AmountOptions {
    /// Allowed currencies. `None` or empty means any ISO 4217 currency.
    #[serde(default)]
    pub valid_currencies: Option<BTreeSet<CurrencyCode>>,
    #[serde(default)]
    pub gt: Option<i64>,
    #[serde(default)]
    pub gte: Option<i64>,
    #[serde(default)]
    pub lt: Option<i64>,
    #[serde(default)]
    pub lte: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl AmountOptions {
    /// Parse options from a JSON value.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, ConfigError> {
        serde_json::from_value(value.clone()).map_err(|e| ConfigError::InvalidOption {
            field: "Amount",
            reason: e.to_string(),
        })
    }

    /// Parse options from a YAML document.
    pub fn from_yaml(document: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(document).map_err(|e| ConfigError::InvalidOption {
            field: "Amount",
            reason: e.to_string(),
        })
    }

    /// Restrict to the given currency codes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCurrencyCode`] for the first malformed code.
    pub fn with_valid_currencies<I, S>(mut self, codes: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let codes = codes
            .into_iter()
            .map(|code| CurrencyCode::new(code.as_ref()))
            .collect::<Result<BTreeSet<_>, _>>()?;
        self.valid_currencies = Some(codes);
        Ok(self)
    }

    pub fn gt(mut self, bound: i64) -> Self {
        self.gt = Some(bound);
        self
    }

    pub fn gte(mut self, bound: i64) -> Self {
        self.gte = Some(bound);
        self
    }

    pub fn lt(mut self, bound: i64) -> Self {
        self.lt = Some(bound);
        self
    }

    pub fn lte(mut self, bound: i64) -> Self {
        self.lte = Some(bound);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Checked form of [`AmountOptions`].
#[derive(Debug, Clone, Default)]
struct AmountRules {
    valid_currencies: BTreeSet<CurrencyCode>,
    bounds: RangeBounds,
    description: Option<String>,
}

impl AmountRules {
    fn from_options(options: AmountOptions, kind: &'static str) -> Result<Self, ConfigError> {
        let bounds = RangeBounds::new(options.gt, options.gte, options.lt, options.lte)?;
        let valid_currencies = options.valid_currencies.unwrap_or_default();
        tracing::debug!(
            field = kind,
            currencies = valid_currencies.len(),
            ?bounds,
            "built amount field"
        );
        Ok(Self {
            valid_currencies,
            bounds,
            description: options.description,
        })
    }

    /// True when `code` is allowed. An empty set allows every ISO 4217 code.
    fn allows(&self, code: &str) -> bool {
        if self.valid_currencies.is_empty() {
            is_known_currency(code)
        } else {
            self.valid_currencies.iter().any(|c| c.as_str() == code)
        }
    }

    fn introspect(&self, type_name: &str) -> serde_json::Value {
        let mut map = introspection_base(type_name, self.description.as_deref());
        if !self.valid_currencies.is_empty() {
            let codes: Vec<&str> = self.valid_currencies.iter().map(CurrencyCode::as_str).collect();
            map.insert("valid_currencies".into(), codes.into());
        }
        self.bounds.introspect_into(&mut map);
        serde_json::Value::Object(map)
    }
}

/// An opaque monetary amount with an optional currency restriction and
/// minor-unit bounds.
#[derive(Debug, Clone)]
pub struct Amount {
    rules: AmountRules,
}

impl Amount {
    /// Build the field from options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConflictingBounds`] if both lower or both upper
    /// operators are set.
    pub fn new(options: AmountOptions) -> Result<Self, ConfigError> {
        Ok(Self {
            rules: AmountRules::from_options(options, AMOUNT_TYPE)?,
        })
    }

    /// Any ISO 4217 currency, any value.
    pub fn unrestricted() -> Self {
        Self {
            rules: AmountRules::default(),
        }
    }

    pub fn valid_currencies(&self) -> &BTreeSet<CurrencyCode> {
        &self.rules.valid_currencies
    }

    pub fn bounds(&self) -> &RangeBounds {
        &self.rules.bounds
    }
}

impl Field for Amount {
    fn errors(&self, value: &Value) -> Vec<ValidationError> {
        let Some(amount) = value.as_amount() else {
            return vec![ValidationError::invalid("Not a currint.Amount instance")];
        };
        if !self.rules.allows(amount.currency().as_str()) {
            return vec![ValidationError::invalid("Not a valid currency code")];
        }
        self.rules.bounds.errors(amount.minor())
    }

    fn introspect(&self) -> serde_json::Value {
        self.rules.introspect(AMOUNT_TYPE)
    }
}

/// A `{"currency": <code>, "value": <minor units>}` mapping with the same
/// restrictions as [`Amount`].
#[derive(Debug, Clone)]
pub struct AmountDictionary {
    rules: AmountRules,
}

impl AmountDictionary {
    /// Build the field from options, with the same checks as [`Amount::new`].
    pub fn new(options: AmountOptions) -> Result<Self, ConfigError> {
        Ok(Self {
            rules: AmountRules::from_options(options, AMOUNT_DICTIONARY_TYPE)?,
        })
    }

    pub fn unrestricted() -> Self {
        Self {
            rules: AmountRules::default(),
        }
    }

    pub fn valid_currencies(&self) -> &BTreeSet<CurrencyCode> {
        &self.rules.valid_currencies
    }

    pub fn bounds(&self) -> &RangeBounds {
        &self.rules.bounds
    }

    fn currency_error(&self, map: &BTreeMap<String, Value>) -> Option<ValidationError> {
        let error = match map.get(CURRENCY_KEY) {
            None => ValidationError::missing(format!("Key {CURRENCY_KEY} missing")),
            Some(Value::String(code)) if self.rules.allows(code) => return None,
            Some(Value::String(_)) if self.rules.valid_currencies.is_empty() => {
                ValidationError::unknown("Not a valid currency code")
            }
            Some(Value::String(_)) => {
                let allowed = self
                    .rules
                    .valid_currencies
                    .iter()
                    .map(|c| format!("\"{c}\""))
                    .collect::<Vec<_>>()
                    .join(", ");
                ValidationError::unknown(format!("Value is not one of: {allowed}"))
            }
            Some(_) => ValidationError::invalid("Not a unicode string"),
        };
        Some(error.with_pointer(CURRENCY_KEY))
    }

    fn value_errors(&self, map: &BTreeMap<String, Value>) -> Vec<ValidationError> {
        match map.get(VALUE_KEY) {
            None => vec![
                ValidationError::missing(format!("Key {VALUE_KEY} missing")).with_pointer(VALUE_KEY),
            ],
            Some(Value::Integer(minor)) => self.rules.bounds.errors(*minor),
            Some(_) => vec![ValidationError::invalid("Not an integer").with_pointer(VALUE_KEY)],
        }
    }
}

impl Field for AmountDictionary {
    fn errors(&self, value: &Value) -> Vec<ValidationError> {
        let Some(map) = value.as_dict() else {
            return vec![ValidationError::invalid("Not a dict")];
        };

        let mut result: Vec<ValidationError> = self.currency_error(map).into_iter().collect();
        result.extend(self.value_errors(map));
        if let Some(error) = extra_keys_error(map, |k| k == CURRENCY_KEY || k == VALUE_KEY) {
            result.push(error);
        }
        result
    }

    fn introspect(&self) -> serde_json::Value {
        self.rules.introspect(AMOUNT_DICTIONARY_TYPE)
    }
}
