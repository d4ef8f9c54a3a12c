//! # Value Model
//!
//! The dynamically typed tree that fields validate. Host applications build
//! it from parsed JSON (`From<serde_json::Value>`), parsed YAML
//! (`TryFrom<serde_yaml::Value>`), or directly.
//!
//! `Value` is an owned tree, so cyclic structures cannot be expressed.
//! Mapping keys are strings and iterate in sorted order.

use std::collections::BTreeMap;

use crate::error::ValueError;
use crate::money::Amount;

/// A dynamically typed value under validation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absence of a value.
    Null,
    /// A boolean. Never treated as an integer.
    Bool(bool),
    /// A signed integer.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// A text string.
    String(String),
    /// An ordered sequence.
    List(Vec<Value>),
    /// A string-keyed mapping.
    Dict(BTreeMap<String, Value>),
    /// An opaque monetary amount.
    Amount(Amount),
}

impl Value {
    /// Short label for the kind of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Dict(_) => "dict",
            Self::Amount(_) => "amount",
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Dict(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_amount(&self) -> Option<&Amount> {
        match self {
            Self::Amount(amount) => Some(amount),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                // u64 beyond i64::MAX, or a float.
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Dict(
                map.into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl TryFrom<serde_yaml::Value> for Value {
    type Error = ValueError;

    /// YAML tags are ignored; scalar keys are stringified.
    fn try_from(yaml: serde_yaml::Value) -> Result<Self, Self::Error> {
        match yaml {
            serde_yaml::Value::Null => Ok(Self::Null),
            serde_yaml::Value::Bool(b) => Ok(Self::Bool(b)),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self::Integer(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Self::Float(f))
                } else {
                    Err(ValueError::UnsupportedNumber(n.to_string()))
                }
            }
            serde_yaml::Value::String(s) => Ok(Self::String(s)),
            serde_yaml::Value::Sequence(seq) => {
                let items: Result<Vec<Value>, ValueError> =
                    seq.into_iter().map(Self::try_from).collect();
                Ok(Self::List(items?))
            }
            serde_yaml::Value::Mapping(map) => {
                let mut dict = BTreeMap::new();
                for (k, v) in map {
                    let key = match k {
                        serde_yaml::Value::String(s) => s,
                        serde_yaml::Value::Number(n) => n.to_string(),
                        serde_yaml::Value::Bool(b) => b.to_string(),
                        other => return Err(ValueError::UnsupportedKey(format!("{other:?}"))),
                    };
                    dict.insert(key, Self::try_from(v)?);
                }
                Ok(Self::Dict(dict))
            }
            serde_yaml::Value::Tagged(tagged) => Self::try_from(tagged.value),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self::Dict(map)
    }
}

impl From<Amount> for Value {
    fn from(amount: Amount) -> Self {
        Self::Amount(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_maps_kinds() {
        let value = Value::from(json!({
            "n": null,
            "b": true,
            "i": -4,
            "f": 1.5,
            "s": "text",
            "l": [1, "two"],
        }));
        let dict = value.as_dict().unwrap();
        assert_eq!(dict["n"], Value::Null);
        assert_eq!(dict["b"], Value::Bool(true));
        assert_eq!(dict["i"], Value::Integer(-4));
        assert_eq!(dict["f"], Value::Float(1.5));
        assert_eq!(dict["s"].as_str(), Some("text"));
        assert_eq!(dict["l"].as_list().unwrap().len(), 2);
    }

    #[test]
    fn test_from_json_large_unsigned_is_float() {
        let value = Value::from(json!(u64::MAX));
        assert_eq!(value.type_name(), "float");
    }

    #[test]
    fn test_yaml_to_value_conversion() {
        let yaml_str = r#"
currency: USD
value: 100
enabled: true
1: numeric key
items:
  - one
  - 2
"#;
        let yaml: serde_yaml::Value = serde_yaml::from_str(yaml_str).unwrap();
        let value = Value::try_from(yaml).unwrap();
        let dict = value.as_dict().unwrap();
        assert_eq!(dict["currency"].as_str(), Some("USD"));
        assert_eq!(dict["value"].as_integer(), Some(100));
        assert_eq!(dict["enabled"], Value::Bool(true));
        assert_eq!(dict["1"].as_str(), Some("numeric key"));
        assert_eq!(dict["items"], Value::List(vec!["one".into(), 2.into()]));
    }

    #[test]
    fn test_yaml_rejects_sequence_key() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("? [a, b]\n: 1\n").unwrap();
        assert!(matches!(Value::try_from(yaml), Err(ValueError::UnsupportedKey(_))));
    }

    #[test]
    fn test_bool_is_not_integer() {
        assert_eq!(Value::from(true).as_integer(), None);
    }

    #[test]
    fn test_amount_variant() {
        let amount = Amount::from_code_and_minor("JPY", 500).unwrap();
        let value = Value::from(amount.clone());
        assert_eq!(value.type_name(), "amount");
        assert_eq!(value.as_amount(), Some(&amount));
        assert_eq!(value.as_dict(), None);
    }
}
