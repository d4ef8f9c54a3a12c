//! # Composite Fields
//!
//! [`List`] and [`Dictionary`] validate containers by recursive descent.
//! Child errors are re-homed under the index or key where they were found
//! (see [`ValidationError::nested`]), so the final list reads from the root:
//! `Index 3: Key currency: Not a unicode string` at pointer `3/currency`.
//!
//! A container of the wrong kind yields exactly one error and no deeper
//! checks. That short-circuit is local to the field where it happens.

use std::collections::{BTreeMap, BTreeSet};

use conform_core::{ConfigError, ValidationError, Value};

use crate::field::{introspection_base, Field};

/// A list whose every element matches one child field.
#[derive(Debug)]
pub struct List {
    contents: Box<dyn Field>,
    max_length: Option<usize>,
    min_length: Option<usize>,
    description: Option<String>,
}

impl List {
    /// A list of any length whose elements match `contents`.
    pub fn new(contents: impl Field + 'static) -> Self {
        Self {
            contents: Box::new(contents),
            max_length: None,
            min_length: None,
            description: None,
        }
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The element field.
    pub fn contents(&self) -> &dyn Field {
        &*self.contents
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    pub fn min_length(&self) -> Option<usize> {
        self.min_length
    }
}

impl Field for List {
    fn errors(&self, value: &Value) -> Vec<ValidationError> {
        let Some(items) = value.as_list() else {
            tracing::trace!(found = value.type_name(), "expected a list");
            return vec![ValidationError::invalid("Not a list")];
        };

        let mut result = Vec::new();
        // Only one length error per call: a max violation suppresses the min check.
        match (self.max_length, self.min_length) {
            (Some(max), _) if items.len() > max => {
                result.push(ValidationError::invalid(format!("List longer than {max}")));
            }
            (_, Some(min)) if items.len() < min => {
                result.push(ValidationError::invalid(format!("List is shorter than {min}")));
            }
            _ => {}
        }

        for (i, element) in items.iter().enumerate() {
            result.extend(
                self.contents
                    .errors(element)
                    .iter()
                    .map(|error| error.nested(i, format!("Index {i}"))),
            );
        }

        tracing::trace!(len = items.len(), errors = result.len(), "validated list");
        result
    }

    fn introspect(&self) -> serde_json::Value {
        let mut map = introspection_base("list", self.description.as_deref());
        map.insert("contents".into(), self.contents.introspect());
        if let Some(max) = self.max_length {
            map.insert("max_length".into(), max.into());
        }
        if let Some(min) = self.min_length {
            map.insert("min_length".into(), min.into());
        }
        serde_json::Value::Object(map)
    }
}

/// A mapping with a fixed set of named child fields.
///
/// Keys are checked in declaration order, so error order is reproducible.
#[derive(Debug)]
pub struct Dictionary {
    contents: Vec<(String, Box<dyn Field>)>,
    optional_keys: BTreeSet<String>,
    ignore_extra_keys: bool,
    description: Option<String>,
}

impl Dictionary {
    /// Build a dictionary from `(key, field)` pairs. Every key is required
    /// and extra keys are reported until configured otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateKey`] if a key appears twice.
    pub fn new<K, I>(contents: I) -> Result<Self, ConfigError>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Box<dyn Field>)>,
    {
        let mut seen = BTreeSet::new();
        let mut entries = Vec::new();
        for (key, field) in contents {
            let key = key.into();
            if !seen.insert(key.clone()) {
                return Err(ConfigError::DuplicateKey { key });
            }
            entries.push((key, field));
        }
        tracing::debug!(keys = entries.len(), "built dictionary field");
        Ok(Self {
            contents: entries,
            optional_keys: BTreeSet::new(),
            ignore_extra_keys: false,
            description: None,
        })
    }

    /// Mark keys that may be absent.
    ///
    /// Keys that name no configured entry are kept but have no effect.
    pub fn with_optional_keys<K, I>(mut self, keys: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = K>,
    {
        for key in keys {
            let key = key.into();
            if !self.contents.iter().any(|(k, _)| *k == key) {
                tracing::warn!(key = %key, "optional key is not a configured dictionary key");
            }
            self.optional_keys.insert(key);
        }
        self
    }

    /// Accept keys that are not configured instead of reporting them.
    pub fn with_ignore_extra_keys(mut self, ignore: bool) -> Self {
        self.ignore_extra_keys = ignore;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Look up the field configured for `key`.
    pub fn field(&self, key: &str) -> Option<&dyn Field> {
        self.contents
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, field)| &**field)
    }

    /// Configured keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.contents.iter().map(|(k, _)| k.as_str())
    }

    pub fn is_optional(&self, key: &str) -> bool {
        self.optional_keys.contains(key)
    }

    pub fn ignores_extra_keys(&self) -> bool {
        self.ignore_extra_keys
    }
}

impl Field for Dictionary {
    fn errors(&self, value: &Value) -> Vec<ValidationError> {
        let Some(map) = value.as_dict() else {
            tracing::trace!(found = value.type_name(), "expected a dict");
            return vec![ValidationError::invalid("Not a dict")];
        };

        let mut result = Vec::new();
        for (key, field) in &self.contents {
            match map.get(key) {
                None if self.optional_keys.contains(key) => {}
                None => {
                    result.push(
                        ValidationError::missing(format!("Key {key} missing"))
                            .with_pointer(key.as_str()),
                    );
                }
                Some(child) => result.extend(
                    field
                        .errors(child)
                        .iter()
                        .map(|error| error.nested(key, format!("Key {key}"))),
                ),
            }
        }

        if !self.ignore_extra_keys {
            if let Some(error) = extra_keys_error(map, |k| self.field(k).is_some()) {
                result.push(error);
            }
        }

        tracing::trace!(keys = map.len(), errors = result.len(), "validated dictionary");
        result
    }

    fn introspect(&self) -> serde_json::Value {
        let mut map = introspection_base("dictionary", self.description.as_deref());
        let contents: serde_json::Map<String, serde_json::Value> = self
            .contents
            .iter()
            .map(|(key, field)| (key.clone(), field.introspect()))
            .collect();
        map.insert("contents".into(), contents.into());
        map.insert(
            "optional_keys".into(),
            self.optional_keys.iter().cloned().collect::<Vec<_>>().into(),
        );
        map.insert("ignore_extra_keys".into(), self.ignore_extra_keys.into());
        serde_json::Value::Object(map)
    }
}

/// The single aggregate error for keys in `map` that `is_known` rejects.
///
/// Keys are sorted before joining.
pub(crate) fn extra_keys_error(
    map: &BTreeMap<String, Value>,
    is_known: impl Fn(&str) -> bool,
) -> Option<ValidationError> {
    let extra: BTreeSet<&str> = map
        .keys()
        .map(String::as_str)
        .filter(|k| !is_known(k))
        .collect();
    if extra.is_empty() {
        return None;
    }
    let joined = extra.into_iter().collect::<Vec<_>>().join(", ");
    Some(ValidationError::invalid(format!("Extra keys {joined} present")))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug)]
    struct IntegerField;

    impl Field for IntegerField {
        fn errors(&self, value: &Value) -> Vec<ValidationError> {
            match value {
                Value::Integer(_) => Vec::new(),
                _ => vec![ValidationError::invalid("Not an integer")],
            }
        }

        fn introspect(&self) -> serde_json::Value {
            serde_json::json!({"type": "integer", "description": null})
        }
    }

    fn scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::Integer),
            "[a-z]{0,8}".prop_map(Value::String),
        ]
    }

    proptest! {
        /// Validating the same value twice yields identical errors.
        #[test]
        fn list_errors_idempotent(items in prop::collection::vec(scalar(), 0..10)) {
            let field = List::new(IntegerField).with_max_length(4).with_min_length(2);
            let value = Value::List(items);
            prop_assert_eq!(field.errors(&value), field.errors(&value));
        }

        /// One error per non-integer element, each pointing at its index.
        #[test]
        fn list_reports_each_bad_index(items in prop::collection::vec(scalar(), 0..10)) {
            let expected: Vec<String> = items
                .iter()
                .enumerate()
                .filter(|(_, v)| !matches!(v, Value::Integer(_)))
                .map(|(i, _)| i.to_string())
                .collect();
            let errors = List::new(IntegerField).errors(&Value::List(items));
            let pointers: Vec<String> = errors.into_iter().filter_map(|e| e.pointer).collect();
            prop_assert_eq!(pointers, expected);
        }

        /// A scalar where a container is expected yields exactly one error.
        #[test]
        fn type_guard_single_error(value in scalar()) {
            prop_assert_eq!(List::new(IntegerField).errors(&value).len(), 1);
            let dict = Dictionary::new([("a", Box::new(IntegerField) as Box<dyn Field>)]).unwrap();
            prop_assert_eq!(dict.errors(&value).len(), 1);
        }

        /// Extra keys are reported once, in sorted order.
        #[test]
        fn extra_keys_sorted(keys in prop::collection::btree_set("[b-z]{1,4}", 1..6)) {
            let dict = Dictionary::new([("a", Box::new(IntegerField) as Box<dyn Field>)]).unwrap();
            let mut map: BTreeMap<String, Value> =
                keys.iter().map(|k| (k.clone(), Value::Null)).collect();
            map.insert("a".into(), Value::Integer(1));
            let errors = dict.errors(&Value::Dict(map));
            let joined = keys.into_iter().collect::<Vec<_>>().join(", ");
            prop_assert_eq!(errors.len(), 1);
            prop_assert_eq!(&errors[0].message, &format!("Extra keys {joined} present"));
        }
    }
}
