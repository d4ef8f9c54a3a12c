//! # Field Contract
//!
//! The capability every validator implements. Composite fields own their
//! children as `Box<dyn Field>`, so any type implementing this trait can be
//! nested inside a [`crate::List`] or [`crate::Dictionary`].

use std::fmt;
use std::sync::Arc;

use conform_core::{ValidationError, Value};
use thiserror::Error;

/// A validator for one position in a value tree.
pub trait Field: fmt::Debug + Send + Sync {
    /// Every way `value` violates this field, in a stable order.
    ///
    /// An empty vector means the value is valid. Implementations must not
    /// panic on any input value.
    fn errors(&self, value: &Value) -> Vec<ValidationError>;

    /// Machine-readable description of this field's configuration.
    ///
    /// The result is a JSON object that always has a `type` key and a
    /// `description` key (`null` when unset). Composite fields embed the
    /// introspection of their children.
    fn introspect(&self) -> serde_json::Value;
}

impl<F: Field + ?Sized> Field for Box<F> {
    fn errors(&self, value: &Value) -> Vec<ValidationError> {
        (**self).errors(value)
    }

    fn introspect(&self) -> serde_json::Value {
        (**self).introspect()
    }
}

impl<F: Field + ?Sized> Field for Arc<F> {
    fn errors(&self, value: &Value) -> Vec<ValidationError> {
        (**self).errors(value)
    }

    fn introspect(&self) -> serde_json::Value {
        (**self).introspect()
    }
}

/// Non-empty list of validation errors, for callers that want `?`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", render(.errors))]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

fn render(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

impl ValidationErrors {
    /// Returns the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns a slice of all errors.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<ValidationError> {
        self.errors
    }
}

/// Validate `value`, turning a non-empty error list into `Err`.
pub fn validate<F: Field + ?Sized>(field: &F, value: &Value) -> Result<(), ValidationErrors> {
    let errors = field.errors(value);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { errors })
    }
}

/// Start an introspection object with the keys every field carries.
pub(crate) fn introspection_base(
    type_name: &str,
    description: Option<&str>,
) -> serde_json::Map<String, serde_json::Value> {
    let mut map = serde_json::Map::new();
    map.insert("type".into(), type_name.into());
    map.insert(
        "description".into(),
        description.map_or(serde_json::Value::Null, Into::into),
    );
    map
}
