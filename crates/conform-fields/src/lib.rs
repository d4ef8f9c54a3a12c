//! # conform-fields — Composable Field Validators
//!
//! Callers describe the expected shape of data as a tree of fields, then run
//! values through the tree to collect every violation as an ordered list of
//! pointer-qualified [`ValidationError`] records.
//!
//! ## The Field Contract (`field`)
//!
//! Every validator implements [`Field`]:
//!
//! - [`Field::errors`] — judges a value; an empty vector means valid.
//! - [`Field::introspect`] — describes the field's configuration as a JSON
//!   object for documentation and code generation tooling.
//!
//! Fields are immutable once built and `Send + Sync`, so a single tree can
//! be shared by any number of threads.
//!
//! ## Composites (`collections`)
//!
//! - [`List`] — a sequence whose every element matches one child field.
//! - [`Dictionary`] — a mapping with a fixed set of named child fields.
//!
//! Child errors are re-homed under the index or key they were found at.
//!
//! ## Monetary Fields (`currency`)
//!
//! - [`currency::Amount`] — an opaque [`conform_core::Amount`] restricted by
//!   currency and minor-unit range.
//! - [`currency::AmountDictionary`] — the same restrictions applied to a
//!   plain `{currency, value}` mapping.
//!
//! ## Crate Policy
//!
//! - Configuration errors are returned from constructors, never deferred to
//!   validation time.
//! - Validation never panics and never returns `Err` for a bad value.

pub mod collections;
pub mod currency;
pub mod field;
pub mod range;

pub use collections::{Dictionary, List};
pub use conform_core::{ConfigError, ErrorCode, ValidationError, Value};
pub use currency::{AmountDictionary, AmountOptions};
pub use field::{validate, Field, ValidationErrors};
pub use range::RangeBounds;
