//! # conform-core — Foundational Types for conform
//!
//! This crate is the leaf of the conform workspace. It defines the types that
//! every field validator consumes or produces, and depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **One dynamic value model.** Every field judges a [`Value`]. JSON and
//!    YAML documents convert into it; the opaque monetary [`Amount`] is a
//!    first-class variant so domain fields can tell a domain object apart
//!    from a plain mapping.
//!
//! 2. **Validated newtypes for domain primitives.** [`CurrencyCode`] can only
//!    hold a three-letter upper-case code. Invalid codes are rejected when the
//!    newtype is built, never when a value is validated.
//!
//! 3. **Two disjoint failure classes.** [`ConfigError`] is returned from
//!    constructors and is fatal for the field being built. [`ValidationError`]
//!    is a plain record collected into an ordered list; it is data, not a
//!    Rust error.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `conform-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod money;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use error::{ConfigError, ErrorCode, ValidationError, ValueError};
pub use money::{is_known_currency, Amount, CurrencyCode};
pub use value::Value;
