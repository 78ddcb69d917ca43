//! Foundation types for keyform.
//!
//! This crate holds the value-level building blocks every other keyform crate
//! depends on: how identities move between their typed form and the text used
//! in store keys, how scalar values are converted to and from stored text, and
//! the field-wise equality/hash helper models can opt into.
//!
//! # Key Types
//!
//! - [`IdentityValue`] -- An identity in one of three representations
//! - [`Identity`] -- Rust types usable as a model identity (`i64`, `String`, `Uuid`)
//! - [`Scalar`] -- Symmetric text conversion for one scalar type
//! - [`Converter`] / [`ScalarRegistry`] -- Which declared type names are supported scalars
//! - [`FieldValue`] -- Values usable with [`fields_hash`] / [`fields_equal`]

pub mod error;
pub mod fieldwise;
pub mod identity;
pub mod scalar;

pub use error::TypeError;
pub use fieldwise::{field, fields_equal, fields_hash, present, Field, FieldValue};
pub use identity::{Identity, IdentityKind, IdentityValue};
pub use scalar::{Converter, Scalar, ScalarRegistry};
pub use uuid::Uuid;
