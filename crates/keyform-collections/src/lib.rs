//! Store-backed collection proxies for keyform models.
//!
//! A model's collection fields are not held in memory. Each one is a proxy
//! bound to a single store structure under
//! `<Type><sep><id><sep><field>`, and every call on it is a synchronous
//! round trip: mutations are written before the call returns, reads always
//! fetch. There is no save step for collection fields.
//!
//! # Proxies
//!
//! - [`StoredList`] -- ordered, duplicates allowed (native list)
//! - [`StoredSet`] -- unique members (native set)
//! - [`StoredSortedSet`] -- unique members ordered by a numeric score (native sorted set)
//! - [`StoredMap`] -- key/value pairs (native hash)
//! - [`StoredArray`] -- bounded list with a declared maximum length
//!
//! # Elements
//!
//! Scalars implement [`Element`] out of the box and are stored by text.
//! Models are stored by identity; implement [`Resolve`] and invoke
//! [`model_element!`] to use one as an element. When a stored identity no
//! longer resolves, the binding's [`UnresolvedPolicy`] decides whether the
//! read skips it or fails.
//!
//! # Binding
//!
//! [`Binder`] checks each requested proxy against the owner's classified
//! schema and fills empty `Option` slots; a model lists its slots by
//! implementing [`Bind`].

pub mod array;
pub mod binder;
pub mod binding;
pub mod element;
pub mod error;
pub mod list;
pub mod map;
pub mod set;
pub mod sorted_set;

#[cfg(test)]
mod fixtures;

pub use array::StoredArray;
pub use binder::{Bind, Binder};
pub use binding::{Binding, UnresolvedPolicy};
pub use element::{Element, Resolve};
pub use error::{CollectionError, CollectionResult};
pub use list::StoredList;
pub use map::StoredMap;
pub use set::StoredSet;
pub use sorted_set::StoredSortedSet;

#[doc(hidden)]
pub mod __private {
    pub use keyform_schema::{Describe, ElementType, FieldType, ModelRef};
}
