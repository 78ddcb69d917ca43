//! Map Rust structs onto a key-value store.
//!
//! keyform stores each model instance under `<Type><sep><id>` and each of its
//! collection fields in a native store structure of its own. Models describe
//! their fields once, through [`Model::declaration`]; the [`Mapper`] classifies
//! that declaration, caches the result per type, allocates identities, and
//! binds collection fields to live, write-through proxies.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use keyform::{
//!     Bind, Binder, CollectionResult, FieldDecl, InMemoryStore, KeyValueStore, Mapper,
//!     MapperConfig, Model, ModelDecl, StoredSet,
//! };
//!
//! #[derive(Default)]
//! struct Town {
//!     id: Option<String>,
//!     landmarks: Option<StoredSet<String>>,
//! }
//!
//! impl Model for Town {
//!     const NAME: &'static str = "Town";
//!     type Id = String;
//!
//!     fn declaration() -> ModelDecl {
//!         ModelDecl::new(Self::NAME)
//!             .field(FieldDecl::of::<String>("id").id())
//!             .field(FieldDecl::of::<StoredSet<String>>("landmarks").set_of::<String>())
//!     }
//!
//!     fn id(&self) -> Option<&String> {
//!         self.id.as_ref()
//!     }
//!
//!     fn set_id(&mut self, id: Option<String>) {
//!         self.id = id;
//!     }
//! }
//!
//! impl Bind for Town {
//!     fn bind_collections(&mut self, binder: &Binder) -> CollectionResult<()> {
//!         binder.set("landmarks", &mut self.landmarks)
//!     }
//! }
//!
//! let mapper = Mapper::new(Arc::new(InMemoryStore::new()), MapperConfig::default()).unwrap();
//! let mut town = Town::default();
//! mapper.assign_identity(&mut town, "chennai").unwrap();
//! mapper.bind(&mut town).unwrap();
//!
//! let landmarks = town.landmarks.as_ref().unwrap();
//! landmarks.insert(&"fort".to_string()).unwrap();
//! assert!(mapper.store().sismember("Town:chennai:landmarks", "fort").unwrap());
//! ```
//!
//! # Crates
//!
//! - `keyform-types` -- identities, scalar conversion, field-wise equality
//! - `keyform-store` -- the [`KeyValueStore`] contract, key layout, in-memory store
//! - `keyform-schema` -- declarations, classification rules, the schema cache
//! - `keyform-collections` -- store-backed collection proxies and binding

pub mod config;
pub mod error;
pub mod mapper;

#[cfg(test)]
mod fixtures;

pub use config::MapperConfig;
pub use error::{MapError, MapResult};
pub use mapper::Mapper;

// Re-export the building blocks models are written against.
pub use keyform_collections::{
    model_element, Bind, Binder, Binding, CollectionError, CollectionResult, Element, Resolve,
    StoredArray, StoredList, StoredMap, StoredSet, StoredSortedSet, UnresolvedPolicy,
};
pub use keyform_schema::{
    Annotation, AnnotationKind, Classifier, CollectionShape, Describe, ElementType, FieldDecl,
    FieldRole, FieldType, Model, ModelDecl, ModelRef, ModelSchema, ResolvedField, SchemaError,
    SchemaRule, TypeRef,
};
pub use keyform_store::{InMemoryStore, KeySpace, KeyValueStore, StoreError};
pub use keyform_types::{
    field, fields_equal, fields_hash, present, Field, FieldValue, Identity, IdentityKind,
    IdentityValue, Scalar, TypeError, Uuid,
};
