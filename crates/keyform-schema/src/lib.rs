//! Model declarations and field classification for keyform.
//!
//! A model type describes itself through [`Model::declaration`]: its fields,
//! their declared types and their annotations. Before a model can be bound
//! to the store, its declaration is run through a [`Classifier`], a
//! fail-fast pipeline of [`SchemaRule`]s, and resolved into a
//! [`ModelSchema`] that gives every field exactly one [`FieldRole`].
//! [`SchemaCache`] memoizes the result per type.
//!
//! # Quick Start
//!
//! ```rust
//! use keyform_schema::{Classifier, FieldDecl, FieldRole, Model, ModelDecl};
//!
//! #[derive(Default)]
//! struct Town {
//!     id: Option<String>,
//! }
//!
//! impl Model for Town {
//!     const NAME: &'static str = "Town";
//!     type Id = String;
//!
//!     fn declaration() -> ModelDecl {
//!         ModelDecl::new(Self::NAME)
//!             .field(FieldDecl::of::<String>("id").id())
//!             .field(FieldDecl::of::<String>("name").attribute().indexed())
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
//! let schema = Classifier::default().classify::<Town>().unwrap();
//! assert_eq!(schema.identity().name, "id");
//! assert_eq!(
//!     schema.field("name").unwrap().role,
//!     FieldRole::Attribute { type_name: "String" }
//! );
//! ```

pub mod annotation;
pub mod cache;
pub mod classify;
pub mod decl;
pub mod error;
pub mod identity;
pub mod model;
pub mod registry;
pub mod rule;
pub mod rules;
pub mod schema;

#[cfg(test)]
mod fixtures;

// Re-exports for convenience.
pub use annotation::{Annotation, AnnotationKind};
pub use cache::SchemaCache;
pub use classify::Classifier;
pub use decl::{CollectionShape, Describe, FieldDecl, FieldType, ModelDecl, ModelRef, TypeRef};
pub use error::{SchemaError, SchemaResult};
pub use identity::{assign_identity, assign_identity_value, identity_of, identity_value, is_new};
pub use model::Model;
pub use registry::{Capability, Category};
pub use rule::{RuleContext, SchemaRule};
pub use rules::{
    AttributeRule, CollectionRule, CombinationRule, ElementRule, IdentityRule, IndexRule,
    StructureRule,
};
pub use schema::{ElementType, FieldRole, ModelSchema, ResolvedField};
