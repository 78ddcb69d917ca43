use keyform_types::TypeError;

use crate::annotation::AnnotationKind;
use crate::decl::CollectionShape;

/// Errors raised while classifying a model declaration.
///
/// Every variant names the model (and field, where there is one) so a
/// misconfigured declaration can be found without a debugger.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    /// The model declares no identity field.
    #[error("{model} does not declare an identity field")]
    MissingIdentity { model: &'static str },

    /// The identity field carries other annotations, or there is more than one.
    #[error("{model}.{field}: invalid identity annotations: {reason}")]
    InvalidIdentityAnnotations {
        model: &'static str,
        field: &'static str,
        reason: String,
    },

    /// The identity field's type is not an integer, text or UUID.
    #[error("{model}.{field}: {type_name} cannot be an identity; use i64, String or Uuid")]
    InvalidIdentityType {
        model: &'static str,
        field: &'static str,
        type_name: String,
    },

    /// `Model::declaration` names a different model than `Model::NAME`.
    #[error("{model} returns a declaration named {declared}")]
    ModelNameMismatch {
        model: &'static str,
        declared: &'static str,
    },

    /// Two annotations on one field may not be combined.
    #[error("{model}.{field}: {first} cannot be combined with {second}")]
    IncompatibleAnnotations {
        model: &'static str,
        field: &'static str,
        first: AnnotationKind,
        second: AnnotationKind,
    },

    /// A field is annotated both as an attribute and as a reference.
    #[error("{model}.{field} is both an attribute and a reference")]
    AttributeAndReferenceConflict {
        model: &'static str,
        field: &'static str,
    },

    /// An attribute field is typed as a model.
    #[error("{model}.{field} is an attribute typed as model {type_name}")]
    AttributeAndModelConflict {
        model: &'static str,
        field: &'static str,
        type_name: &'static str,
    },

    /// An attribute field's type is not a supported scalar.
    #[error("{model}.{field}: {type_name} is not a supported attribute type")]
    UnsupportedAttributeType {
        model: &'static str,
        field: &'static str,
        type_name: String,
    },

    /// A reference field's type is not a model.
    #[error("{model}.{field}: reference to {type_name}, which is not a model")]
    ReferenceNotModel {
        model: &'static str,
        field: &'static str,
        type_name: String,
    },

    /// A field carries more than one collection annotation.
    #[error("{model}.{field} carries more than one collection annotation: {kinds:?}")]
    ConflictingCollectionAnnotations {
        model: &'static str,
        field: &'static str,
        kinds: Vec<AnnotationKind>,
    },

    /// The declared host type does not fit the collection annotation.
    #[error("{model}.{field}: declared as {found}, which is not a {expected:?}")]
    InvalidCollectionSubtype {
        model: &'static str,
        field: &'static str,
        expected: CollectionShape,
        found: String,
    },

    /// A collection element, key or value type is neither a scalar nor a model.
    #[error("{model}.{field}: {type_name} is not a supported collection element type")]
    UnsupportedElementType {
        model: &'static str,
        field: &'static str,
        type_name: String,
    },

    /// A sorted set's ordering key is absent or not a numeric attribute.
    #[error("{model}.{field}: invalid ordering key {by:?}: {reason}")]
    InvalidOrderingKey {
        model: &'static str,
        field: &'static str,
        by: Option<&'static str>,
        reason: String,
    },

    /// A fixed array declares a maximum length of zero.
    #[error("{model}.{field}: array length must be at least 1")]
    InvalidArrayLength {
        model: &'static str,
        field: &'static str,
    },

    /// `Indexed` was applied to a field with nothing to index.
    #[error("{model}.{field} is indexed but is not an attribute, reference or collection")]
    IndexedWithoutRole {
        model: &'static str,
        field: &'static str,
    },

    /// `Indexed` was applied to a field without a usable name.
    #[error("{model} has an indexed field with an empty name")]
    UnindexableField { model: &'static str },

    /// The same field name appears twice along the inheritance chain.
    #[error("{model}.{field} is declared more than once")]
    DuplicateField {
        model: &'static str,
        field: &'static str,
    },

    /// A model's parent chain loops back on itself.
    #[error("{model} inherits from itself")]
    CyclicInheritance { model: &'static str },

    /// Identity conversion failed.
    #[error(transparent)]
    Identity(#[from] TypeError),
}

impl SchemaError {
    /// Stable short name of the error kind, for matching in logs and tests.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingIdentity { .. } => "MissingIdentity",
            Self::InvalidIdentityAnnotations { .. } => "InvalidIdentityAnnotations",
            Self::InvalidIdentityType { .. } => "InvalidIdentityType",
            Self::ModelNameMismatch { .. } => "ModelNameMismatch",
            Self::IncompatibleAnnotations { .. } => "IncompatibleAnnotations",
            Self::AttributeAndReferenceConflict { .. } => "AttributeAndReferenceConflict",
            Self::AttributeAndModelConflict { .. } => "AttributeAndModelConflict",
            Self::UnsupportedAttributeType { .. } => "UnsupportedAttributeType",
            Self::ReferenceNotModel { .. } => "ReferenceNotModel",
            Self::ConflictingCollectionAnnotations { .. } => "ConflictingCollectionAnnotations",
            Self::InvalidCollectionSubtype { .. } => "InvalidCollectionSubtype",
            Self::UnsupportedElementType { .. } => "UnsupportedElementType",
            Self::InvalidOrderingKey { .. } => "InvalidOrderingKey",
            Self::InvalidArrayLength { .. } => "InvalidArrayLength",
            Self::IndexedWithoutRole { .. } => "IndexedWithoutRole",
            Self::UnindexableField { .. } => "UnindexableField",
            Self::DuplicateField { .. } => "DuplicateField",
            Self::CyclicInheritance { .. } => "CyclicInheritance",
            Self::Identity(TypeError::MalformedIdentity { .. }) => "MalformedIdentity",
            Self::Identity(TypeError::UnsupportedIdentityType(_)) => "UnsupportedIdentityType",
            Self::Identity(TypeError::MalformedScalar { .. }) => "MalformedScalar",
        }
    }
}

/// Result alias for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;
