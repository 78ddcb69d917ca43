use keyform_schema::SchemaError;
use keyform_store::StoreError;
use keyform_types::TypeError;

/// Errors that can occur while binding or using a collection proxy.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CollectionError {
    /// The backing store rejected or failed the operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A stored value could not be converted back to its element type.
    #[error(transparent)]
    Type(#[from] TypeError),

    /// The owning model could not be classified.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A write would grow a fixed array past its declared length.
    #[error("{key}: array holds at most {bound} elements, {requested} requested")]
    ArrayBoundsExceeded {
        key: String,
        bound: usize,
        requested: usize,
    },

    /// A stored identity no longer resolves to an existing model.
    #[error("{key}: {model} {id} does not exist")]
    UnresolvedReference {
        key: String,
        model: &'static str,
        id: String,
    },

    /// A model element has no identity, so it cannot be stored by reference.
    #[error("{model} element has no identity")]
    UnidentifiedElement { model: &'static str },

    /// A sorted-set element has no value for its ordering key.
    #[error("{key}: element {element} has no ordering score")]
    MissingScore { key: String, element: String },

    /// The requested proxy does not match the field's classified role.
    #[error("{model}.{field}: {reason}")]
    BindingMismatch {
        model: &'static str,
        field: &'static str,
        reason: String,
    },
}

impl CollectionError {
    /// Whether the caller can reasonably continue after this error.
    ///
    /// Only a dangling reference qualifies: the collection itself is intact.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnresolvedReference { .. })
    }
}

/// Convenience alias for collection operations.
pub type CollectionResult<T> = Result<T, CollectionError>;
