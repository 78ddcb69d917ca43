use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    #[error("schema error: {0}")]
    Schema(#[from] keyform_schema::SchemaError),

    #[error("collection error: {0}")]
    Collection(#[from] keyform_collections::CollectionError),

    #[error("store error: {0}")]
    Store(#[from] keyform_store::StoreError),

    #[error("conversion error: {0}")]
    Type(#[from] keyform_types::TypeError),

    #[error("{model} has no identity; assign or allocate one first")]
    UnidentifiedOwner { model: &'static str },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl MapError {
    /// Whether the error is a dangling reference the caller may step over.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Collection(e) if e.is_recoverable())
    }
}

pub type MapResult<T> = Result<T, MapError>;
