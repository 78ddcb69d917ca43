//! Reading and assigning a model's identity.

use keyform_types::{Identity, IdentityValue, TypeError};

use crate::model::Model;

/// A model is new until it has been given an identity.
pub fn is_new<M: Model>(model: &M) -> bool {
    model.id().is_none()
}

/// The model's identity in its canonical text form, if it has one.
pub fn identity_of<M: Model>(model: &M) -> Option<String> {
    model.id().map(Identity::encode_identity)
}

pub fn identity_value<M: Model>(model: &M) -> Option<IdentityValue> {
    model.id().cloned().map(Identity::into_value)
}

/// Parse `text` as `M`'s identity type and store it on the model.
///
/// On failure the model is left untouched.
pub fn assign_identity<M: Model>(model: &mut M, text: &str) -> Result<(), TypeError> {
    let id = M::Id::decode_identity(text)?;
    model.set_id(Some(id));
    Ok(())
}

/// Store an already-typed identity value on the model.
pub fn assign_identity_value<M: Model>(model: &mut M, value: IdentityValue) -> Result<(), TypeError> {
    let id = M::Id::from_value(value)?;
    model.set_id(Some(id));
    Ok(())
}
