use std::fmt;
use std::marker::PhantomData;

use keyform_schema::{CollectionShape, Describe, FieldType};
use tracing::debug;

use crate::binding::Binding;
use crate::element::Element;
use crate::error::CollectionResult;

/// Unordered collection of unique elements stored as a native set.
///
/// Uniqueness is decided by the store on the encoded form, so adding an
/// element that is already present changes nothing.
pub struct StoredSet<T> {
    binding: Binding,
    _element: PhantomData<fn() -> T>,
}

impl<T: Element> StoredSet<T> {
    pub(crate) fn new(binding: Binding) -> Self {
        Self {
            binding,
            _element: PhantomData,
        }
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    /// Add `value`. Returns `true` if it was not already a member.
    pub fn insert(&self, value: &T) -> CollectionResult<bool> {
        let encoded = value.encode()?;
        let added = self.binding.store().sadd(self.binding.key(), &encoded)?;
        debug!(key = %self.binding.key(), added, "set insert");
        Ok(added)
    }

    /// Remove `value`. Returns `true` if it was a member.
    pub fn remove(&self, value: &T) -> CollectionResult<bool> {
        let encoded = value.encode()?;
        Ok(self.binding.store().srem(self.binding.key(), &encoded)?)
    }

    pub fn contains(&self, value: &T) -> CollectionResult<bool> {
        let encoded = value.encode()?;
        Ok(self.binding.store().sismember(self.binding.key(), &encoded)?)
    }

    pub fn len(&self) -> CollectionResult<usize> {
        Ok(self.binding.store().scard(self.binding.key())?)
    }

    pub fn is_empty(&self) -> CollectionResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Every member, in no particular order.
    pub fn members(&self) -> CollectionResult<Vec<T>> {
        let raws = self.binding.store().smembers(self.binding.key())?;
        self.binding.resolve_all(raws)
    }

    /// Stored identities whose models no longer exist.
    pub fn unresolved(&self) -> CollectionResult<Vec<String>> {
        let raws = self.binding.store().smembers(self.binding.key())?;
        self.binding.dangling::<T>(raws)
    }

    pub fn clear(&self) -> CollectionResult<()> {
        self.binding.store().delete(self.binding.key())?;
        Ok(())
    }
}

impl<T> Describe for StoredSet<T> {
    fn describe() -> FieldType {
        FieldType::Collection(CollectionShape::Set)
    }
}

impl<T> fmt::Debug for StoredSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredSet")
            .field("key", &self.binding.key())
            .finish()
    }
}
