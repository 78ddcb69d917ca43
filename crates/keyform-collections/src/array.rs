use std::fmt;
use std::marker::PhantomData;

use keyform_schema::{CollectionShape, Describe, FieldRole, FieldType};
use tracing::debug;

use crate::binding::{position, Binding};
use crate::element::Element;
use crate::error::{CollectionError, CollectionResult};

/// Bounded sequence stored as a native list.
///
/// Holds at most [`bound`](Self::bound) elements. Every write that could
/// grow the list checks the bound before touching the store, so a rejected
/// write leaves the stored list unchanged.
pub struct StoredArray<T> {
    binding: Binding,
    bound: usize,
    _element: PhantomData<fn() -> T>,
}

impl<T: Element> StoredArray<T> {
    pub(crate) fn new(binding: Binding) -> Self {
        let bound = match binding.role() {
            FieldRole::Array { length, .. } => *length,
            _ => usize::MAX,
        };
        Self {
            binding,
            bound,
            _element: PhantomData,
        }
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    /// Declared maximum length.
    pub fn bound(&self) -> usize {
        self.bound
    }

    /// Replace the whole content with `values`.
    ///
    /// The store swaps the list in one operation; on failure the previous
    /// content is still in place.
    pub fn assign(&self, values: &[T]) -> CollectionResult<()> {
        self.check_bound(values.len())?;
        let encoded = values
            .iter()
            .map(Element::encode)
            .collect::<CollectionResult<Vec<_>>>()?;

        self.binding.store().replace_list(self.binding.key(), &encoded)?;
        debug!(key = %self.binding.key(), len = encoded.len(), "array assign");
        Ok(())
    }

    /// Append one element. Returns the new length.
    pub fn push(&self, value: &T) -> CollectionResult<usize> {
        self.check_bound(self.len()? + 1)?;
        let encoded = value.encode()?;
        Ok(self.binding.store().rpush(self.binding.key(), &encoded)?)
    }

    pub fn get(&self, index: usize) -> CollectionResult<Option<T>> {
        match self.binding.store().lindex(self.binding.key(), position(index))? {
            Some(raw) => self.binding.resolve(&raw),
            None => Ok(None),
        }
    }

    /// Overwrite the element at `index`, which must already exist.
    pub fn set(&self, index: usize, value: &T) -> CollectionResult<()> {
        self.check_bound(index.saturating_add(1))?;
        let encoded = value.encode()?;
        self.binding
            .store()
            .lset(self.binding.key(), position(index), &encoded)?;
        Ok(())
    }

    pub fn len(&self) -> CollectionResult<usize> {
        Ok(self.binding.store().llen(self.binding.key())?)
    }

    pub fn is_empty(&self) -> CollectionResult<bool> {
        Ok(self.len()? == 0)
    }

    pub fn to_vec(&self) -> CollectionResult<Vec<T>> {
        let raws = self.binding.store().lrange_all(self.binding.key())?;
        self.binding.resolve_all(raws)
    }

    /// Stored identities whose models no longer exist.
    pub fn unresolved(&self) -> CollectionResult<Vec<String>> {
        let raws = self.binding.store().lrange_all(self.binding.key())?;
        self.binding.dangling::<T>(raws)
    }

    pub fn clear(&self) -> CollectionResult<()> {
        self.binding.store().delete(self.binding.key())?;
        Ok(())
    }

    fn check_bound(&self, requested: usize) -> CollectionResult<()> {
        if requested > self.bound {
            return Err(CollectionError::ArrayBoundsExceeded {
                key: self.binding.key().to_string(),
                bound: self.bound,
                requested,
            });
        }
        Ok(())
    }
}

impl<T> Describe for StoredArray<T> {
    fn describe() -> FieldType {
        FieldType::Collection(CollectionShape::Array)
    }
}

impl<T> fmt::Debug for StoredArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredArray")
            .field("key", &self.binding.key())
            .field("bound", &self.bound)
            .finish()
    }
}
