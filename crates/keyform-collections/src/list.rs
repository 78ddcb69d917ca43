use std::fmt;
use std::marker::PhantomData;

use keyform_schema::{CollectionShape, Describe, FieldType};
use tracing::debug;

use crate::binding::{position, Binding};
use crate::element::Element;
use crate::error::CollectionResult;

/// Ordered sequence stored as a native list. Duplicates are allowed.
///
/// Every mutation is written to the store before the call returns and
/// every read fetches from it; nothing is held in memory.
pub struct StoredList<T> {
    binding: Binding,
    _element: PhantomData<fn() -> T>,
}

impl<T: Element> StoredList<T> {
    pub(crate) fn new(binding: Binding) -> Self {
        Self {
            binding,
            _element: PhantomData,
        }
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    /// Append to the end. Returns the new length.
    pub fn push(&self, value: &T) -> CollectionResult<usize> {
        let encoded = value.encode()?;
        let len = self.binding.store().rpush(self.binding.key(), &encoded)?;
        debug!(key = %self.binding.key(), len, "list push");
        Ok(len)
    }

    /// Append every value in order. Returns the new length.
    pub fn extend<'a, I>(&self, values: I) -> CollectionResult<usize>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut len = self.len()?;
        for value in values {
            len = self.push(value)?;
        }
        Ok(len)
    }

    /// Element at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> CollectionResult<Option<T>> {
        match self.binding.store().lindex(self.binding.key(), position(index))? {
            Some(raw) => self.binding.resolve(&raw),
            None => Ok(None),
        }
    }

    /// Overwrite the element at `index`; fails past the end.
    pub fn set(&self, index: usize, value: &T) -> CollectionResult<()> {
        let encoded = value.encode()?;
        self.binding
            .store()
            .lset(self.binding.key(), position(index), &encoded)?;
        debug!(key = %self.binding.key(), index, "list set");
        Ok(())
    }

    /// Remove the element at `index`, shifting later elements down.
    pub fn remove_at(&self, index: usize) -> CollectionResult<Option<T>> {
        match self
            .binding
            .store()
            .lremove_at(self.binding.key(), position(index))?
        {
            Some(raw) => {
                debug!(key = %self.binding.key(), index, "list remove");
                self.binding.resolve(&raw)
            }
            None => Ok(None),
        }
    }

    /// Remove the first occurrence of `value`. Returns whether one was found.
    pub fn remove(&self, value: &T) -> CollectionResult<bool> {
        let encoded = value.encode()?;
        let removed = self.binding.store().lrem(self.binding.key(), 1, &encoded)?;
        Ok(removed > 0)
    }

    pub fn contains(&self, value: &T) -> CollectionResult<bool> {
        Ok(self.index_of(value)?.is_some())
    }

    /// Position of the first occurrence of `value`.
    pub fn index_of(&self, value: &T) -> CollectionResult<Option<usize>> {
        let encoded = value.encode()?;
        let raws = self.binding.store().lrange_all(self.binding.key())?;
        Ok(raws.iter().position(|raw| *raw == encoded))
    }

    pub fn len(&self) -> CollectionResult<usize> {
        Ok(self.binding.store().llen(self.binding.key())?)
    }

    pub fn is_empty(&self) -> CollectionResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Every element in order, with dangling references handled by policy.
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
}

impl<T> Describe for StoredList<T> {
    fn describe() -> FieldType {
        FieldType::Collection(CollectionShape::List)
    }
}

impl<T> fmt::Debug for StoredList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredList")
            .field("key", &self.binding.key())
            .finish()
    }
}
