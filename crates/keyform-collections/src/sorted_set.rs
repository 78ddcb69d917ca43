use std::fmt;
use std::marker::PhantomData;

use keyform_schema::{CollectionShape, Describe, FieldRole, FieldType};
use tracing::debug;

use crate::binding::Binding;
use crate::element::Element;
use crate::error::{CollectionError, CollectionResult};

/// Unique elements ordered by a numeric score, stored as a native sorted set.
///
/// Primitive elements are scored by their own value. Model elements are
/// scored by the numeric attribute the field's ordering key names, read at
/// insertion time; re-inserting an element whose score changed moves it.
pub struct StoredSortedSet<T> {
    binding: Binding,
    by: Option<&'static str>,
    _element: PhantomData<fn() -> T>,
}

impl<T: Element> StoredSortedSet<T> {
    pub(crate) fn new(binding: Binding) -> Self {
        let by = match binding.role() {
            FieldRole::SortedSet { by, .. } => *by,
            _ => None,
        };
        Self {
            binding,
            by,
            _element: PhantomData,
        }
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    /// Attribute the score is read from, for model elements.
    pub fn ordering_key(&self) -> Option<&'static str> {
        self.by
    }

    /// Add `value`, or move it if its score changed. Returns `true` if it
    /// was not already a member.
    pub fn insert(&self, value: &T) -> CollectionResult<bool> {
        let encoded = value.encode()?;
        let score = value
            .ordering_score(self.by)
            .ok_or_else(|| CollectionError::MissingScore {
                key: self.binding.key().to_string(),
                element: encoded.clone(),
            })?;
        let added = self.binding.store().zadd(self.binding.key(), score, &encoded)?;
        debug!(key = %self.binding.key(), score, added, "sorted set insert");
        Ok(added)
    }

    pub fn remove(&self, value: &T) -> CollectionResult<bool> {
        let encoded = value.encode()?;
        Ok(self.binding.store().zrem(self.binding.key(), &encoded)?)
    }

    pub fn contains(&self, value: &T) -> CollectionResult<bool> {
        Ok(self.score(value)?.is_some())
    }

    /// The score `value` is stored under, if it is a member.
    pub fn score(&self, value: &T) -> CollectionResult<Option<f64>> {
        let encoded = value.encode()?;
        Ok(self.binding.store().zscore(self.binding.key(), &encoded)?)
    }

    pub fn len(&self) -> CollectionResult<usize> {
        Ok(self.binding.store().zcard(self.binding.key())?)
    }

    pub fn is_empty(&self) -> CollectionResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Every member in ascending score order.
    pub fn to_vec(&self) -> CollectionResult<Vec<T>> {
        self.range_by_rank(0, -1)
    }

    /// Members between two ranks, inclusive; negative ranks count from the
    /// highest score.
    pub fn range_by_rank(&self, start: i64, stop: i64) -> CollectionResult<Vec<T>> {
        let raws = self.binding.store().zrange(self.binding.key(), start, stop)?;
        self.binding.resolve_all(raws)
    }

    /// Members whose score lies in `min..=max`, ascending.
    pub fn range_by_score(&self, min: f64, max: f64) -> CollectionResult<Vec<T>> {
        let raws = self
            .binding
            .store()
            .zrange_by_score(self.binding.key(), min, max)?;
        self.binding.resolve_all(raws)
    }

    /// Member with the lowest score.
    pub fn first(&self) -> CollectionResult<Option<T>> {
        self.at_rank(0)
    }

    /// Member with the highest score.
    pub fn last(&self) -> CollectionResult<Option<T>> {
        self.at_rank(-1)
    }

    /// Stored identities whose models no longer exist.
    pub fn unresolved(&self) -> CollectionResult<Vec<String>> {
        let raws = self.binding.store().zrange(self.binding.key(), 0, -1)?;
        self.binding.dangling::<T>(raws)
    }

    pub fn clear(&self) -> CollectionResult<()> {
        self.binding.store().delete(self.binding.key())?;
        Ok(())
    }

    fn at_rank(&self, rank: i64) -> CollectionResult<Option<T>> {
        let raws = self.binding.store().zrange(self.binding.key(), rank, rank)?;
        match raws.first() {
            Some(raw) => self.binding.resolve(raw),
            None => Ok(None),
        }
    }
}

impl<T> Describe for StoredSortedSet<T> {
    fn describe() -> FieldType {
        FieldType::Collection(CollectionShape::SortedSet)
    }
}

impl<T> fmt::Debug for StoredSortedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredSortedSet")
            .field("key", &self.binding.key())
            .field("by", &self.by)
            .finish()
    }
}
