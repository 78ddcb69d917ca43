use std::fmt;
use std::marker::PhantomData;

use keyform_schema::{CollectionShape, Describe, FieldType};
use tracing::debug;

use crate::binding::Binding;
use crate::element::Element;
use crate::error::CollectionResult;

/// Key/value pairs stored as a native hash.
///
/// Keys and values are each a scalar or a model, independently. Writing an
/// existing key replaces its value.
pub struct StoredMap<K, V> {
    binding: Binding,
    _entry: PhantomData<fn() -> (K, V)>,
}

impl<K: Element, V: Element> StoredMap<K, V> {
    pub(crate) fn new(binding: Binding) -> Self {
        Self {
            binding,
            _entry: PhantomData,
        }
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    /// Set `key` to `value`. Returns `true` if the key is new.
    pub fn insert(&self, key: &K, value: &V) -> CollectionResult<bool> {
        let field = key.encode()?;
        let encoded = value.encode()?;
        let added = self
            .binding
            .store()
            .hset(self.binding.key(), &field, &encoded)?;
        debug!(key = %self.binding.key(), field = %field, added, "map insert");
        Ok(added)
    }

    pub fn get(&self, key: &K) -> CollectionResult<Option<V>> {
        let field = key.encode()?;
        match self.binding.store().hget(self.binding.key(), &field)? {
            Some(raw) => self.binding.resolve(&raw),
            None => Ok(None),
        }
    }

    /// Remove `key`. Returns `true` if it was present.
    pub fn remove(&self, key: &K) -> CollectionResult<bool> {
        let field = key.encode()?;
        Ok(self.binding.store().hdel(self.binding.key(), &field)?)
    }

    pub fn contains_key(&self, key: &K) -> CollectionResult<bool> {
        let field = key.encode()?;
        Ok(self.binding.store().hexists(self.binding.key(), &field)?)
    }

    pub fn len(&self) -> CollectionResult<usize> {
        Ok(self.binding.store().hlen(self.binding.key())?)
    }

    pub fn is_empty(&self) -> CollectionResult<bool> {
        Ok(self.len()? == 0)
    }

    pub fn keys(&self) -> CollectionResult<Vec<K>> {
        let raws = self.binding.store().hgetall(self.binding.key())?;
        self.binding.resolve_all(raws.into_keys().collect())
    }

    pub fn values(&self) -> CollectionResult<Vec<V>> {
        let raws = self.binding.store().hgetall(self.binding.key())?;
        self.binding.resolve_all(raws.into_values().collect())
    }

    /// Every pair, ordered by stored key text. A pair is dropped when either
    /// side no longer resolves.
    pub fn entries(&self) -> CollectionResult<Vec<(K, V)>> {
        let raws = self.binding.store().hgetall(self.binding.key())?;
        let mut entries = Vec::with_capacity(raws.len());
        for (raw_key, raw_value) in raws {
            let key = self.binding.resolve::<K>(&raw_key)?;
            let value = self.binding.resolve::<V>(&raw_value)?;
            if let (Some(key), Some(value)) = (key, value) {
                entries.push((key, value));
            }
        }
        Ok(entries)
    }

    /// Stored identities, keys and values alike, whose models no longer exist.
    pub fn unresolved(&self) -> CollectionResult<Vec<String>> {
        let raws = self.binding.store().hgetall(self.binding.key())?;
        let mut dangling = self.binding.dangling::<K>(raws.keys().cloned())?;
        dangling.extend(self.binding.dangling::<V>(raws.into_values())?);
        Ok(dangling)
    }

    pub fn clear(&self) -> CollectionResult<()> {
        self.binding.store().delete(self.binding.key())?;
        Ok(())
    }
}

impl<K, V> Describe for StoredMap<K, V> {
    fn describe() -> FieldType {
        FieldType::Collection(CollectionShape::Map)
    }
}

impl<K, V> fmt::Debug for StoredMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredMap")
            .field("key", &self.binding.key())
            .finish()
    }
}
