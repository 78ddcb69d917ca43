use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{StoreError, StoreResult};
use crate::traits::KeyValueStore;

/// One stored structure.
#[derive(Clone, Debug)]
enum Entry {
    Text(String),
    List(Vec<String>),
    Set(BTreeSet<String>),
    SortedSet(BTreeMap<String, f64>),
    Hash(BTreeMap<String, String>),
}

impl Entry {
    fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "string",
            Self::List(_) => "list",
            Self::Set(_) => "set",
            Self::SortedSet(_) => "zset",
            Self::Hash(_) => "hash",
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Self::Text(_) => false,
            Self::List(v) => v.is_empty(),
            Self::Set(v) => v.is_empty(),
            Self::SortedSet(v) => v.is_empty(),
            Self::Hash(v) => v.is_empty(),
        }
    }
}

type Entries = HashMap<String, Entry>;

fn wrong_type(key: &str, expected: &'static str, found: &Entry) -> StoreError {
    StoreError::WrongType {
        key: key.to_string(),
        expected,
        found: found.type_name(),
    }
}

/// Generates a read accessor (absent key reads as `None`) and a write
/// accessor (absent key is created empty) for one structure kind.
macro_rules! accessors {
    ($read:ident, $write:ident, $variant:ident, $ty:ty, $name:literal) => {
        fn $read<'a>(entries: &'a Entries, key: &str) -> StoreResult<Option<&'a $ty>> {
            match entries.get(key) {
                None => Ok(None),
                Some(Entry::$variant(v)) => Ok(Some(v)),
                Some(other) => Err(wrong_type(key, $name, other)),
            }
        }

        fn $write<'a>(entries: &'a mut Entries, key: &str) -> StoreResult<&'a mut $ty> {
            let entry = entries
                .entry(key.to_string())
                .or_insert_with(|| Entry::$variant(Default::default()));
            match entry {
                Entry::$variant(v) => Ok(v),
                other => Err(wrong_type(key, $name, other)),
            }
        }
    };
}

accessors!(list_ref, list_mut, List, Vec<String>, "list");
accessors!(set_ref, set_mut, Set, BTreeSet<String>, "set");
accessors!(zset_ref, zset_mut, SortedSet, BTreeMap<String, f64>, "zset");
accessors!(hash_ref, hash_mut, Hash, BTreeMap<String, String>, "hash");

/// Drop `key` if its structure has become empty.
fn prune(entries: &mut Entries, key: &str) {
    if entries.get(key).is_some_and(Entry::is_empty) {
        entries.remove(key);
    }
}

#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    let index = if index < 0 { len + index } else { index };
    (0..len).contains(&index).then_some(index as usize)
}

#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn resolve_range(start: i64, stop: i64, len: usize) -> Option<(usize, usize)> {
    if len == 0 {
        return None;
    }
    let len = len as i64;
    let start = if start < 0 { len + start } else { start }.max(0);
    let stop = if stop < 0 { len + stop } else { stop }.min(len - 1);
    if start > stop || start >= len {
        return None;
    }
    Some((start as usize, stop as usize))
}

fn ranked(zset: &BTreeMap<String, f64>) -> Vec<(&String, f64)> {
    let mut members: Vec<(&String, f64)> = zset.iter().map(|(m, s)| (m, *s)).collect();
    members.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(b.0)));
    members
}

/// In-memory, HashMap-based key-value store.
///
/// Intended for tests and embedding. All structures are held in memory behind
/// a `RwLock`; a poisoned lock surfaces as [`StoreError::Backend`].
pub struct InMemoryStore {
    entries: RwLock<Entries>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Entries>> {
        self.entries
            .read()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Entries>> {
        self.entries
            .write()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }

    /// Returns `true` if no keys are stored.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read()?.is_empty())
    }

    /// All stored keys, sorted.
    pub fn keys(&self) -> StoreResult<Vec<String>> {
        let entries = self.read()?;
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    /// Remove every key.
    pub fn clear(&self) -> StoreResult<()> {
        self.write()?.clear();
        Ok(())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for InMemoryStore {
    fn exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self.read()?.contains_key(key))
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        Ok(self.write()?.remove(key).is_some())
    }

    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.read()?;
        match entries.get(key) {
            None => Ok(None),
            Some(Entry::Text(v)) => Ok(Some(v.clone())),
            Some(other) => Err(wrong_type(key, "string", other)),
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.write()?;
        match entries.get(key) {
            None | Some(Entry::Text(_)) => {
                entries.insert(key.to_string(), Entry::Text(value.to_string()));
                Ok(())
            }
            Some(other) => Err(wrong_type(key, "string", other)),
        }
    }

    fn incr(&self, key: &str) -> StoreResult<i64> {
        let mut entries = self.write()?;
        let current = match entries.get(key) {
            None => 0,
            Some(Entry::Text(v)) => v.parse::<i64>().map_err(|_| StoreError::NotAnInteger {
                key: key.to_string(),
            })?,
            Some(other) => return Err(wrong_type(key, "string", other)),
        };
        let next = current.checked_add(1).ok_or_else(|| StoreError::NotAnInteger {
            key: key.to_string(),
        })?;
        entries.insert(key.to_string(), Entry::Text(next.to_string()));
        Ok(next)
    }

    fn rpush(&self, key: &str, value: &str) -> StoreResult<usize> {
        let mut entries = self.write()?;
        let list = list_mut(&mut entries, key)?;
        list.push(value.to_string());
        Ok(list.len())
    }

    fn replace_list(&self, key: &str, values: &[String]) -> StoreResult<()> {
        let mut entries = self.write()?;
        match entries.get(key) {
            None | Some(Entry::List(_)) => {}
            Some(other) => return Err(wrong_type(key, "list", other)),
        }
        if values.is_empty() {
            entries.remove(key);
        } else {
            entries.insert(key.to_string(), Entry::List(values.to_vec()));
        }
        Ok(())
    }

    fn lindex(&self, key: &str, index: i64) -> StoreResult<Option<String>> {
        let entries = self.read()?;
        let Some(list) = list_ref(&entries, key)? else {
            return Ok(None);
        };
        Ok(resolve_index(index, list.len()).map(|i| list[i].clone()))
    }

    fn lset(&self, key: &str, index: i64, value: &str) -> StoreResult<()> {
        let mut entries = self.write()?;
        let len = list_ref(&entries, key)?.map_or(0, Vec::len);
        let Some(i) = resolve_index(index, len) else {
            return Err(StoreError::IndexOutOfRange {
                key: key.to_string(),
                index,
                len,
            });
        };
        list_mut(&mut entries, key)?[i] = value.to_string();
        Ok(())
    }

    fn llen(&self, key: &str) -> StoreResult<usize> {
        Ok(list_ref(&*self.read()?, key)?.map_or(0, Vec::len))
    }

    fn lremove_at(&self, key: &str, index: i64) -> StoreResult<Option<String>> {
        let mut entries = self.write()?;
        let len = list_ref(&entries, key)?.map_or(0, Vec::len);
        let Some(i) = resolve_index(index, len) else {
            return Ok(None);
        };
        let removed = list_mut(&mut entries, key)?.remove(i);
        prune(&mut entries, key);
        Ok(Some(removed))
    }

    #[allow(clippy::cast_sign_loss)]
    fn lrem(&self, key: &str, count: i64, value: &str) -> StoreResult<usize> {
        let mut entries = self.write()?;
        if list_ref(&entries, key)?.is_none() {
            return Ok(0);
        }
        let list = list_mut(&mut entries, key)?;
        let limit = if count == 0 { usize::MAX } else { count.unsigned_abs() as usize };
        let mut removed = 0;
        if count >= 0 {
            let mut i = 0;
            while i < list.len() && removed < limit {
                if list[i] == value {
                    list.remove(i);
                    removed += 1;
                } else {
                    i += 1;
                }
            }
        } else {
            let mut i = list.len();
            while i > 0 && removed < limit {
                i -= 1;
                if list[i] == value {
                    list.remove(i);
                    removed += 1;
                }
            }
        }
        prune(&mut entries, key);
        Ok(removed)
    }

    fn lrange(&self, key: &str, start: i64, stop: i64) -> StoreResult<Vec<String>> {
        let entries = self.read()?;
        let Some(list) = list_ref(&entries, key)? else {
            return Ok(Vec::new());
        };
        Ok(resolve_range(start, stop, list.len())
            .map(|(s, e)| list[s..=e].to_vec())
            .unwrap_or_default())
    }

    fn sadd(&self, key: &str, member: &str) -> StoreResult<bool> {
        let mut entries = self.write()?;
        Ok(set_mut(&mut entries, key)?.insert(member.to_string()))
    }

    fn srem(&self, key: &str, member: &str) -> StoreResult<bool> {
        let mut entries = self.write()?;
        if set_ref(&entries, key)?.is_none() {
            return Ok(false);
        }
        let removed = set_mut(&mut entries, key)?.remove(member);
        prune(&mut entries, key);
        Ok(removed)
    }

    fn sismember(&self, key: &str, member: &str) -> StoreResult<bool> {
        Ok(set_ref(&*self.read()?, key)?.is_some_and(|set| set.contains(member)))
    }

    fn smembers(&self, key: &str) -> StoreResult<Vec<String>> {
        Ok(set_ref(&*self.read()?, key)?
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default())
    }

    fn scard(&self, key: &str) -> StoreResult<usize> {
        Ok(set_ref(&*self.read()?, key)?.map_or(0, BTreeSet::len))
    }

    fn zadd(&self, key: &str, score: f64, member: &str) -> StoreResult<bool> {
        if score.is_nan() {
            return Err(StoreError::Backend(format!("score for {key} is not a number")));
        }
        let mut entries = self.write()?;
        Ok(zset_mut(&mut entries, key)?
            .insert(member.to_string(), score)
            .is_none())
    }

    fn zrem(&self, key: &str, member: &str) -> StoreResult<bool> {
        let mut entries = self.write()?;
        if zset_ref(&entries, key)?.is_none() {
            return Ok(false);
        }
        let removed = zset_mut(&mut entries, key)?.remove(member).is_some();
        prune(&mut entries, key);
        Ok(removed)
    }

    fn zscore(&self, key: &str, member: &str) -> StoreResult<Option<f64>> {
        Ok(zset_ref(&*self.read()?, key)?.and_then(|zset| zset.get(member).copied()))
    }

    fn zcard(&self, key: &str) -> StoreResult<usize> {
        Ok(zset_ref(&*self.read()?, key)?.map_or(0, BTreeMap::len))
    }

    fn zrange(&self, key: &str, start: i64, stop: i64) -> StoreResult<Vec<String>> {
        let entries = self.read()?;
        let Some(zset) = zset_ref(&entries, key)? else {
            return Ok(Vec::new());
        };
        let members = ranked(zset);
        Ok(resolve_range(start, stop, members.len())
            .map(|(s, e)| members[s..=e].iter().map(|(m, _)| (*m).clone()).collect())
            .unwrap_or_default())
    }

    fn zrange_by_score(&self, key: &str, min: f64, max: f64) -> StoreResult<Vec<String>> {
        let entries = self.read()?;
        let Some(zset) = zset_ref(&entries, key)? else {
            return Ok(Vec::new());
        };
        Ok(ranked(zset)
            .into_iter()
            .filter(|(_, score)| *score >= min && *score <= max)
            .map(|(m, _)| m.clone())
            .collect())
    }

    fn hget(&self, key: &str, field: &str) -> StoreResult<Option<String>> {
        Ok(hash_ref(&*self.read()?, key)?.and_then(|hash| hash.get(field).cloned()))
    }

    fn hset(&self, key: &str, field: &str, value: &str) -> StoreResult<bool> {
        let mut entries = self.write()?;
        Ok(hash_mut(&mut entries, key)?
            .insert(field.to_string(), value.to_string())
            .is_none())
    }

    fn hdel(&self, key: &str, field: &str) -> StoreResult<bool> {
        let mut entries = self.write()?;
        if hash_ref(&entries, key)?.is_none() {
            return Ok(false);
        }
        let removed = hash_mut(&mut entries, key)?.remove(field).is_some();
        prune(&mut entries, key);
        Ok(removed)
    }

    fn hgetall(&self, key: &str) -> StoreResult<BTreeMap<String, String>> {
        Ok(hash_ref(&*self.read()?, key)?.cloned().unwrap_or_default())
    }

    fn hlen(&self, key: &str) -> StoreResult<usize> {
        Ok(hash_ref(&*self.read()?, key)?.map_or(0, BTreeMap::len))
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("key_count", &self.len().ok())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Strings and keys
    // -----------------------------------------------------------------------

    #[test]
    fn set_get_delete() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        assert!(store.exists("k").unwrap());
        assert!(store.delete("k").unwrap());
        assert!(!store.delete("k").unwrap());
        assert!(!store.exists("k").unwrap());
    }

    #[test]
    fn incr_counts_from_zero() {
        let store = InMemoryStore::new();
        assert_eq!(store.incr("seq").unwrap(), 1);
        assert_eq!(store.incr("seq").unwrap(), 2);
        assert_eq!(store.get("seq").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn incr_rejects_non_integer() {
        let store = InMemoryStore::new();
        store.set("seq", "abc").unwrap();
        assert_eq!(
            store.incr("seq").unwrap_err(),
            StoreError::NotAnInteger { key: "seq".into() }
        );
    }

    #[test]
    fn wrong_type_is_reported() {
        let store = InMemoryStore::new();
        store.rpush("k", "a").unwrap();
        let err = store.sadd("k", "a").unwrap_err();
        assert_eq!(
            err,
            StoreError::WrongType {
                key: "k".into(),
                expected: "set",
                found: "list",
            }
        );
        assert!(store.get("k").is_err());
        assert!(store.set("k", "x").is_err());
    }

    // -----------------------------------------------------------------------
    // Lists
    // -----------------------------------------------------------------------

    #[test]
    fn list_push_and_range() {
        let store = InMemoryStore::new();
        assert_eq!(store.rpush("l", "a").unwrap(), 1);
        assert_eq!(store.rpush("l", "b").unwrap(), 2);
        assert_eq!(store.rpush("l", "c").unwrap(), 3);
        assert_eq!(store.lrange_all("l").unwrap(), vec!["a", "b", "c"]);
        assert_eq!(store.lrange("l", 1, 1).unwrap(), vec!["b"]);
        assert_eq!(store.lrange("l", -2, -1).unwrap(), vec!["b", "c"]);
        assert_eq!(store.lrange("l", 5, 10).unwrap(), Vec::<String>::new());
        assert_eq!(store.llen("l").unwrap(), 3);
    }

    #[test]
    fn replace_list_swaps_whole_content() {
        let store = InMemoryStore::new();
        store.rpush("l", "a").unwrap();
        store.rpush("l", "b").unwrap();
        store.replace_list("l", &["x".to_string(), "y".to_string(), "z".to_string()]).unwrap();
        assert_eq!(store.lrange_all("l").unwrap(), vec!["x", "y", "z"]);

        store.replace_list("l", &[]).unwrap();
        assert!(!store.exists("l").unwrap());
    }

    #[test]
    fn replace_list_refuses_other_structures() {
        let store = InMemoryStore::new();
        store.sadd("s", "m").unwrap();
        let err = store.replace_list("s", &["x".to_string()]).unwrap_err();
        assert!(matches!(err, StoreError::WrongType { expected: "list", found: "set", .. }));
        assert!(store.sismember("s", "m").unwrap());
    }

    #[test]
    fn list_index_access() {
        let store = InMemoryStore::new();
        store.rpush("l", "a").unwrap();
        store.rpush("l", "b").unwrap();
        assert_eq!(store.lindex("l", 0).unwrap().as_deref(), Some("a"));
        assert_eq!(store.lindex("l", -1).unwrap().as_deref(), Some("b"));
        assert_eq!(store.lindex("l", 2).unwrap(), None);
        store.lset("l", 1, "z").unwrap();
        assert_eq!(store.lrange_all("l").unwrap(), vec!["a", "z"]);
    }

    #[test]
    fn lset_out_of_range_fails() {
        let store = InMemoryStore::new();
        let err = store.lset("l", 0, "x").unwrap_err();
        assert_eq!(
            err,
            StoreError::IndexOutOfRange {
                key: "l".into(),
                index: 0,
                len: 0,
            }
        );
        assert!(!store.exists("l").unwrap());
    }

    #[test]
    fn remove_at_and_prune() {
        let store = InMemoryStore::new();
        store.rpush("l", "a").unwrap();
        store.rpush("l", "b").unwrap();
        assert_eq!(store.lremove_at("l", 0).unwrap().as_deref(), Some("a"));
        assert_eq!(store.lremove_at("l", 5).unwrap(), None);
        assert_eq!(store.lremove_at("l", -1).unwrap().as_deref(), Some("b"));
        assert!(!store.exists("l").unwrap());
    }

    #[test]
    fn lrem_directions() {
        let store = InMemoryStore::new();
        for v in ["x", "a", "x", "b", "x"] {
            store.rpush("l", v).unwrap();
        }
        assert_eq!(store.lrem("l", 1, "x").unwrap(), 1);
        assert_eq!(store.lrange_all("l").unwrap(), vec!["a", "x", "b", "x"]);
        assert_eq!(store.lrem("l", -1, "x").unwrap(), 1);
        assert_eq!(store.lrange_all("l").unwrap(), vec!["a", "x", "b"]);
        assert_eq!(store.lrem("l", 0, "x").unwrap(), 1);
        assert_eq!(store.lrange_all("l").unwrap(), vec!["a", "b"]);
        assert_eq!(store.lrem("missing", 0, "x").unwrap(), 0);
    }

    // -----------------------------------------------------------------------
    // Sets
    // -----------------------------------------------------------------------

    #[test]
    fn set_membership() {
        let store = InMemoryStore::new();
        assert!(store.sadd("s", "a").unwrap());
        assert!(!store.sadd("s", "a").unwrap());
        assert!(store.sadd("s", "b").unwrap());
        assert_eq!(store.scard("s").unwrap(), 2);
        assert!(store.sismember("s", "a").unwrap());
        assert!(store.srem("s", "a").unwrap());
        assert!(!store.srem("s", "a").unwrap());
        assert_eq!(store.smembers("s").unwrap(), vec!["b"]);
    }

    // -----------------------------------------------------------------------
    // Sorted sets
    // -----------------------------------------------------------------------

    #[test]
    fn zset_orders_by_score_then_member() {
        let store = InMemoryStore::new();
        store.zadd("z", 3.0, "c").unwrap();
        store.zadd("z", 1.0, "b").unwrap();
        store.zadd("z", 1.0, "a").unwrap();
        store.zadd("z", 2.0, "d").unwrap();
        assert_eq!(store.zrange("z", 0, -1).unwrap(), vec!["a", "b", "d", "c"]);
        assert_eq!(store.zrange("z", 0, 0).unwrap(), vec!["a"]);
        assert_eq!(store.zrange_by_score("z", 1.5, 3.0).unwrap(), vec!["d", "c"]);
    }

    #[test]
    fn zadd_rescores_existing_member() {
        let store = InMemoryStore::new();
        assert!(store.zadd("z", 1.0, "a").unwrap());
        assert!(store.zadd("z", 2.0, "b").unwrap());
        assert!(!store.zadd("z", 5.0, "a").unwrap());
        assert_eq!(store.zcard("z").unwrap(), 2);
        assert_eq!(store.zscore("z", "a").unwrap(), Some(5.0));
        assert_eq!(store.zrange("z", 0, -1).unwrap(), vec!["b", "a"]);
    }

    #[test]
    fn zadd_rejects_nan() {
        let store = InMemoryStore::new();
        assert!(matches!(
            store.zadd("z", f64::NAN, "a"),
            Err(StoreError::Backend(_))
        ));
    }

    #[test]
    fn zrem_prunes() {
        let store = InMemoryStore::new();
        store.zadd("z", 1.0, "a").unwrap();
        assert!(store.zrem("z", "a").unwrap());
        assert!(!store.exists("z").unwrap());
    }

    // -----------------------------------------------------------------------
    // Hashes
    // -----------------------------------------------------------------------

    #[test]
    fn hash_fields() {
        let store = InMemoryStore::new();
        assert!(store.hset("h", "name", "Oslo").unwrap());
        assert!(!store.hset("h", "name", "Bergen").unwrap());
        assert!(store.hset("h", "size", "3").unwrap());
        assert_eq!(store.hget("h", "name").unwrap().as_deref(), Some("Bergen"));
        assert!(store.hexists("h", "size").unwrap());
        assert_eq!(store.hlen("h").unwrap(), 2);
        let all = store.hgetall("h").unwrap();
        assert_eq!(all.get("size").map(String::as_str), Some("3"));
        assert!(store.hdel("h", "name").unwrap());
        assert!(store.hdel("h", "size").unwrap());
        assert!(!store.exists("h").unwrap());
        assert!(store.hgetall("h").unwrap().is_empty());
    }

    // -----------------------------------------------------------------------
    // Utility methods
    // -----------------------------------------------------------------------

    #[test]
    fn keys_len_and_clear() {
        let store = InMemoryStore::new();
        assert!(store.is_empty().unwrap());
        store.set("b", "1").unwrap();
        store.rpush("a", "1").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["a", "b"]);
        assert_eq!(store.len().unwrap(), 2);
        store.clear().unwrap();
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn poisoned_lock_surfaces_as_backend_error() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryStore::new());
        store.set("k", "v").unwrap();
        let holder = Arc::clone(&store);
        let outcome = thread::spawn(move || {
            let _guard = holder.entries.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();
        assert!(outcome.is_err());

        assert!(matches!(store.len(), Err(StoreError::Backend(_))));
        assert!(matches!(store.is_empty(), Err(StoreError::Backend(_))));
        assert!(matches!(store.get("k"), Err(StoreError::Backend(_))));
    }

    #[test]
    fn concurrent_writes_are_serialized() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..100 {
                        store.incr("counter").unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().expect("thread should not panic");
        }
        assert_eq!(store.get("counter").unwrap().as_deref(), Some("800"));
    }

    #[test]
    fn debug_format() {
        let store = InMemoryStore::new();
        store.set("x", "1").unwrap();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryStore"));
        assert!(debug.contains("key_count"));
    }
}
