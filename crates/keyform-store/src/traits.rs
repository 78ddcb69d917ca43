use std::collections::BTreeMap;

use crate::error::StoreResult;

/// Synchronous key-value backend with native strings, lists, sets, sorted
/// sets and hashes.
///
/// All implementations must satisfy these invariants:
/// - Every call returns only after the backend has acknowledged it; nothing
///   is buffered or batched on the caller's behalf.
/// - Calls issued in sequence from one thread are applied in that order.
/// - Operating on a key that holds a different structure fails with
///   [`StoreError::WrongType`](crate::StoreError::WrongType).
/// - Removing the last element of a structure removes the key.
/// - Backend failures are returned as errors, never retried or swallowed.
///
/// Positional arguments follow the usual list conventions: indices are
/// zero-based, negative indices count from the end (`-1` is the last
/// element), and ranges are inclusive at both ends.
pub trait KeyValueStore: Send + Sync {
    // ---- Keys ----

    /// Whether any structure is stored under `key`.
    fn exists(&self, key: &str) -> StoreResult<bool>;

    /// Remove whatever is stored under `key`. Returns `true` if it existed.
    fn delete(&self, key: &str) -> StoreResult<bool>;

    // ---- Strings ----

    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Increment an integer counter (absent counts as 0) and return the new value.
    fn incr(&self, key: &str) -> StoreResult<i64>;

    // ---- Lists ----

    /// Append to the tail. Returns the new length.
    fn rpush(&self, key: &str, value: &str) -> StoreResult<usize>;

    /// Replace the whole list at `key` with `values` as one operation.
    ///
    /// Either the new content is fully stored or the old content is left
    /// untouched. An empty `values` removes the key.
    fn replace_list(&self, key: &str, values: &[String]) -> StoreResult<()>;

    /// Element at `index`, or `None` when out of range.
    fn lindex(&self, key: &str, index: i64) -> StoreResult<Option<String>>;

    /// Overwrite the element at `index`; fails when out of range.
    fn lset(&self, key: &str, index: i64, value: &str) -> StoreResult<()>;

    fn llen(&self, key: &str) -> StoreResult<usize>;

    /// Remove and return the element at `index`, or `None` when out of range.
    fn lremove_at(&self, key: &str, index: i64) -> StoreResult<Option<String>>;

    /// Remove occurrences of `value`: the first `count` from the head when
    /// positive, from the tail when negative, all when zero. Returns the
    /// number removed.
    fn lrem(&self, key: &str, count: i64, value: &str) -> StoreResult<usize>;

    fn lrange(&self, key: &str, start: i64, stop: i64) -> StoreResult<Vec<String>>;

    // ---- Sets ----

    /// Returns `true` if the member was not already present.
    fn sadd(&self, key: &str, member: &str) -> StoreResult<bool>;

    /// Returns `true` if the member was present.
    fn srem(&self, key: &str, member: &str) -> StoreResult<bool>;

    fn sismember(&self, key: &str, member: &str) -> StoreResult<bool>;

    fn smembers(&self, key: &str) -> StoreResult<Vec<String>>;

    fn scard(&self, key: &str) -> StoreResult<usize>;

    // ---- Sorted sets ----

    /// Add or re-score a member. Returns `true` if the member is new.
    fn zadd(&self, key: &str, score: f64, member: &str) -> StoreResult<bool>;

    /// Returns `true` if the member was present.
    fn zrem(&self, key: &str, member: &str) -> StoreResult<bool>;

    fn zscore(&self, key: &str, member: &str) -> StoreResult<Option<f64>>;

    fn zcard(&self, key: &str) -> StoreResult<usize>;

    /// Members by ascending rank (score, then member text).
    fn zrange(&self, key: &str, start: i64, stop: i64) -> StoreResult<Vec<String>>;

    /// Members whose score lies in `min..=max`, ascending.
    fn zrange_by_score(&self, key: &str, min: f64, max: f64) -> StoreResult<Vec<String>>;

    // ---- Hashes ----

    fn hget(&self, key: &str, field: &str) -> StoreResult<Option<String>>;

    /// Returns `true` if the field is new.
    fn hset(&self, key: &str, field: &str, value: &str) -> StoreResult<bool>;

    /// Returns `true` if the field was present.
    fn hdel(&self, key: &str, field: &str) -> StoreResult<bool>;

    fn hgetall(&self, key: &str) -> StoreResult<BTreeMap<String, String>>;

    fn hlen(&self, key: &str) -> StoreResult<usize>;

    /// Whether the hash at `key` has `field`.
    fn hexists(&self, key: &str, field: &str) -> StoreResult<bool> {
        Ok(self.hget(key, field)?.is_some())
    }

    /// The full list. Default implementation reads the `0..=-1` range.
    fn lrange_all(&self, key: &str) -> StoreResult<Vec<String>> {
        self.lrange(key, 0, -1)
    }
}
