//! Models and helpers shared by the unit tests of this crate.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use keyform_schema::{FieldDecl, FieldRole, Model, ModelDecl};
use keyform_store::{InMemoryStore, KeySpace, KeyValueStore, StoreError, StoreResult};
use keyform_types::Scalar;

use crate::binder::{Bind, Binder};
use crate::binding::{Binding, UnresolvedPolicy};
use crate::element::Resolve;
use crate::error::CollectionResult;
use crate::{StoredArray, StoredList, StoredMap, StoredSet, StoredSortedSet};

// ---------------------------------------------------------------------------
// Item: the element model
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub id: Option<i64>,
    pub name: String,
    pub price: f64,
}

impl Item {
    pub fn new(id: i64, name: &str, price: f64) -> Self {
        Self {
            id: Some(id),
            name: name.to_string(),
            price,
        }
    }
}

impl Model for Item {
    const NAME: &'static str = "Item";
    type Id = i64;

    fn declaration() -> ModelDecl {
        ModelDecl::new(Self::NAME)
            .field(FieldDecl::of::<i64>("id").id())
            .field(FieldDecl::of::<String>("name").attribute())
            .field(FieldDecl::of::<f64>("price").attribute())
    }

    fn id(&self) -> Option<&i64> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }
}

impl Resolve for Item {
    fn from_attributes(id: i64, attributes: &BTreeMap<String, String>) -> CollectionResult<Self> {
        let price = match attributes.get("price") {
            Some(text) => f64::from_text(text)?,
            None => 0.0,
        };
        Ok(Self {
            id: Some(id),
            name: attributes.get("name").cloned().unwrap_or_default(),
            price,
        })
    }

    fn numeric_attribute(&self, field: &str) -> Option<f64> {
        match field {
            "price" => Some(self.price),
            _ => None,
        }
    }
}

crate::model_element!(Item);

// ---------------------------------------------------------------------------
// Shop: an owner with one field of every collection kind
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct Shop {
    pub id: Option<i64>,
    pub stock: Option<StoredList<Item>>,
    pub tags: Option<StoredSet<String>>,
    pub by_price: Option<StoredSortedSet<Item>>,
    pub shelves: Option<StoredMap<i32, Item>>,
    pub recent: Option<StoredArray<Item>>,
}

impl Shop {
    pub fn with_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }
}

impl Model for Shop {
    const NAME: &'static str = "Shop";
    type Id = i64;

    fn declaration() -> ModelDecl {
        ModelDecl::new(Self::NAME)
            .field(FieldDecl::of::<i64>("id").id())
            .field(FieldDecl::of::<StoredList<Item>>("stock").list_of::<Item>())
            .field(FieldDecl::of::<StoredSet<String>>("tags").set_of::<String>())
            .field(
                FieldDecl::of::<StoredSortedSet<Item>>("by_price")
                    .sorted_set_of::<Item>(Some("price")),
            )
            .field(FieldDecl::of::<StoredMap<i32, Item>>("shelves").map_of::<i32, Item>())
            .field(FieldDecl::of::<StoredArray<Item>>("recent").array_of::<Item>(3))
    }

    fn id(&self) -> Option<&i64> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }
}

impl Bind for Shop {
    fn bind_collections(&mut self, binder: &Binder) -> CollectionResult<()> {
        binder.list("stock", &mut self.stock)?;
        binder.set("tags", &mut self.tags)?;
        binder.sorted_set("by_price", &mut self.by_price)?;
        binder.map("shelves", &mut self.shelves)?;
        binder.array("recent", &mut self.recent)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A binding on a fresh in-memory store, under `User:1:field`.
pub fn binding_for(role: FieldRole) -> Binding {
    binding_with_policy(role, UnresolvedPolicy::Skip)
}

pub fn binding_with_policy(role: FieldRole, policy: UnresolvedPolicy) -> Binding {
    binding_with(Arc::new(InMemoryStore::new()), role, policy)
}

/// A binding under `User:1:field` on the given store.
pub fn binding_on(store: Arc<dyn KeyValueStore>, role: FieldRole) -> Binding {
    binding_with(store, role, UnresolvedPolicy::Skip)
}

fn binding_with(
    store: Arc<dyn KeyValueStore>,
    role: FieldRole,
    policy: UnresolvedPolicy,
) -> Binding {
    Binding::new(
        store,
        KeySpace::default(),
        "User",
        "1",
        "field",
        role,
        policy,
    )
}

/// Write an item's attribute hash the way a model persister would.
pub fn save_item(binding: &Binding, item: &Item) {
    let id = item.id.expect("fixture items have identities").to_string();
    let key = binding.keys().model_key(Item::NAME, &id);
    binding.store().hset(&key, "name", &item.name).unwrap();
    binding.store().hset(&key, "price", &item.price.to_text()).unwrap();
}

pub fn delete_item(binding: &Binding, id: i64) {
    let key = binding.keys().model_key(Item::NAME, &id.to_string());
    binding.store().delete(&key).unwrap();
}

// ---------------------------------------------------------------------------
// FailingStore: an in-memory store whose writes can be switched off
// ---------------------------------------------------------------------------

/// Delegates to an [`InMemoryStore`]; while armed, every write fails with
/// [`StoreError::Backend`] without touching the data.
#[derive(Debug, Default)]
pub struct FailingStore {
    inner: InMemoryStore,
    failing: AtomicBool,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, on: bool) {
        self.failing.store(on, Ordering::SeqCst);
    }

    fn check(&self, op: &str) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Backend(format!("{op} refused")));
        }
        Ok(())
    }
}

impl KeyValueStore for FailingStore {
    fn exists(&self, key: &str) -> StoreResult<bool> {
        self.inner.exists(key)
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        self.check("delete")?;
        self.inner.delete(key)
    }

    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.check("set")?;
        self.inner.set(key, value)
    }

    fn incr(&self, key: &str) -> StoreResult<i64> {
        self.check("incr")?;
        self.inner.incr(key)
    }

    fn rpush(&self, key: &str, value: &str) -> StoreResult<usize> {
        self.check("rpush")?;
        self.inner.rpush(key, value)
    }

    fn replace_list(&self, key: &str, values: &[String]) -> StoreResult<()> {
        self.check("replace_list")?;
        self.inner.replace_list(key, values)
    }

    fn lindex(&self, key: &str, index: i64) -> StoreResult<Option<String>> {
        self.inner.lindex(key, index)
    }

    fn lset(&self, key: &str, index: i64, value: &str) -> StoreResult<()> {
        self.check("lset")?;
        self.inner.lset(key, index, value)
    }

    fn llen(&self, key: &str) -> StoreResult<usize> {
        self.inner.llen(key)
    }

    fn lremove_at(&self, key: &str, index: i64) -> StoreResult<Option<String>> {
        self.check("lremove_at")?;
        self.inner.lremove_at(key, index)
    }

    fn lrem(&self, key: &str, count: i64, value: &str) -> StoreResult<usize> {
        self.check("lrem")?;
        self.inner.lrem(key, count, value)
    }

    fn lrange(&self, key: &str, start: i64, stop: i64) -> StoreResult<Vec<String>> {
        self.inner.lrange(key, start, stop)
    }

    fn sadd(&self, key: &str, member: &str) -> StoreResult<bool> {
        self.check("sadd")?;
        self.inner.sadd(key, member)
    }

    fn srem(&self, key: &str, member: &str) -> StoreResult<bool> {
        self.check("srem")?;
        self.inner.srem(key, member)
    }

    fn sismember(&self, key: &str, member: &str) -> StoreResult<bool> {
        self.inner.sismember(key, member)
    }

    fn smembers(&self, key: &str) -> StoreResult<Vec<String>> {
        self.inner.smembers(key)
    }

    fn scard(&self, key: &str) -> StoreResult<usize> {
        self.inner.scard(key)
    }

    fn zadd(&self, key: &str, score: f64, member: &str) -> StoreResult<bool> {
        self.check("zadd")?;
        self.inner.zadd(key, score, member)
    }

    fn zrem(&self, key: &str, member: &str) -> StoreResult<bool> {
        self.check("zrem")?;
        self.inner.zrem(key, member)
    }

    fn zscore(&self, key: &str, member: &str) -> StoreResult<Option<f64>> {
        self.inner.zscore(key, member)
    }

    fn zcard(&self, key: &str) -> StoreResult<usize> {
        self.inner.zcard(key)
    }

    fn zrange(&self, key: &str, start: i64, stop: i64) -> StoreResult<Vec<String>> {
        self.inner.zrange(key, start, stop)
    }

    fn zrange_by_score(&self, key: &str, min: f64, max: f64) -> StoreResult<Vec<String>> {
        self.inner.zrange_by_score(key, min, max)
    }

    fn hget(&self, key: &str, field: &str) -> StoreResult<Option<String>> {
        self.inner.hget(key, field)
    }

    fn hset(&self, key: &str, field: &str, value: &str) -> StoreResult<bool> {
        self.check("hset")?;
        self.inner.hset(key, field, value)
    }

    fn hdel(&self, key: &str, field: &str) -> StoreResult<bool> {
        self.check("hdel")?;
        self.inner.hdel(key, field)
    }

    fn hgetall(&self, key: &str) -> StoreResult<BTreeMap<String, String>> {
        self.inner.hgetall(key)
    }

    fn hlen(&self, key: &str) -> StoreResult<usize> {
        self.inner.hlen(key)
    }
}
