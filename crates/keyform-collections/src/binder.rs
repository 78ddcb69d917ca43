use std::sync::Arc;

use keyform_schema::{CollectionShape, ElementType, FieldRole, Model, ModelSchema};
use keyform_store::{KeySpace, KeyValueStore};
use tracing::debug;

use crate::array::StoredArray;
use crate::binding::{Binding, UnresolvedPolicy};
use crate::element::Element;
use crate::error::{CollectionError, CollectionResult};
use crate::list::StoredList;
use crate::map::StoredMap;
use crate::set::StoredSet;
use crate::sorted_set::StoredSortedSet;

/// A model whose collection fields can be bound to the store.
///
/// Implementations hand each collection slot to the matching [`Binder`]
/// method:
///
/// ```ignore
/// impl Bind for User {
///     fn bind_collections(&mut self, binder: &Binder) -> CollectionResult<()> {
///         binder.list("likes", &mut self.likes)?;
///         binder.sorted_set("ordered", &mut self.ordered)
///     }
/// }
/// ```
pub trait Bind: Model {
    fn bind_collections(&mut self, binder: &Binder) -> CollectionResult<()>;
}

/// Creates proxies for one identified model instance.
///
/// Each request is checked against the model's classified schema: the field
/// must exist, have the requested collection role, and hold the requested
/// element type(s). Slots that already hold a proxy are left untouched, so
/// binding the same instance twice is harmless.
pub struct Binder {
    store: Arc<dyn KeyValueStore>,
    keys: KeySpace,
    schema: Arc<ModelSchema>,
    owner_id: String,
    policy: UnresolvedPolicy,
}

impl Binder {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        keys: KeySpace,
        schema: Arc<ModelSchema>,
        owner_id: impl Into<String>,
        policy: UnresolvedPolicy,
    ) -> Self {
        Self {
            store,
            keys,
            schema,
            owner_id: owner_id.into(),
            policy,
        }
    }

    pub fn schema(&self) -> &ModelSchema {
        &self.schema
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn list<T: Element>(
        &self,
        field: &'static str,
        slot: &mut Option<StoredList<T>>,
    ) -> CollectionResult<()> {
        if slot.is_none() {
            let binding = self.binding(field, CollectionShape::List, &[T::element_type()])?;
            *slot = Some(StoredList::new(binding));
        }
        Ok(())
    }

    pub fn set<T: Element>(
        &self,
        field: &'static str,
        slot: &mut Option<StoredSet<T>>,
    ) -> CollectionResult<()> {
        if slot.is_none() {
            let binding = self.binding(field, CollectionShape::Set, &[T::element_type()])?;
            *slot = Some(StoredSet::new(binding));
        }
        Ok(())
    }

    pub fn sorted_set<T: Element>(
        &self,
        field: &'static str,
        slot: &mut Option<StoredSortedSet<T>>,
    ) -> CollectionResult<()> {
        if slot.is_none() {
            let binding =
                self.binding(field, CollectionShape::SortedSet, &[T::element_type()])?;
            *slot = Some(StoredSortedSet::new(binding));
        }
        Ok(())
    }

    pub fn map<K: Element, V: Element>(
        &self,
        field: &'static str,
        slot: &mut Option<StoredMap<K, V>>,
    ) -> CollectionResult<()> {
        if slot.is_none() {
            let binding = self.binding(
                field,
                CollectionShape::Map,
                &[K::element_type(), V::element_type()],
            )?;
            *slot = Some(StoredMap::new(binding));
        }
        Ok(())
    }

    pub fn array<T: Element>(
        &self,
        field: &'static str,
        slot: &mut Option<StoredArray<T>>,
    ) -> CollectionResult<()> {
        if slot.is_none() {
            let binding = self.binding(field, CollectionShape::Array, &[T::element_type()])?;
            *slot = Some(StoredArray::new(binding));
        }
        Ok(())
    }

    fn binding(
        &self,
        field: &'static str,
        shape: CollectionShape,
        requested: &[ElementType],
    ) -> CollectionResult<Binding> {
        let mismatch = |reason: String| CollectionError::BindingMismatch {
            model: self.schema.name,
            field,
            reason,
        };

        let resolved = self
            .schema
            .field(field)
            .ok_or_else(|| mismatch("no such field".into()))?;
        if resolved.role.shape() != Some(shape) {
            return Err(mismatch(format!(
                "classified as {:?}, not a {}",
                resolved.role,
                shape.type_name()
            )));
        }

        let declared = declared_elements(&resolved.role);
        if declared != requested {
            let names = |types: &[ElementType]| {
                types.iter().map(ElementType::type_name).collect::<Vec<_>>().join(", ")
            };
            return Err(mismatch(format!(
                "declared with element type(s) [{}], bound as [{}]",
                names(&declared),
                names(requested)
            )));
        }

        debug!(model = self.schema.name, id = %self.owner_id, field, "collection bound");
        Ok(Binding::new(
            Arc::clone(&self.store),
            self.keys.clone(),
            self.schema.name,
            self.owner_id.clone(),
            field,
            resolved.role.clone(),
            self.policy,
        ))
    }
}

fn declared_elements(role: &FieldRole) -> Vec<ElementType> {
    match role {
        FieldRole::List(element) | FieldRole::Set(element) => vec![element.clone()],
        FieldRole::SortedSet { element, .. } | FieldRole::Array { element, .. } => {
            vec![element.clone()]
        }
        FieldRole::Map { key, value } => vec![key.clone(), value.clone()],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{save_item, Item, Shop};
    use keyform_schema::Classifier;
    use keyform_store::InMemoryStore;

    fn binder(store: &Arc<InMemoryStore>, id: &str) -> Binder {
        let schema = Classifier::default().classify::<Shop>().unwrap();
        Binder::new(
            Arc::clone(store) as Arc<dyn KeyValueStore>,
            KeySpace::default(),
            Arc::new(schema),
            id,
            UnresolvedPolicy::Skip,
        )
    }

    #[test]
    fn binds_every_collection_field() {
        let store = Arc::new(InMemoryStore::new());
        let mut shop = Shop::with_id(1);
        shop.bind_collections(&binder(&store, "1")).unwrap();

        let stock = shop.stock.as_ref().unwrap();
        assert_eq!(stock.binding().key(), "Shop:1:stock");
        assert_eq!(shop.tags.as_ref().unwrap().binding().key(), "Shop:1:tags");
        assert_eq!(shop.by_price.as_ref().unwrap().ordering_key(), Some("price"));
        assert_eq!(shop.shelves.as_ref().unwrap().binding().key(), "Shop:1:shelves");
        assert_eq!(shop.recent.as_ref().unwrap().bound(), 3);
    }

    #[test]
    fn rebinding_keeps_existing_proxies() {
        let store = Arc::new(InMemoryStore::new());
        let mut shop = Shop::with_id(1);
        shop.bind_collections(&binder(&store, "1")).unwrap();
        // A binder for a different identity must not replace bound slots.
        shop.bind_collections(&binder(&store, "2")).unwrap();
        assert_eq!(shop.stock.as_ref().unwrap().binding().key(), "Shop:1:stock");
    }

    #[test]
    fn bound_proxies_write_through() {
        let store = Arc::new(InMemoryStore::new());
        let mut shop = Shop::with_id(1);
        shop.bind_collections(&binder(&store, "1")).unwrap();

        let lamp = Item::new(5, "lamp", 10.0);
        let stock = shop.stock.as_ref().unwrap();
        save_item(stock.binding(), &lamp);
        stock.push(&lamp).unwrap();
        assert_eq!(store.lrange_all("Shop:1:stock").unwrap(), ["5"]);
    }

    #[test]
    fn wrong_shape_is_rejected() {
        let store = Arc::new(InMemoryStore::new());
        let mut slot: Option<StoredSet<Item>> = None;
        let err = binder(&store, "1").set("stock", &mut slot).unwrap_err();
        assert!(matches!(err, CollectionError::BindingMismatch { field: "stock", .. }));
        assert!(slot.is_none());
    }

    #[test]
    fn wrong_element_type_is_rejected() {
        let store = Arc::new(InMemoryStore::new());
        let mut slot: Option<StoredList<String>> = None;
        let err = binder(&store, "1").list("stock", &mut slot).unwrap_err();
        assert!(err.to_string().contains("[Item]"));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let store = Arc::new(InMemoryStore::new());
        let mut slot: Option<StoredList<Item>> = None;
        let err = binder(&store, "1").list("nothing", &mut slot).unwrap_err();
        assert!(err.to_string().contains("no such field"));
    }

    #[test]
    fn array_and_sorted_set_only_bind_their_own_shape() {
        let store = Arc::new(InMemoryStore::new());
        let b = binder(&store, "1");

        let mut array: Option<StoredArray<Item>> = None;
        assert!(b.array("stock", &mut array).is_err());
        assert!(array.is_none());
        b.array("recent", &mut array).unwrap();
        assert_eq!(array.as_ref().unwrap().bound(), 3);

        let mut sorted: Option<StoredSortedSet<Item>> = None;
        assert!(b.sorted_set("stock", &mut sorted).is_err());
        assert!(sorted.is_none());
        b.sorted_set("by_price", &mut sorted).unwrap();
        assert_eq!(sorted.as_ref().unwrap().ordering_key(), Some("price"));
    }
}
