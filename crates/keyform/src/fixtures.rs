//! Models shared by the tests of this crate.

use std::collections::BTreeMap;
use std::sync::Arc;

use keyform_collections::{
    Bind, Binder, CollectionResult, Resolve, StoredArray, StoredList, StoredMap, StoredSet,
    StoredSortedSet,
};
use keyform_schema::{FieldDecl, Model, ModelDecl};
use keyform_store::InMemoryStore;
use keyform_types::{Scalar, Uuid};

use crate::config::MapperConfig;
use crate::mapper::Mapper;

pub fn mapper() -> Mapper {
    match Mapper::new(Arc::new(InMemoryStore::new()), MapperConfig::default()) {
        Ok(m) => m,
        Err(e) => panic!("default config is valid: {e}"),
    }
}

/// Write an inhabitant's attribute hash the way a model persister would.
pub fn save_inhabitant(mapper: &Mapper, inhabitant: &Inhabitant) {
    let id = mapper
        .identity_of(inhabitant)
        .expect("fixture inhabitants have identities");
    let key = mapper.key_space().model_key(Inhabitant::NAME, &id);
    let store = mapper.store();
    store.hset(&key, "name", &inhabitant.name).unwrap();
    store.hset(&key, "age", &inhabitant.age.to_text()).unwrap();
}

// ---------------------------------------------------------------------------
// Inhabitant: integer identity, usable as an element
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Inhabitant {
    pub id: Option<i64>,
    pub name: String,
    pub age: i32,
}

impl Inhabitant {
    pub fn new(id: i64, name: &str, age: i32) -> Self {
        Self {
            id: Some(id),
            name: name.to_string(),
            age,
        }
    }
}

impl Model for Inhabitant {
    const NAME: &'static str = "Inhabitant";
    type Id = i64;

    fn declaration() -> ModelDecl {
        ModelDecl::new(Self::NAME)
            .field(FieldDecl::of::<i64>("id").id())
            .field(FieldDecl::of::<String>("name").attribute().indexed())
            .field(FieldDecl::of::<i32>("age").attribute())
    }

    fn id(&self) -> Option<&i64> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }
}

impl Resolve for Inhabitant {
    fn from_attributes(id: i64, attributes: &BTreeMap<String, String>) -> CollectionResult<Self> {
        let age = match attributes.get("age") {
            Some(text) => i32::from_text(text)?,
            None => 0,
        };
        Ok(Self {
            id: Some(id),
            name: attributes.get("name").cloned().unwrap_or_default(),
            age,
        })
    }

    fn numeric_attribute(&self, field: &str) -> Option<f64> {
        match field {
            "age" => Some(f64::from(self.age)),
            _ => None,
        }
    }
}

keyform_collections::model_element!(Inhabitant);

// ---------------------------------------------------------------------------
// Town: text identity, one collection of every kind
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct Town {
    pub id: Option<String>,
    pub name: String,
    pub inhabitants: Option<StoredList<Inhabitant>>,
    pub landmarks: Option<StoredSet<String>>,
    pub by_age: Option<StoredSortedSet<Inhabitant>>,
    pub districts: Option<StoredMap<String, Inhabitant>>,
    pub council: Option<StoredArray<Inhabitant>>,
    pub scores: Option<StoredSortedSet<i64>>,
}

impl Town {
    pub fn named(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            name: id.to_string(),
            ..Default::default()
        }
    }
}

impl Model for Town {
    const NAME: &'static str = "Town";
    type Id = String;

    fn declaration() -> ModelDecl {
        ModelDecl::new(Self::NAME)
            .field(FieldDecl::of::<String>("id").id())
            .field(FieldDecl::of::<String>("name").attribute().indexed())
            .field(FieldDecl::of::<StoredList<Inhabitant>>("inhabitants").list_of::<Inhabitant>())
            .field(FieldDecl::of::<StoredSet<String>>("landmarks").set_of::<String>())
            .field(
                FieldDecl::of::<StoredSortedSet<Inhabitant>>("by_age")
                    .sorted_set_of::<Inhabitant>(Some("age")),
            )
            .field(
                FieldDecl::of::<StoredMap<String, Inhabitant>>("districts")
                    .map_of::<String, Inhabitant>(),
            )
            .field(FieldDecl::of::<StoredArray<Inhabitant>>("council").array_of::<Inhabitant>(3))
            .field(FieldDecl::of::<StoredSortedSet<i64>>("scores").sorted_set_of::<i64>(None))
    }

    fn id(&self) -> Option<&String> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}

impl Bind for Town {
    fn bind_collections(&mut self, binder: &Binder) -> CollectionResult<()> {
        binder.list("inhabitants", &mut self.inhabitants)?;
        binder.set("landmarks", &mut self.landmarks)?;
        binder.sorted_set("by_age", &mut self.by_age)?;
        binder.map("districts", &mut self.districts)?;
        binder.array("council", &mut self.council)?;
        binder.sorted_set("scores", &mut self.scores)
    }
}

// ---------------------------------------------------------------------------
// Distributor: UUID identity
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct Distributor {
    pub id: Option<Uuid>,
}

impl Model for Distributor {
    const NAME: &'static str = "Distributor";
    type Id = Uuid;

    fn declaration() -> ModelDecl {
        ModelDecl::new(Self::NAME)
            .field(FieldDecl::of::<Uuid>("id").id())
            .field(FieldDecl::of::<String>("region").attribute())
    }

    fn id(&self) -> Option<&Uuid> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: Option<Uuid>) {
        self.id = id;
    }
}

// ---------------------------------------------------------------------------
// Broken: declares no identity field
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct Broken {
    pub id: Option<i64>,
}

impl Model for Broken {
    const NAME: &'static str = "Broken";
    type Id = i64;

    fn declaration() -> ModelDecl {
        ModelDecl::new(Self::NAME).field(FieldDecl::of::<String>("label").attribute())
    }

    fn id(&self) -> Option<&i64> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }
}
