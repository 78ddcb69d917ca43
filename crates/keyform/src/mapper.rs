use std::fmt;
use std::sync::Arc;

use keyform_collections::{Bind, Binder};
use keyform_schema::{identity, Classifier, Model, ModelSchema, SchemaCache};
use keyform_store::{KeySpace, KeyValueStore};
use keyform_types::{Identity, IdentityKind, IdentityValue, Uuid};
use tracing::{debug, info};

use crate::config::MapperConfig;
use crate::error::{MapError, MapResult};

/// Entry point for mapping models onto a key-value store.
///
/// A `Mapper` owns the store handle, the key namespace and a per-type cache
/// of classified schemas. It is `Send + Sync`; share it behind an `Arc`.
pub struct Mapper {
    store: Arc<dyn KeyValueStore>,
    schemas: SchemaCache,
    keys: KeySpace,
    config: MapperConfig,
}

impl Mapper {
    /// A mapper over `store` using the built-in scalar converter.
    pub fn new(store: Arc<dyn KeyValueStore>, config: MapperConfig) -> MapResult<Self> {
        Self::with_classifier(store, config, Classifier::default())
    }

    /// A mapper whose schemas are produced by `classifier`.
    pub fn with_classifier(
        store: Arc<dyn KeyValueStore>,
        config: MapperConfig,
        classifier: Classifier,
    ) -> MapResult<Self> {
        config.validate()?;
        let keys = config.key_space();
        info!(prefix = %keys.prefix, separator = %keys.separator, "mapper ready");
        Ok(Self {
            store,
            schemas: SchemaCache::new(classifier),
            keys,
            config,
        })
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn key_space(&self) -> &KeySpace {
        &self.keys
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    // ---- Schema operations ----

    /// Classify `M`, or return the cached schema from an earlier call.
    pub fn classify<M: Model>(&self) -> MapResult<Arc<ModelSchema>> {
        Ok(self.schemas.get_or_classify::<M>()?)
    }

    /// Number of model types classified so far.
    pub fn classified_count(&self) -> usize {
        self.schemas.len()
    }

    // ---- Identity operations ----

    pub fn is_new<M: Model>(&self, model: &M) -> bool {
        identity::is_new(model)
    }

    pub fn identity_of<M: Model>(&self, model: &M) -> Option<String> {
        identity::identity_of(model)
    }

    /// Parse `text` as `M`'s identity and store it on the model.
    pub fn assign_identity<M: Model>(&self, model: &mut M, text: &str) -> MapResult<()> {
        self.classify_if_eager::<M>()?;
        identity::assign_identity(model, text)?;
        Ok(())
    }

    /// Produce a fresh identity for `M`.
    ///
    /// Integer identities come from a per-type counter in the store, so they
    /// are unique across every mapper sharing that store. Text and UUID
    /// identities are time-ordered v7 UUIDs.
    pub fn allocate_id<M: Model>(&self) -> MapResult<M::Id> {
        self.classify_if_eager::<M>()?;
        let value = match M::Id::KIND {
            IdentityKind::Integer => {
                let key = self.keys.counter_key(M::NAME);
                IdentityValue::Integer(self.store.incr(&key)?)
            }
            IdentityKind::Uuid => IdentityValue::Uuid(Uuid::now_v7()),
            IdentityKind::Text => IdentityValue::Text(Uuid::now_v7().to_string()),
        };
        debug!(model = M::NAME, id = %value, "identity allocated");
        Ok(M::Id::from_value(value)?)
    }

    /// Allocate an identity for `model` if it does not have one yet.
    ///
    /// Returns `true` when a new identity was assigned.
    pub fn ensure_identity<M: Model>(&self, model: &mut M) -> MapResult<bool> {
        if !identity::is_new(model) {
            return Ok(false);
        }
        let id = self.allocate_id::<M>()?;
        model.set_id(Some(id));
        Ok(true)
    }

    // ---- Collection operations ----

    /// A binder for `model`'s collection fields.
    ///
    /// Fails with [`MapError::UnidentifiedOwner`] when the model is new, since
    /// every collection key embeds the owner's identity.
    pub fn binder<M: Model>(&self, model: &M) -> MapResult<Binder> {
        let schema = self.classify::<M>()?;
        let owner_id = identity::identity_of(model)
            .ok_or(MapError::UnidentifiedOwner { model: M::NAME })?;
        Ok(Binder::new(
            Arc::clone(&self.store),
            self.keys.clone(),
            schema,
            owner_id,
            self.config.unresolved,
        ))
    }

    /// Bind every collection field of `model` to its store structure.
    pub fn bind<M: Bind>(&self, model: &mut M) -> MapResult<()> {
        let binder = self.binder(&*model)?;
        model.bind_collections(&binder)?;
        debug!(model = M::NAME, id = %binder.owner_id(), "collections bound");
        Ok(())
    }

    fn classify_if_eager<M: Model>(&self) -> MapResult<()> {
        if self.config.eager_classify {
            self.classify::<M>()?;
        }
        Ok(())
    }
}

impl fmt::Debug for Mapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapper")
            .field("keys", &self.keys)
            .field("classified", &self.schemas.len())
            .field("unresolved", &self.config.unresolved)
            .finish()
    }
}
