use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use keyform_schema::FieldRole;
use keyform_store::{KeySpace, KeyValueStore};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::element::Element;
use crate::error::{CollectionError, CollectionResult};

/// What a read does with a stored identity whose model no longer exists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedPolicy {
    /// Leave the element out of bulk reads, return `None` from point reads,
    /// and log a warning.
    #[default]
    Skip,
    /// Fail the read with [`CollectionError::UnresolvedReference`].
    Fail,
}

/// The fixed association between one model instance's field and the store
/// structure that holds it.
#[derive(Clone)]
pub struct Binding {
    store: Arc<dyn KeyValueStore>,
    keys: KeySpace,
    key: String,
    owner: &'static str,
    owner_id: String,
    field: &'static str,
    role: FieldRole,
    policy: UnresolvedPolicy,
}

impl Binding {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        keys: KeySpace,
        owner: &'static str,
        owner_id: impl Into<String>,
        field: &'static str,
        role: FieldRole,
        policy: UnresolvedPolicy,
    ) -> Self {
        let owner_id = owner_id.into();
        let key = keys.field_key(owner, &owner_id, field);
        Self {
            store,
            keys,
            key,
            owner,
            owner_id,
            field,
            role,
            policy,
        }
    }

    /// Fully-qualified key of the backing structure.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn owner(&self) -> &'static str {
        self.owner
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn role(&self) -> &FieldRole {
        &self.role
    }

    pub fn policy(&self) -> UnresolvedPolicy {
        self.policy
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn keys(&self) -> &KeySpace {
        &self.keys
    }

    /// Attribute hash of a referenced model, or `None` when it does not exist.
    pub fn load_model(
        &self,
        model: &str,
        id: &str,
    ) -> CollectionResult<Option<BTreeMap<String, String>>> {
        let attributes = self.store.hgetall(&self.keys.model_key(model, id))?;
        Ok((!attributes.is_empty()).then_some(attributes))
    }

    /// Decode one stored value, applying the unresolved policy.
    pub(crate) fn resolve<T: Element>(&self, raw: &str) -> CollectionResult<Option<T>> {
        if let Some(value) = T::decode(raw, self)? {
            return Ok(Some(value));
        }
        let model = T::element_type().type_name();
        match self.policy {
            UnresolvedPolicy::Skip => {
                warn!(key = %self.key, model, id = raw, "skipping unresolved reference");
                Ok(None)
            }
            UnresolvedPolicy::Fail => Err(CollectionError::UnresolvedReference {
                key: self.key.clone(),
                model,
                id: raw.to_string(),
            }),
        }
    }

    /// Decode every stored value, applying the unresolved policy to each.
    pub(crate) fn resolve_all<T: Element>(&self, raws: Vec<String>) -> CollectionResult<Vec<T>> {
        let mut values = Vec::with_capacity(raws.len());
        for raw in raws {
            if let Some(value) = self.resolve(&raw)? {
                values.push(value);
            }
        }
        Ok(values)
    }

    /// The stored values that do not resolve, without applying the policy.
    pub(crate) fn dangling<T: Element>(
        &self,
        raws: impl IntoIterator<Item = String>,
    ) -> CollectionResult<Vec<String>> {
        if !T::element_type().is_model() {
            return Ok(Vec::new());
        }
        let mut dangling = Vec::new();
        for raw in raws {
            if T::decode(&raw, self)?.is_none() {
                dangling.push(raw);
            }
        }
        Ok(dangling)
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("key", &self.key)
            .field("role", &self.role)
            .field("policy", &self.policy)
            .finish()
    }
}

/// Stored position for a zero-based index.
pub(crate) fn position(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}
