use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::classify::Classifier;
use crate::error::SchemaResult;
use crate::model::Model;
use crate::schema::ModelSchema;

/// Process-wide memo of classified models.
///
/// Each model type is classified at most once per successful attempt; a
/// failed classification is never cached, so every later request reports
/// the same error again. Concurrent first requests may both classify, but
/// only one schema is published and both callers receive it.
#[derive(Debug, Default)]
pub struct SchemaCache {
    classifier: Classifier,
    schemas: RwLock<HashMap<TypeId, Arc<ModelSchema>>>,
}

impl SchemaCache {
    pub fn new(classifier: Classifier) -> Self {
        Self {
            classifier,
            schemas: RwLock::new(HashMap::new()),
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// The schema of `M`, classifying it on first use.
    pub fn get_or_classify<M: Model>(&self) -> SchemaResult<Arc<ModelSchema>> {
        let key = TypeId::of::<M>();
        if let Some(schema) = self.read().get(&key) {
            return Ok(Arc::clone(schema));
        }

        let schema = Arc::new(self.classifier.classify::<M>()?);
        let mut schemas = self.schemas.write().unwrap_or_else(PoisonError::into_inner);
        let published = schemas.entry(key).or_insert_with(|| {
            debug!(model = M::NAME, "schema cached");
            schema
        });
        Ok(Arc::clone(published))
    }

    /// The cached schema of `M`, without classifying.
    pub fn get<M: Model>(&self) -> Option<Arc<ModelSchema>> {
        self.read().get(&TypeId::of::<M>()).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Entries are only ever inserted whole, so a poisoned map is still valid.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<TypeId, Arc<ModelSchema>>> {
        self.schemas.read().unwrap_or_else(PoisonError::into_inner)
    }
}
