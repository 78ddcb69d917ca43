use keyform_collections::UnresolvedPolicy;
use keyform_store::{KeySpace, DEFAULT_SEPARATOR, ESCAPE};
use serde::{Deserialize, Serialize};

use crate::error::{MapError, MapResult};

/// Configuration for a [`Mapper`](crate::Mapper).
///
/// Every field has a default, so a TOML document only needs the keys it
/// changes:
///
/// ```toml
/// key_prefix = "app:"
/// unresolved = "fail"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Prepended verbatim to every storage key.
    pub key_prefix: String,
    /// Placed between key components. Must not be empty or contain `\`.
    pub key_separator: String,
    /// What collection reads do with references to deleted models.
    pub unresolved: UnresolvedPolicy,
    /// When `true`, identity operations classify the model first, so a bad
    /// declaration is reported before any identity is assigned or allocated.
    pub eager_classify: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            key_prefix: String::new(),
            key_separator: DEFAULT_SEPARATOR.to_string(),
            unresolved: UnresolvedPolicy::Skip,
            eager_classify: true,
        }
    }
}

impl MapperConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> MapResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| MapError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> MapResult<()> {
        if self.key_separator.is_empty() {
            return Err(MapError::Config("key_separator must not be empty".into()));
        }
        if self.key_separator.contains(ESCAPE) {
            return Err(MapError::Config(format!(
                "key_separator must not contain `{ESCAPE}`"
            )));
        }
        Ok(())
    }

    pub fn key_space(&self) -> KeySpace {
        KeySpace {
            prefix: self.key_prefix.clone(),
            separator: self.key_separator.clone(),
        }
    }
}
