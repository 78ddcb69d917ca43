//! Storage key composition.
//!
//! Every key keyform touches is built here, so collection proxies and
//! whatever persists whole-model attributes agree on naming:
//!
//! - `<prefix><Type><sep><id>` -- the model's attribute hash
//! - `<prefix><Type><sep><id><sep><field>` -- a collection field
//! - `<prefix><Type><sep><id><sep><field><sep><sub>` -- a field's sub-structure
//! - `<prefix>seq<sep><Type>` -- the integer identity counter for a type
//!
//! With the default configuration (`:` separator, no prefix) a `User` with
//! id `7` keeps its `likes` list at `User:7:likes`.
//!
//! Identities are free text, so the id component is escaped: every `\` is
//! doubled and every separator is preceded by `\`. A `Town` with id
//! `1:tags` lives at `Town:1\:tags`, never at `Town:1`'s `tags` field key.
//! Type and field names are Rust identifiers and are used verbatim; they must
//! not contain the separator.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Default separator between key components.
pub const DEFAULT_SEPARATOR: &str = ":";

/// Escape character for separators inside identity components.
pub const ESCAPE: char = '\\';

/// Key namespace configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySpace {
    /// Prepended verbatim to every key (include a trailing separator if wanted).
    pub prefix: String,
    /// Placed between key components.
    pub separator: String,
}

impl Default for KeySpace {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl KeySpace {
    /// A namespace whose keys all start with `prefix`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Default::default()
        }
    }

    /// Key of a model's attribute record.
    pub fn model_key(&self, model: &str, id: &str) -> String {
        format!("{}{model}{}{}", self.prefix, self.separator, self.escape_id(id))
    }

    /// Key of a model field's own structure.
    pub fn field_key(&self, model: &str, id: &str, field: &str) -> String {
        format!("{}{}{field}", self.model_key(model, id), self.separator)
    }

    /// Key of a structure nested under a field.
    pub fn sub_key(&self, model: &str, id: &str, field: &str, sub: &str) -> String {
        format!("{}{}{sub}", self.field_key(model, id, field), self.separator)
    }

    /// Key of the integer identity counter for a model type.
    pub fn counter_key(&self, model: &str) -> String {
        format!("{}seq{}{model}", self.prefix, self.separator)
    }

    /// The id as it appears inside a key.
    pub fn escape_id<'a>(&self, id: &'a str) -> Cow<'a, str> {
        let has_separator = !self.separator.is_empty() && id.contains(self.separator.as_str());
        if !has_separator && !id.contains(ESCAPE) {
            return Cow::Borrowed(id);
        }
        let mut escaped = id.replace(ESCAPE, "\\\\");
        if !self.separator.is_empty() {
            escaped = escaped.replace(
                self.separator.as_str(),
                &format!("{ESCAPE}{}", self.separator),
            );
        }
        Cow::Owned(escaped)
    }
}
