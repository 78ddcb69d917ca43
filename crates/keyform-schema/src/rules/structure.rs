use std::collections::HashSet;

use crate::error::{SchemaError, SchemaResult};
use crate::rule::{RuleContext, SchemaRule};

/// Field names must be unique across the whole inheritance chain.
pub struct StructureRule;

impl SchemaRule for StructureRule {
    fn name(&self) -> &str {
        "structure"
    }

    fn check(&self, context: &RuleContext<'_>) -> SchemaResult<()> {
        let mut seen = HashSet::with_capacity(context.fields.len());
        for field in context.fields {
            if !seen.insert(field.name) {
                return Err(SchemaError::DuplicateField {
                    model: context.model,
                    field: field.name,
                });
            }
        }
        Ok(())
    }
}
