use crate::annotation::AnnotationKind;
use crate::error::{SchemaError, SchemaResult};
use crate::registry::{self, Category};
use crate::rule::{RuleContext, SchemaRule};

/// `Indexed` needs a named field with a role or collection to index.
///
/// Only validity is checked here; no index structures are maintained.
pub struct IndexRule;

impl SchemaRule for IndexRule {
    fn name(&self) -> &str {
        "index"
    }

    fn check(&self, context: &RuleContext<'_>) -> SchemaResult<()> {
        for field in context.annotated(AnnotationKind::Indexed) {
            if field.name.trim().is_empty() {
                return Err(SchemaError::UnindexableField {
                    model: context.model,
                });
            }
            let indexable = field.kinds().any(|k| {
                matches!(
                    registry::category_of(k),
                    Some(Category::Role | Category::Collection)
                )
            });
            if !indexable {
                return Err(SchemaError::IndexedWithoutRole {
                    model: context.model,
                    field: field.name,
                });
            }
        }
        Ok(())
    }
}
