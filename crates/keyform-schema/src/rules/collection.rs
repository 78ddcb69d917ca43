use crate::annotation::Annotation;
use crate::decl::{CollectionShape, FieldType};
use crate::error::{SchemaError, SchemaResult};
use crate::registry;
use crate::rule::{RuleContext, SchemaRule};

/// At most one collection annotation per field, on a host of the matching
/// shape. Arrays must allow at least one element.
pub struct CollectionRule;

impl SchemaRule for CollectionRule {
    fn name(&self) -> &str {
        "collection"
    }

    fn check(&self, context: &RuleContext<'_>) -> SchemaResult<()> {
        for field in context.fields {
            let kinds: Vec<_> = field.kinds().filter(|k| registry::is_collection(*k)).collect();
            let kind = match kinds.as_slice() {
                [] => continue,
                [kind] => *kind,
                _ => {
                    return Err(SchemaError::ConflictingCollectionAnnotations {
                        model: context.model,
                        field: field.name,
                        kinds,
                    });
                }
            };

            let Some(expected) = CollectionShape::required_by(kind) else {
                continue;
            };
            if field.ty != FieldType::Collection(expected) {
                return Err(SchemaError::InvalidCollectionSubtype {
                    model: context.model,
                    field: field.name,
                    expected,
                    found: field.ty.type_name().to_string(),
                });
            }

            let zero_length = field
                .annotations
                .iter()
                .any(|a| matches!(a, Annotation::Array { length: 0, .. }));
            if zero_length {
                return Err(SchemaError::InvalidArrayLength {
                    model: context.model,
                    field: field.name,
                });
            }
        }
        Ok(())
    }
}
