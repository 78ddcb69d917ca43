use crate::annotation::AnnotationKind;
use crate::decl::FieldDecl;
use crate::error::{SchemaError, SchemaResult};
use crate::registry::{self, Category};
use crate::rule::{RuleContext, SchemaRule};

/// Every pair of annotations on a field must be allowed by the registry.
///
/// Runs before the per-role rules so an illegal combination is reported as
/// such, whichever annotations are involved.
pub struct CombinationRule;

impl SchemaRule for CombinationRule {
    fn name(&self) -> &str {
        "combination"
    }

    fn check(&self, context: &RuleContext<'_>) -> SchemaResult<()> {
        for field in context.fields {
            let kinds: Vec<_> = field.kinds().collect();
            for (i, &first) in kinds.iter().enumerate() {
                for &second in &kinds[i + 1..] {
                    if !registry::may_combine(first, second) {
                        return Err(conflict(context.model, field, first, second));
                    }
                }
            }
        }
        Ok(())
    }
}

fn conflict(
    model: &'static str,
    field: &FieldDecl,
    first: AnnotationKind,
    second: AnnotationKind,
) -> SchemaError {
    use AnnotationKind::{Attribute, Id, Reference};

    let both = |category| {
        registry::category_of(first) == Some(category)
            && registry::category_of(second) == Some(category)
    };
    match (first, second) {
        (Id, other) | (other, Id) => SchemaError::InvalidIdentityAnnotations {
            model,
            field: field.name,
            reason: format!("identity field cannot also be {other}"),
        },
        (Attribute, Reference) | (Reference, Attribute) => {
            SchemaError::AttributeAndReferenceConflict {
                model,
                field: field.name,
            }
        }
        _ if both(Category::Collection) => SchemaError::ConflictingCollectionAnnotations {
            model,
            field: field.name,
            kinds: registry::collection_kinds().filter(|k| field.has(*k)).collect(),
        },
        _ => SchemaError::IncompatibleAnnotations {
            model,
            field: field.name,
            first,
            second,
        },
    }
}
