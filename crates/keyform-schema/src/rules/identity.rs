use keyform_types::IdentityKind;

use crate::annotation::AnnotationKind;
use crate::decl::{FieldDecl, FieldType};
use crate::error::{SchemaError, SchemaResult};
use crate::rule::{RuleContext, SchemaRule};

/// Exactly one identity field, carrying no other annotation, typed as an
/// integer, text or UUID.
pub struct IdentityRule;

impl SchemaRule for IdentityRule {
    fn name(&self) -> &str {
        "identity"
    }

    fn check(&self, context: &RuleContext<'_>) -> SchemaResult<()> {
        let mut ids = context.annotated(AnnotationKind::Id);
        let Some(field) = ids.next() else {
            return Err(SchemaError::MissingIdentity {
                model: context.model,
            });
        };
        if let Some(extra) = ids.next() {
            return Err(SchemaError::InvalidIdentityAnnotations {
                model: context.model,
                field: extra.name,
                reason: format!("{} is already the identity field", field.name),
            });
        }

        if let Some(other) = field.kinds().find(|k| *k != AnnotationKind::Id) {
            return Err(SchemaError::InvalidIdentityAnnotations {
                model: context.model,
                field: field.name,
                reason: format!("identity field cannot also be {other}"),
            });
        }

        identity_kind(context.model, field).map(|_| ())
    }
}

/// The identity representation a field's declared type maps to.
pub(crate) fn identity_kind(model: &'static str, field: &FieldDecl) -> SchemaResult<IdentityKind> {
    let invalid = || SchemaError::InvalidIdentityType {
        model,
        field: field.name,
        type_name: field.ty.type_name().to_string(),
    };
    match field.ty {
        FieldType::Named(name) => IdentityKind::from_type_name(name).map_err(|_| invalid()),
        FieldType::Model(_) | FieldType::Collection(_) => Err(invalid()),
    }
}
