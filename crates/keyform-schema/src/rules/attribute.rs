use crate::annotation::AnnotationKind;
use crate::decl::FieldType;
use crate::error::{SchemaError, SchemaResult};
use crate::rule::{RuleContext, SchemaRule};

/// Attributes are supported scalars; references point at models; no field
/// is both.
pub struct AttributeRule;

impl SchemaRule for AttributeRule {
    fn name(&self) -> &str {
        "attribute"
    }

    fn check(&self, context: &RuleContext<'_>) -> SchemaResult<()> {
        for field in context.fields {
            let attribute = field.has(AnnotationKind::Attribute);
            let reference = field.has(AnnotationKind::Reference);

            if attribute && reference {
                return Err(SchemaError::AttributeAndReferenceConflict {
                    model: context.model,
                    field: field.name,
                });
            }

            if attribute {
                match &field.ty {
                    FieldType::Model(model) => {
                        return Err(SchemaError::AttributeAndModelConflict {
                            model: context.model,
                            field: field.name,
                            type_name: model.name,
                        });
                    }
                    FieldType::Named(name) if context.converter.is_supported(name) => {}
                    other => {
                        return Err(SchemaError::UnsupportedAttributeType {
                            model: context.model,
                            field: field.name,
                            type_name: other.type_name().to_string(),
                        });
                    }
                }
            }

            if reference && !matches!(field.ty, FieldType::Model(_)) {
                return Err(SchemaError::ReferenceNotModel {
                    model: context.model,
                    field: field.name,
                    type_name: field.ty.type_name().to_string(),
                });
            }
        }
        Ok(())
    }
}
