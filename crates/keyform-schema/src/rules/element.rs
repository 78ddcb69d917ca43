use keyform_types::Converter;

use crate::annotation::{Annotation, AnnotationKind};
use crate::decl::{FieldDecl, FieldType, ModelRef, TypeRef};
use crate::error::{SchemaError, SchemaResult};
use crate::rule::{RuleContext, SchemaRule};
use crate::schema::ElementType;

/// Collection element, key and value types must be supported scalars or
/// models with an identity. Sorted sets must have a usable numeric score.
pub struct ElementRule;

impl SchemaRule for ElementRule {
    fn name(&self) -> &str {
        "element"
    }

    fn check(&self, context: &RuleContext<'_>) -> SchemaResult<()> {
        for field in context.fields {
            for annotation in &field.annotations {
                let resolve = |type_ref: &TypeRef| {
                    resolve_element(context.model, field, type_ref, context.converter)
                };
                match annotation {
                    Annotation::CollectionList { of }
                    | Annotation::CollectionSet { of }
                    | Annotation::Array { of, .. } => {
                        resolve(of)?;
                    }
                    Annotation::CollectionMap { key, value } => {
                        resolve(key)?;
                        resolve(value)?;
                    }
                    Annotation::CollectionSortedSet { of, by } => {
                        let element = resolve(of)?;
                        check_ordering(context, field, &element, *by)?;
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

/// Map a declared element type onto the element kinds collections support.
pub(crate) fn resolve_element(
    model: &'static str,
    field: &FieldDecl,
    type_ref: &TypeRef,
    converter: &dyn Converter,
) -> SchemaResult<ElementType> {
    let unsupported = || SchemaError::UnsupportedElementType {
        model,
        field: field.name,
        type_name: type_ref.type_name().to_string(),
    };
    match type_ref {
        TypeRef::Named(name) if converter.is_supported(name) => Ok(ElementType::Primitive(*name)),
        TypeRef::Named(_) => Err(unsupported()),
        TypeRef::Model(element) => {
            let ids = element
                .declaration()
                .all_fields()?
                .iter()
                .filter(|f| f.has(AnnotationKind::Id))
                .count();
            if ids == 1 {
                Ok(ElementType::Model(*element))
            } else {
                Err(unsupported())
            }
        }
    }
}

fn check_ordering(
    context: &RuleContext<'_>,
    field: &FieldDecl,
    element: &ElementType,
    by: Option<&'static str>,
) -> SchemaResult<()> {
    let invalid = |reason: String| SchemaError::InvalidOrderingKey {
        model: context.model,
        field: field.name,
        by,
        reason,
    };
    match (element, by) {
        (ElementType::Primitive(name), None) => {
            if context.converter.is_numeric(name) {
                Ok(())
            } else {
                Err(invalid(format!("{name} elements have no numeric score")))
            }
        }
        (ElementType::Primitive(name), Some(_)) => Err(invalid(format!(
            "{name} elements are scored by value and take no ordering key"
        ))),
        (ElementType::Model(model), None) => Err(invalid(format!(
            "{} elements need the name of a numeric attribute",
            model.name
        ))),
        (ElementType::Model(model), Some(key)) => {
            check_score_attribute(context, model, key).map_err(invalid)
        }
    }
}

fn check_score_attribute(
    context: &RuleContext<'_>,
    model: &ModelRef,
    key: &str,
) -> Result<(), String> {
    let fields = model.declaration().all_fields().map_err(|e| e.to_string())?;
    let Some(target) = fields.iter().find(|f| f.name == key) else {
        return Err(format!("{} has no field named {key}", model.name));
    };
    if !target.has(AnnotationKind::Attribute) {
        return Err(format!("{}.{key} is not an attribute", model.name));
    }
    match &target.ty {
        FieldType::Named(name) if context.converter.is_numeric(name) => Ok(()),
        other => Err(format!(
            "{}.{key} is {}, not numeric",
            model.name,
            other.type_name()
        )),
    }
}
