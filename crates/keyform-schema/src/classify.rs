use std::sync::Arc;

use keyform_types::{Converter, Identity, ScalarRegistry};
use tracing::debug;

use crate::annotation::{Annotation, AnnotationKind};
use crate::decl::{FieldDecl, FieldType, ModelDecl, TypeRef};
use crate::error::{SchemaError, SchemaResult};
use crate::model::Model;
use crate::rule::{RuleContext, SchemaRule};
use crate::rules::element::resolve_element;
use crate::rules::identity::identity_kind;
use crate::rules::{
    AttributeRule, CollectionRule, CombinationRule, ElementRule, IdentityRule, IndexRule,
    StructureRule,
};
use crate::schema::{FieldRole, ModelSchema, ResolvedField};

/// Turns model declarations into [`ModelSchema`]s.
///
/// Classification runs a pipeline of [`SchemaRule`]s over the declared
/// fields and then resolves each field's role. The pipeline is fail-fast:
/// the first rule that rejects the declaration ends classification.
pub struct Classifier {
    rules: Vec<Box<dyn SchemaRule>>,
    converter: Arc<dyn Converter>,
}

impl Classifier {
    /// A classifier with no rules. Resolution still requires an identity.
    pub fn new(converter: Arc<dyn Converter>) -> Self {
        Self {
            rules: Vec::new(),
            converter,
        }
    }

    /// The standard pipeline:
    /// Structure -> Identity -> Combination -> Attribute -> Collection -> Index -> Element
    pub fn with_default_rules(converter: Arc<dyn Converter>) -> Self {
        let mut classifier = Self::new(converter);
        classifier.add_rule(Box::new(StructureRule));
        classifier.add_rule(Box::new(IdentityRule));
        classifier.add_rule(Box::new(CombinationRule));
        classifier.add_rule(Box::new(AttributeRule));
        classifier.add_rule(Box::new(CollectionRule));
        classifier.add_rule(Box::new(IndexRule));
        classifier.add_rule(Box::new(ElementRule));
        classifier
    }

    /// Append a rule to the end of the pipeline.
    pub fn add_rule(&mut self, rule: Box<dyn SchemaRule>) {
        self.rules.push(rule);
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn converter(&self) -> &dyn Converter {
        self.converter.as_ref()
    }

    /// Classify the declaration of `M` and check that it is named `M::NAME`
    /// and that the declared identity type matches `M::Id`.
    pub fn classify<M: Model>(&self) -> SchemaResult<ModelSchema> {
        let decl = M::declaration();
        if decl.name != M::NAME {
            return Err(SchemaError::ModelNameMismatch {
                model: M::NAME,
                declared: decl.name,
            });
        }
        let schema = self.classify_decl(&decl)?;
        let declared = schema.identity_kind();
        if declared != M::Id::KIND {
            return Err(SchemaError::InvalidIdentityType {
                model: schema.name,
                field: schema.identity().name,
                type_name: format!(
                    "{} (the model's identity type is {})",
                    declared.type_name(),
                    M::Id::KIND.type_name()
                ),
            });
        }
        Ok(schema)
    }

    pub fn classify_decl(&self, decl: &ModelDecl) -> SchemaResult<ModelSchema> {
        let fields = decl.all_fields()?;
        let context = RuleContext {
            model: decl.name,
            fields: &fields,
            converter: self.converter(),
        };

        for rule in &self.rules {
            if let Err(err) = rule.check(&context) {
                debug!(model = decl.name, rule = rule.name(), error = %err, "model rejected");
                return Err(err);
            }
        }

        let resolved = fields
            .iter()
            .map(|field| resolve_field(&context, field))
            .collect::<SchemaResult<Vec<_>>>()?;

        let (identity, identity_kind) = resolved
            .iter()
            .enumerate()
            .find_map(|(i, f)| match f.role {
                FieldRole::Identity(kind) => Some((i, kind)),
                _ => None,
            })
            .ok_or(SchemaError::MissingIdentity { model: decl.name })?;

        debug!(model = decl.name, fields = resolved.len(), "model classified");
        Ok(ModelSchema {
            name: decl.name,
            fields: resolved,
            identity,
            identity_kind,
        })
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::with_default_rules(Arc::new(ScalarRegistry::builtin()))
    }
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("rules", &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>())
            .field("converter", &self.converter)
            .finish()
    }
}

/// Role of one field. The first annotation other than `Indexed` decides.
fn resolve_field(context: &RuleContext<'_>, field: &FieldDecl) -> SchemaResult<ResolvedField> {
    let model = context.model;
    let element = |type_ref: &TypeRef| resolve_element(model, field, type_ref, context.converter);

    let mut role = FieldRole::Transient;
    for annotation in &field.annotations {
        role = match annotation {
            Annotation::Indexed => continue,
            Annotation::Id => FieldRole::Identity(identity_kind(model, field)?),
            Annotation::Attribute => FieldRole::Attribute {
                type_name: field.ty.type_name(),
            },
            Annotation::Reference => match &field.ty {
                FieldType::Model(target) => FieldRole::Reference(*target),
                other => {
                    return Err(SchemaError::ReferenceNotModel {
                        model,
                        field: field.name,
                        type_name: other.type_name().to_string(),
                    });
                }
            },
            Annotation::CollectionList { of } => FieldRole::List(element(of)?),
            Annotation::CollectionSet { of } => FieldRole::Set(element(of)?),
            Annotation::CollectionSortedSet { of, by } => FieldRole::SortedSet {
                element: element(of)?,
                by: *by,
            },
            Annotation::CollectionMap { key, value } => FieldRole::Map {
                key: element(key)?,
                value: element(value)?,
            },
            Annotation::Array { of, length } => FieldRole::Array {
                element: element(of)?,
                length: *length,
            },
        };
        break;
    }

    Ok(ResolvedField {
        name: field.name,
        role,
        indexed: field.has(AnnotationKind::Indexed),
    })
}
