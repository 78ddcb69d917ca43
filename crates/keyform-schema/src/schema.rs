use keyform_types::IdentityKind;

use crate::decl::{CollectionShape, ModelRef};

/// Element, key or value type of a classified collection.
#[derive(Clone, Debug, PartialEq)]
pub enum ElementType {
    /// A scalar the converter supports, by type name.
    Primitive(&'static str),
    /// Another model, stored by identity.
    Model(ModelRef),
}

impl ElementType {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Primitive(name) => *name,
            Self::Model(model) => model.name,
        }
    }

    pub fn is_model(&self) -> bool {
        matches!(self, Self::Model(_))
    }
}

/// What a field is, once classified.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldRole {
    Identity(IdentityKind),
    Attribute { type_name: &'static str },
    Reference(ModelRef),
    List(ElementType),
    Set(ElementType),
    SortedSet {
        element: ElementType,
        /// Numeric attribute of a model element that supplies the score.
        by: Option<&'static str>,
    },
    Map {
        key: ElementType,
        value: ElementType,
    },
    Array {
        element: ElementType,
        length: usize,
    },
    /// Unannotated; never persisted.
    Transient,
}

impl FieldRole {
    pub fn shape(&self) -> Option<CollectionShape> {
        match self {
            Self::List(_) => Some(CollectionShape::List),
            Self::Set(_) => Some(CollectionShape::Set),
            Self::SortedSet { .. } => Some(CollectionShape::SortedSet),
            Self::Map { .. } => Some(CollectionShape::Map),
            Self::Array { .. } => Some(CollectionShape::Array),
            _ => None,
        }
    }

    pub fn is_collection(&self) -> bool {
        self.shape().is_some()
    }

    /// Whether the field is written to the store at all.
    pub fn is_persisted(&self) -> bool {
        !matches!(self, Self::Transient)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedField {
    pub name: &'static str,
    pub role: FieldRole,
    pub indexed: bool,
}

/// The classified, validated form of a model declaration.
///
/// Fields are in declaration order, inherited fields first. Exactly one of
/// them has the [`FieldRole::Identity`] role.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelSchema {
    pub name: &'static str,
    pub fields: Vec<ResolvedField>,
    pub(crate) identity: usize,
    pub(crate) identity_kind: IdentityKind,
}

impl ModelSchema {
    pub fn field(&self, name: &str) -> Option<&ResolvedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn identity(&self) -> &ResolvedField {
        &self.fields[self.identity]
    }

    pub fn identity_kind(&self) -> IdentityKind {
        self.identity_kind
    }

    pub fn attributes(&self) -> impl Iterator<Item = &ResolvedField> {
        self.fields
            .iter()
            .filter(|f| matches!(f.role, FieldRole::Attribute { .. }))
    }

    pub fn references(&self) -> impl Iterator<Item = &ResolvedField> {
        self.fields
            .iter()
            .filter(|f| matches!(f.role, FieldRole::Reference(_)))
    }

    pub fn collections(&self) -> impl Iterator<Item = &ResolvedField> {
        self.fields.iter().filter(|f| f.role.is_collection())
    }

    pub fn indexed(&self) -> impl Iterator<Item = &ResolvedField> {
        self.fields.iter().filter(|f| f.indexed)
    }
}
