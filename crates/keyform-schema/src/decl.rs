//! Model and field declarations.
//!
//! A declaration is the static description a model type gives of itself:
//! its name, its fields with their declared types and annotations, and
//! optionally the model it extends. Declarations carry no validation; the
//! [`Classifier`](crate::Classifier) turns them into a
//! [`ModelSchema`](crate::ModelSchema) or rejects them.

use std::collections::HashSet;
use std::fmt;

use keyform_types::{Scalar, Uuid};

use crate::annotation::{Annotation, AnnotationKind};
use crate::error::{SchemaError, SchemaResult};
use crate::model::Model;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Handle on a model type: its name and how to obtain its declaration.
#[derive(Clone, Copy)]
pub struct ModelRef {
    pub name: &'static str,
    pub declare: fn() -> ModelDecl,
}

impl ModelRef {
    pub fn of<M: Model>() -> Self {
        Self {
            name: M::NAME,
            declare: M::declaration,
        }
    }

    pub fn declaration(&self) -> ModelDecl {
        (self.declare)()
    }
}

impl PartialEq for ModelRef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ModelRef {}

impl fmt::Debug for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModelRef({})", self.name)
    }
}

/// Host shape of a collection-typed field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollectionShape {
    List,
    Set,
    SortedSet,
    Map,
    Array,
}

impl CollectionShape {
    pub fn type_name(self) -> &'static str {
        match self {
            Self::List => "StoredList",
            Self::Set => "StoredSet",
            Self::SortedSet => "StoredSortedSet",
            Self::Map => "StoredMap",
            Self::Array => "StoredArray",
        }
    }

    /// The shape a collection annotation requires of its host field.
    pub fn required_by(kind: AnnotationKind) -> Option<Self> {
        match kind {
            AnnotationKind::CollectionList => Some(Self::List),
            AnnotationKind::CollectionSet => Some(Self::Set),
            AnnotationKind::CollectionSortedSet => Some(Self::SortedSet),
            AnnotationKind::CollectionMap => Some(Self::Map),
            AnnotationKind::Array => Some(Self::Array),
            _ => None,
        }
    }
}

/// Declared type of a field.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldType {
    /// A non-model, non-collection type, by name (`"i32"`, `"String"`, ...).
    Named(&'static str),
    /// Another model type.
    Model(ModelRef),
    /// A stored collection proxy.
    Collection(CollectionShape),
}

impl FieldType {
    pub fn model<M: Model>() -> Self {
        Self::Model(ModelRef::of::<M>())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Named(name) => *name,
            Self::Model(model) => model.name,
            Self::Collection(shape) => shape.type_name(),
        }
    }
}

/// Element, key or value type named by a collection annotation.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeRef {
    Named(&'static str),
    Model(ModelRef),
}

impl TypeRef {
    pub fn of<T: Describe>() -> Self {
        match T::describe() {
            FieldType::Named(name) => Self::Named(name),
            FieldType::Model(model) => Self::Model(model),
            // Collections never qualify as elements; classification rejects the name.
            FieldType::Collection(shape) => Self::Named(shape.type_name()),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Named(name) => *name,
            Self::Model(model) => model.name,
        }
    }
}

/// Rust types that can describe their declared field type.
pub trait Describe {
    fn describe() -> FieldType;
}

macro_rules! describe_scalar {
    ($($t:ty),* $(,)?) => {$(
        impl Describe for $t {
            fn describe() -> FieldType {
                FieldType::Named(<$t as Scalar>::TYPE_NAME)
            }
        }
    )*};
}

describe_scalar!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, bool, char, String, Uuid);

impl<T: Describe> Describe for Option<T> {
    fn describe() -> FieldType {
        T::describe()
    }
}

// ---------------------------------------------------------------------------
// FieldDecl
// ---------------------------------------------------------------------------

/// One declared field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDecl {
    pub name: &'static str,
    pub ty: FieldType,
    pub annotations: Vec<Annotation>,
}

impl FieldDecl {
    pub fn new(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            annotations: Vec::new(),
        }
    }

    /// A field whose declared type is `T`.
    pub fn of<T: Describe>(name: &'static str) -> Self {
        Self::new(name, T::describe())
    }

    pub fn with(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn id(self) -> Self {
        self.with(Annotation::Id)
    }

    pub fn attribute(self) -> Self {
        self.with(Annotation::Attribute)
    }

    pub fn reference(self) -> Self {
        self.with(Annotation::Reference)
    }

    pub fn indexed(self) -> Self {
        self.with(Annotation::Indexed)
    }

    pub fn list_of<T: Describe>(self) -> Self {
        self.with(Annotation::list_of::<T>())
    }

    pub fn set_of<T: Describe>(self) -> Self {
        self.with(Annotation::set_of::<T>())
    }

    pub fn sorted_set_of<T: Describe>(self, by: Option<&'static str>) -> Self {
        self.with(Annotation::sorted_set_of::<T>(by))
    }

    pub fn map_of<K: Describe, V: Describe>(self) -> Self {
        self.with(Annotation::map_of::<K, V>())
    }

    pub fn array_of<T: Describe>(self, length: usize) -> Self {
        self.with(Annotation::array_of::<T>(length))
    }

    pub fn has(&self, kind: AnnotationKind) -> bool {
        self.annotations.iter().any(|a| a.kind() == kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = AnnotationKind> + '_ {
        self.annotations.iter().map(Annotation::kind)
    }
}

// ---------------------------------------------------------------------------
// ModelDecl
// ---------------------------------------------------------------------------

/// A model's own fields plus an optional parent model.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelDecl {
    pub name: &'static str,
    pub fields: Vec<FieldDecl>,
    pub parent: Option<ModelRef>,
}

impl ModelDecl {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
            parent: None,
        }
    }

    pub fn field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    pub fn extends<M: Model>(mut self) -> Self {
        self.parent = Some(ModelRef::of::<M>());
        self
    }

    /// Fields declared by this model and all of its ancestors, ancestors first.
    pub fn all_fields(&self) -> SchemaResult<Vec<FieldDecl>> {
        let mut chain = vec![self.clone()];
        let mut seen = HashSet::from([self.name]);
        let mut next = self.parent;
        while let Some(parent) = next {
            if !seen.insert(parent.name) {
                return Err(SchemaError::CyclicInheritance { model: self.name });
            }
            let decl = parent.declaration();
            next = decl.parent;
            chain.push(decl);
        }
        Ok(chain.into_iter().rev().flat_map(|decl| decl.fields).collect())
    }
}
