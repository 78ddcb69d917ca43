use std::fmt;

use crate::decl::{Describe, TypeRef};

/// A marker attached to a field declaration.
///
/// Collection annotations carry the element type(s) the field holds; the
/// host type of the field itself is checked against the annotation during
/// classification.
#[derive(Clone, Debug, PartialEq)]
pub enum Annotation {
    /// The field is the model's identity.
    Id,
    /// The field is a persisted scalar attribute.
    Attribute,
    /// The field references another model by identity.
    Reference,
    /// The field participates in secondary indexing.
    Indexed,
    /// Ordered sequence of `of`.
    CollectionList { of: TypeRef },
    /// Unordered set of `of`.
    CollectionSet { of: TypeRef },
    /// Set of `of` ordered by a numeric score. For model elements, `by` names
    /// the numeric attribute the score is read from.
    CollectionSortedSet { of: TypeRef, by: Option<&'static str> },
    /// Map from `key` to `value`.
    CollectionMap { key: TypeRef, value: TypeRef },
    /// Fixed-capacity sequence of at most `length` elements of `of`.
    Array { of: TypeRef, length: usize },
}

impl Annotation {
    pub fn kind(&self) -> AnnotationKind {
        match self {
            Self::Id => AnnotationKind::Id,
            Self::Attribute => AnnotationKind::Attribute,
            Self::Reference => AnnotationKind::Reference,
            Self::Indexed => AnnotationKind::Indexed,
            Self::CollectionList { .. } => AnnotationKind::CollectionList,
            Self::CollectionSet { .. } => AnnotationKind::CollectionSet,
            Self::CollectionSortedSet { .. } => AnnotationKind::CollectionSortedSet,
            Self::CollectionMap { .. } => AnnotationKind::CollectionMap,
            Self::Array { .. } => AnnotationKind::Array,
        }
    }

    pub fn list_of<T: Describe>() -> Self {
        Self::CollectionList { of: TypeRef::of::<T>() }
    }

    pub fn set_of<T: Describe>() -> Self {
        Self::CollectionSet { of: TypeRef::of::<T>() }
    }

    pub fn sorted_set_of<T: Describe>(by: Option<&'static str>) -> Self {
        Self::CollectionSortedSet {
            of: TypeRef::of::<T>(),
            by,
        }
    }

    pub fn map_of<K: Describe, V: Describe>() -> Self {
        Self::CollectionMap {
            key: TypeRef::of::<K>(),
            value: TypeRef::of::<V>(),
        }
    }

    pub fn array_of<T: Describe>(length: usize) -> Self {
        Self::Array {
            of: TypeRef::of::<T>(),
            length,
        }
    }
}

/// The variant of an [`Annotation`] without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnnotationKind {
    Id,
    Attribute,
    Reference,
    Indexed,
    CollectionList,
    CollectionSet,
    CollectionSortedSet,
    CollectionMap,
    Array,
}

impl AnnotationKind {
    pub const ALL: [AnnotationKind; 9] = [
        Self::Id,
        Self::Attribute,
        Self::Reference,
        Self::Indexed,
        Self::CollectionList,
        Self::CollectionSet,
        Self::CollectionSortedSet,
        Self::CollectionMap,
        Self::Array,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Id => "Id",
            Self::Attribute => "Attribute",
            Self::Reference => "Reference",
            Self::Indexed => "Indexed",
            Self::CollectionList => "CollectionList",
            Self::CollectionSet => "CollectionSet",
            Self::CollectionSortedSet => "CollectionSortedSet",
            Self::CollectionMap => "CollectionMap",
            Self::Array => "Array",
        }
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
