//! Static table of the field annotations keyform understands.
//!
//! Each annotation belongs to one category, and the category decides what it
//! may be combined with on a single field:
//!
//! | Category     | Annotations                                   | Combines with        |
//! |--------------|-----------------------------------------------|----------------------|
//! | `Identity`   | `Id`                                          | nothing              |
//! | `Role`       | `Attribute`, `Reference`                      | `Indexed`            |
//! | `Collection` | `CollectionList/Set/SortedSet/Map`, `Array`   | `Indexed`            |
//! | `Modifier`   | `Indexed`                                     | roles, collections   |

use crate::annotation::AnnotationKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Identity,
    Role,
    Collection,
    Modifier,
}

#[derive(Clone, Copy, Debug)]
pub struct Capability {
    pub kind: AnnotationKind,
    pub category: Category,
    pub summary: &'static str,
}

pub const CAPABILITIES: &[Capability] = &[
    Capability {
        kind: AnnotationKind::Id,
        category: Category::Identity,
        summary: "unique identity of the model instance",
    },
    Capability {
        kind: AnnotationKind::Attribute,
        category: Category::Role,
        summary: "scalar value stored in the model hash",
    },
    Capability {
        kind: AnnotationKind::Reference,
        category: Category::Role,
        summary: "identity of another model",
    },
    Capability {
        kind: AnnotationKind::Indexed,
        category: Category::Modifier,
        summary: "participates in secondary indexing",
    },
    Capability {
        kind: AnnotationKind::CollectionList,
        category: Category::Collection,
        summary: "ordered sequence in a native list",
    },
    Capability {
        kind: AnnotationKind::CollectionSet,
        category: Category::Collection,
        summary: "unordered unique members in a native set",
    },
    Capability {
        kind: AnnotationKind::CollectionSortedSet,
        category: Category::Collection,
        summary: "members ordered by numeric score in a native sorted set",
    },
    Capability {
        kind: AnnotationKind::CollectionMap,
        category: Category::Collection,
        summary: "key/value pairs in a native hash",
    },
    Capability {
        kind: AnnotationKind::Array,
        category: Category::Collection,
        summary: "bounded sequence with a fixed maximum length",
    },
];

pub fn capability(kind: AnnotationKind) -> Option<&'static Capability> {
    CAPABILITIES.iter().find(|c| c.kind == kind)
}

pub fn category_of(kind: AnnotationKind) -> Option<Category> {
    capability(kind).map(|c| c.category)
}

pub fn collection_kinds() -> impl Iterator<Item = AnnotationKind> {
    CAPABILITIES
        .iter()
        .filter(|c| c.category == Category::Collection)
        .map(|c| c.kind)
}

pub fn is_collection(kind: AnnotationKind) -> bool {
    category_of(kind) == Some(Category::Collection)
}

/// Whether two distinct annotations may sit on the same field.
pub fn may_combine(a: AnnotationKind, b: AnnotationKind) -> bool {
    if a == b {
        return true;
    }
    match (category_of(a), category_of(b)) {
        (Some(Category::Modifier), Some(other)) | (Some(other), Some(Category::Modifier)) => {
            other != Category::Identity
        }
        _ => false,
    }
}
