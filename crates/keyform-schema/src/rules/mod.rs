pub mod attribute;
pub mod collection;
pub mod combination;
pub mod element;
pub mod identity;
pub mod index;
pub mod structure;

pub use attribute::AttributeRule;
pub use collection::CollectionRule;
pub use combination::CombinationRule;
pub use element::ElementRule;
pub use identity::IdentityRule;
pub use index::IndexRule;
pub use structure::StructureRule;
