use keyform_types::Identity;

use crate::decl::ModelDecl;

/// A Rust type mapped onto the key-value store.
///
/// The identity is optional on the instance: `None` means the model is new
/// and has never been assigned one.
///
/// ```
/// use keyform_schema::{FieldDecl, Model, ModelDecl};
///
/// struct Town {
///     id: Option<String>,
///     name: Option<String>,
/// }
///
/// impl Model for Town {
///     const NAME: &'static str = "Town";
///     type Id = String;
///
///     fn declaration() -> ModelDecl {
///         ModelDecl::new(Self::NAME)
///             .field(FieldDecl::of::<String>("id").id())
///             .field(FieldDecl::of::<String>("name").attribute())
///     }
///
///     fn id(&self) -> Option<&String> {
///         self.id.as_ref()
///     }
///
///     fn set_id(&mut self, id: Option<String>) {
///         self.id = id;
///     }
/// }
///
/// let town = Town { id: None, name: Some("Chennai".into()) };
/// assert!(town.id().is_none());
/// ```
pub trait Model: Sized + 'static {
    /// Type name used in storage keys.
    const NAME: &'static str;

    /// Rust type of the identity field.
    type Id: Identity;

    fn declaration() -> ModelDecl;

    fn id(&self) -> Option<&Self::Id>;

    fn set_id(&mut self, id: Option<Self::Id>);
}
