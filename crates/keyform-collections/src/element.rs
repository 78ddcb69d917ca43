//! Values that can live inside a stored collection.
//!
//! Scalars are stored by their text form. Models are stored by identity and
//! resolved on read by loading the referenced model's attribute hash; a
//! model whose hash is empty no longer exists.

use std::collections::BTreeMap;

use keyform_schema::{ElementType, Model};
use keyform_types::{Identity, Scalar, Uuid};

use crate::binding::Binding;
use crate::error::{CollectionError, CollectionResult};

/// A collection element.
pub trait Element: Sized {
    /// Descriptor checked against the field's classified element type.
    fn element_type() -> ElementType;

    /// Stored text form.
    fn encode(&self) -> CollectionResult<String>;

    /// Rebuild an element from its stored form. `Ok(None)` means the stored
    /// form refers to a model that no longer exists.
    fn decode(raw: &str, binding: &Binding) -> CollectionResult<Option<Self>>;

    /// Sorted-set score. Scalars score by value and ignore `by`; models read
    /// the numeric attribute `by` names.
    fn ordering_score(&self, by: Option<&str>) -> Option<f64>;
}

macro_rules! scalar_element {
    ($($t:ty),* $(,)?) => {$(
        impl Element for $t {
            fn element_type() -> ElementType {
                ElementType::Primitive(<$t as Scalar>::TYPE_NAME)
            }

            fn encode(&self) -> CollectionResult<String> {
                Ok(self.to_text())
            }

            fn decode(raw: &str, _binding: &Binding) -> CollectionResult<Option<Self>> {
                Ok(Some(<$t as Scalar>::from_text(raw)?))
            }

            fn ordering_score(&self, _by: Option<&str>) -> Option<f64> {
                self.as_score()
            }
        }
    )*};
}

scalar_element!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, bool, char, String, Uuid);

/// A model that can be rebuilt from its stored attribute hash.
///
/// Implement this and invoke [`model_element!`](crate::model_element) to use
/// a model as a collection element.
pub trait Resolve: Model {
    /// Rebuild the model from its identity and attribute hash.
    fn from_attributes(id: Self::Id, attributes: &BTreeMap<String, String>) -> CollectionResult<Self>;

    /// Value of a numeric attribute, for sorted-set scoring.
    fn numeric_attribute(&self, field: &str) -> Option<f64>;
}

#[doc(hidden)]
pub fn encode_model<M: Resolve>(model: &M) -> CollectionResult<String> {
    model
        .id()
        .map(Identity::encode_identity)
        .ok_or(CollectionError::UnidentifiedElement { model: M::NAME })
}

#[doc(hidden)]
pub fn decode_model<M: Resolve>(raw: &str, binding: &Binding) -> CollectionResult<Option<M>> {
    let id = M::Id::decode_identity(raw)?;
    match binding.load_model(M::NAME, raw)? {
        Some(attributes) => M::from_attributes(id, &attributes).map(Some),
        None => Ok(None),
    }
}

/// Make models usable as collection elements and in collection annotations.
///
/// Each listed type must implement [`Resolve`].
///
/// ```ignore
/// keyform_collections::model_element!(Item, Country);
/// ```
#[macro_export]
macro_rules! model_element {
    ($($model:ty),* $(,)?) => {$(
        impl $crate::__private::Describe for $model {
            fn describe() -> $crate::__private::FieldType {
                $crate::__private::FieldType::model::<$model>()
            }
        }

        impl $crate::Element for $model {
            fn element_type() -> $crate::__private::ElementType {
                $crate::__private::ElementType::Model($crate::__private::ModelRef::of::<$model>())
            }

            fn encode(&self) -> $crate::CollectionResult<::std::string::String> {
                $crate::element::encode_model(self)
            }

            fn decode(
                raw: &str,
                binding: &$crate::Binding,
            ) -> $crate::CollectionResult<::std::option::Option<Self>> {
                $crate::element::decode_model::<Self>(raw, binding)
            }

            fn ordering_score(&self, by: ::std::option::Option<&str>) -> ::std::option::Option<f64> {
                by.and_then(|field| $crate::Resolve::numeric_attribute(self, field))
            }
        }
    )*};
}
