//! Scalar conversion between Rust values and their stored text form.
//!
//! [`Scalar`] is the symmetric encode/decode capability for one Rust type.
//! [`Converter`] answers, by declared type name, whether a type is a
//! supported scalar at all. Schema validation only sees type names, while
//! collection proxies work with concrete values. Registering a new scalar means implementing [`Scalar`]
//! for it and adding it to a [`ScalarRegistry`].

use std::collections::BTreeMap;
use std::fmt;

use uuid::Uuid;

use crate::error::TypeError;

/// A value stored by its text form.
pub trait Scalar: Sized {
    /// Declared type name, as used in model declarations.
    const TYPE_NAME: &'static str;

    /// Whether values can serve as a sorted-set score.
    const NUMERIC: bool = false;

    fn to_text(&self) -> String;

    fn from_text(text: &str) -> Result<Self, TypeError>;

    /// Numeric projection used as a sorted-set score.
    fn as_score(&self) -> Option<f64> {
        None
    }
}

macro_rules! numeric_scalar {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const TYPE_NAME: &'static str = $name;
                const NUMERIC: bool = true;

                fn to_text(&self) -> String {
                    self.to_string()
                }

                fn from_text(text: &str) -> Result<Self, TypeError> {
                    text.parse::<$ty>()
                        .map_err(|e| TypeError::malformed_scalar(Self::TYPE_NAME, text, e))
                }

                #[allow(clippy::cast_lossless, clippy::cast_precision_loss)]
                fn as_score(&self) -> Option<f64> {
                    Some(*self as f64)
                }
            }
        )*
    };
}

numeric_scalar! {
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    f32 => "f32",
    f64 => "f64",
}

impl Scalar for bool {
    const TYPE_NAME: &'static str = "bool";

    fn to_text(&self) -> String {
        self.to_string()
    }

    fn from_text(text: &str) -> Result<Self, TypeError> {
        text.parse::<bool>()
            .map_err(|e| TypeError::malformed_scalar(Self::TYPE_NAME, text, e))
    }
}

impl Scalar for char {
    const TYPE_NAME: &'static str = "char";

    fn to_text(&self) -> String {
        self.to_string()
    }

    fn from_text(text: &str) -> Result<Self, TypeError> {
        text.parse::<char>()
            .map_err(|e| TypeError::malformed_scalar(Self::TYPE_NAME, text, e))
    }
}

impl Scalar for String {
    const TYPE_NAME: &'static str = "String";

    fn to_text(&self) -> String {
        self.clone()
    }

    fn from_text(text: &str) -> Result<Self, TypeError> {
        Ok(text.to_string())
    }
}

impl Scalar for Uuid {
    const TYPE_NAME: &'static str = "Uuid";

    fn to_text(&self) -> String {
        self.hyphenated().to_string()
    }

    fn from_text(text: &str) -> Result<Self, TypeError> {
        Uuid::parse_str(text).map_err(|e| TypeError::malformed_scalar(Self::TYPE_NAME, text, e))
    }
}

/// Decides which declared type names are supported scalars.
pub trait Converter: fmt::Debug + Send + Sync {
    fn is_supported(&self, type_name: &str) -> bool;

    /// Whether a supported scalar is numeric (usable as an ordering score).
    fn is_numeric(&self, type_name: &str) -> bool;
}

/// Table-driven [`Converter`] seeded with the built-in scalars.
#[derive(Clone, Debug)]
pub struct ScalarRegistry {
    types: BTreeMap<String, bool>,
}

impl ScalarRegistry {
    /// Registry holding only the built-in scalars.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry
            .register::<i8>()
            .register::<i16>()
            .register::<i32>()
            .register::<i64>()
            .register::<u8>()
            .register::<u16>()
            .register::<u32>()
            .register::<u64>()
            .register::<f32>()
            .register::<f64>()
            .register::<bool>()
            .register::<char>()
            .register::<String>()
            .register::<Uuid>();
        registry
    }

    /// Registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            types: BTreeMap::new(),
        }
    }

    /// Register a scalar type.
    pub fn register<T: Scalar>(&mut self) -> &mut Self {
        self.types.insert(T::TYPE_NAME.to_string(), T::NUMERIC);
        self
    }

    /// Register a type by name, for types whose conversion lives elsewhere.
    pub fn register_name(&mut self, type_name: impl Into<String>, numeric: bool) -> &mut Self {
        self.types.insert(type_name.into(), numeric);
        self
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}

impl Default for ScalarRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Converter for ScalarRegistry {
    fn is_supported(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    fn is_numeric(&self, type_name: &str) -> bool {
        self.types.get(type_name).copied().unwrap_or(false)
    }
}
