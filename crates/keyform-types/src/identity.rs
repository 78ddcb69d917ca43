use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TypeError;
use crate::scalar::Scalar;

/// The three representations an identity field may declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentityKind {
    /// Signed 64-bit integer, rendered in base 10.
    Integer,
    /// Free-form text, stored verbatim.
    Text,
    /// 128-bit UUID, rendered in canonical hyphenated form.
    Uuid,
}

impl IdentityKind {
    /// Resolve the identity kind for a declared type name.
    ///
    /// Only `i64`, `String` and `Uuid` can hold an identity.
    pub fn from_type_name(type_name: &str) -> Result<Self, TypeError> {
        if type_name == i64::TYPE_NAME {
            Ok(Self::Integer)
        } else if type_name == String::TYPE_NAME {
            Ok(Self::Text)
        } else if type_name == Uuid::TYPE_NAME {
            Ok(Self::Uuid)
        } else {
            Err(TypeError::UnsupportedIdentityType(type_name.to_string()))
        }
    }

    /// The declared type name backing this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer => i64::TYPE_NAME,
            Self::Text => String::TYPE_NAME,
            Self::Uuid => Uuid::TYPE_NAME,
        }
    }
}

impl fmt::Display for IdentityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::Text => write!(f, "text"),
            Self::Uuid => write!(f, "uuid"),
        }
    }
}

/// A typed identity value, independent of the model it belongs to.
///
/// The canonical store form of every variant is text; [`IdentityValue::encode`]
/// and [`IdentityValue::decode`] convert losslessly between the two.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IdentityValue {
    Integer(i64),
    Text(String),
    Uuid(Uuid),
}

impl IdentityValue {
    /// The representation of this value.
    pub fn kind(&self) -> IdentityKind {
        match self {
            Self::Integer(_) => IdentityKind::Integer,
            Self::Text(_) => IdentityKind::Text,
            Self::Uuid(_) => IdentityKind::Uuid,
        }
    }

    /// Canonical text form used as a key component.
    pub fn encode(&self) -> String {
        match self {
            Self::Integer(v) => v.to_string(),
            Self::Text(v) => v.clone(),
            Self::Uuid(v) => v.hyphenated().to_string(),
        }
    }

    /// Parse canonical text according to the declared identity type name.
    pub fn decode(text: &str, declared_type: &str) -> Result<Self, TypeError> {
        Self::decode_kind(text, IdentityKind::from_type_name(declared_type)?)
    }

    /// Parse canonical text into the given representation.
    pub fn decode_kind(text: &str, kind: IdentityKind) -> Result<Self, TypeError> {
        match kind {
            IdentityKind::Integer => i64::decode_identity(text).map(Self::Integer),
            IdentityKind::Text => String::decode_identity(text).map(Self::Text),
            IdentityKind::Uuid => Uuid::decode_identity(text).map(Self::Uuid),
        }
    }
}

impl fmt::Display for IdentityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// A Rust type usable as a model's identity field.
///
/// Implemented for exactly the three supported representations. Model
/// identity fields are held as `Option<I>` so that "not yet assigned" is
/// distinct from any value, including zero.
pub trait Identity: Clone + fmt::Debug + PartialEq + Eq + Hash + Send + Sync + 'static {
    const KIND: IdentityKind;

    /// Canonical text form.
    fn encode_identity(&self) -> String;

    /// Parse canonical text.
    fn decode_identity(text: &str) -> Result<Self, TypeError>;

    /// Convert into the untyped value.
    fn into_value(self) -> IdentityValue;

    /// Convert from the untyped value; fails if the representation differs.
    fn from_value(value: IdentityValue) -> Result<Self, TypeError>;
}

fn malformed(kind: IdentityKind, input: &str, reason: impl ToString) -> TypeError {
    TypeError::MalformedIdentity {
        kind,
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

fn mismatch(expected: IdentityKind, value: &IdentityValue) -> TypeError {
    malformed(
        expected,
        &value.encode(),
        format!("expected {expected} identity, found {}", value.kind()),
    )
}

impl Identity for i64 {
    const KIND: IdentityKind = IdentityKind::Integer;

    fn encode_identity(&self) -> String {
        self.to_string()
    }

    fn decode_identity(text: &str) -> Result<Self, TypeError> {
        text.parse::<i64>()
            .map_err(|e| malformed(Self::KIND, text, e))
    }

    fn into_value(self) -> IdentityValue {
        IdentityValue::Integer(self)
    }

    fn from_value(value: IdentityValue) -> Result<Self, TypeError> {
        match value {
            IdentityValue::Integer(v) => Ok(v),
            other => Err(mismatch(Self::KIND, &other)),
        }
    }
}

impl Identity for String {
    const KIND: IdentityKind = IdentityKind::Text;

    fn encode_identity(&self) -> String {
        self.clone()
    }

    fn decode_identity(text: &str) -> Result<Self, TypeError> {
        Ok(text.to_string())
    }

    fn into_value(self) -> IdentityValue {
        IdentityValue::Text(self)
    }

    fn from_value(value: IdentityValue) -> Result<Self, TypeError> {
        match value {
            IdentityValue::Text(v) => Ok(v),
            other => Err(mismatch(Self::KIND, &other)),
        }
    }
}

impl Identity for Uuid {
    const KIND: IdentityKind = IdentityKind::Uuid;

    fn encode_identity(&self) -> String {
        self.hyphenated().to_string()
    }

    fn decode_identity(text: &str) -> Result<Self, TypeError> {
        Uuid::parse_str(text).map_err(|e| malformed(Self::KIND, text, e))
    }

    fn into_value(self) -> IdentityValue {
        IdentityValue::Uuid(self)
    }

    fn from_value(value: IdentityValue) -> Result<Self, TypeError> {
        match value {
            IdentityValue::Uuid(v) => Ok(v),
            other => Err(mismatch(Self::KIND, &other)),
        }
    }
}
