use thiserror::Error;

use crate::identity::IdentityKind;

/// Errors produced by identity and scalar conversions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// Identity text could not be parsed into the declared representation.
    #[error("malformed {kind} identity {input:?}: {reason}")]
    MalformedIdentity {
        kind: IdentityKind,
        input: String,
        reason: String,
    },

    /// The declared type cannot hold an identity.
    #[error("unsupported identity type: {0}")]
    UnsupportedIdentityType(String),

    /// Scalar text could not be parsed into the target type.
    #[error("malformed {type_name} value {input:?}: {reason}")]
    MalformedScalar {
        type_name: &'static str,
        input: String,
        reason: String,
    },
}

impl TypeError {
    /// A [`TypeError::MalformedScalar`] for `input`, with any error as the reason.
    pub fn malformed_scalar(
        type_name: &'static str,
        input: &str,
        reason: impl ToString,
    ) -> Self {
        Self::MalformedScalar {
            type_name,
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }
}
