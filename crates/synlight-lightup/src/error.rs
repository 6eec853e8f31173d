//! Error types for the lightup layer.
//!
//! The shim surfaces exactly two failure kinds. [`LightupError::InvalidCast`]
//! is a programming error: a node was forced into a wrapper kind it does not
//! belong to. [`LightupError::FeatureUnavailable`] is expected whenever the
//! loaded syntax library predates a type or property; callers check for it
//! with [`LightupError::is_feature_unavailable`] and fall back.

use synlight_syntax::SyntaxError;
use thiserror::Error;

/// Errors raised by wrappers and synthesized accessors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LightupError {
    /// A node is not an instance of the wrapper's target type
    #[error("Cannot cast '{actual}' to '{expected}'")]
    InvalidCast { actual: String, expected: String },

    /// The loaded library version lacks the type or member
    #[error("'{type_name}.{member}' is not available in this version of the syntax library")]
    FeatureUnavailable { type_name: String, member: String },
}

impl LightupError {
    pub fn invalid_cast(actual: impl Into<String>, expected: impl Into<String>) -> Self {
        LightupError::InvalidCast {
            actual: actual.into(),
            expected: expected.into(),
        }
    }

    pub fn feature_unavailable(type_name: impl Into<String>, member: impl Into<String>) -> Self {
        LightupError::FeatureUnavailable {
            type_name: type_name.into(),
            member: member.into(),
        }
    }

    #[inline]
    pub fn is_invalid_cast(&self) -> bool {
        matches!(self, LightupError::InvalidCast { .. })
    }

    #[inline]
    pub fn is_feature_unavailable(&self) -> bool {
        matches!(self, LightupError::FeatureUnavailable { .. })
    }
}

/// Owner name reported for library failures that name no type.
pub const LIBRARY_OWNER: &str = "<library>";

/// Map a library failure raised inside a synthesized accessor.
///
/// Value mismatches are casts gone wrong; anything the library does not
/// know about is an unavailable feature.
impl From<SyntaxError> for LightupError {
    fn from(err: SyntaxError) -> Self {
        match err {
            SyntaxError::ValueMismatch {
                expected, actual, ..
            } => LightupError::InvalidCast { actual, expected },
            SyntaxError::UnknownProperty {
                type_name,
                property,
            }
            | SyntaxError::NoWithOperation {
                type_name,
                property,
            } => LightupError::FeatureUnavailable {
                type_name,
                member: property,
            },
            SyntaxError::UnknownType(type_name) | SyntaxError::AbstractType(type_name) => {
                LightupError::FeatureUnavailable {
                    type_name,
                    member: "<type>".to_string(),
                }
            }
            // Loading and list construction only; slot reads and
            // `with_property` never raise these.
            err @ (SyntaxError::DuplicateType(_)
            | SyntaxError::DuplicateProperty { .. }
            | SyntaxError::InheritanceCycle(_)
            | SyntaxError::SeparatorCount { .. }
            | SyntaxError::InvalidVersion(_)
            | SyntaxError::UnknownVersion(_)
            | SyntaxError::Manifest(_)
            | SyntaxError::Io(_)) => LightupError::FeatureUnavailable {
                type_name: LIBRARY_OWNER.to_string(),
                member: err.to_string(),
            },
        }
    }
}

/// Result type alias for [`LightupError`]
pub type Result<T> = std::result::Result<T, LightupError>;
