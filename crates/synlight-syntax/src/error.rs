//! Error types for the syntax library.
//!
//! Every failure of the library surface (node construction, immutable
//! updates, manifest loading) is reported through [`SyntaxError`]. Payloads
//! are plain strings so errors stay `Clone` and can be stored next to the
//! values they describe.

use thiserror::Error;

/// Errors raised by the syntax library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// No type with this fully-qualified name exists in the library
    #[error("Unknown syntax type '{0}'")]
    UnknownType(String),

    /// The type (including its base types) declares no such property
    #[error("Type '{type_name}' has no property '{property}'")]
    UnknownProperty { type_name: String, property: String },

    /// The property exists but the library offers no `with` operation for it
    #[error("Property '{type_name}.{property}' has no with operation")]
    NoWithOperation { type_name: String, property: String },

    /// A value does not fit the declared type of a property
    #[error("Cannot store {actual} in '{type_name}.{property}' declared as {expected}")]
    ValueMismatch {
        type_name: String,
        property: String,
        expected: String,
        actual: String,
    },

    /// Abstract types only exist as bases
    #[error("Cannot instantiate abstract type '{0}'")]
    AbstractType(String),

    /// A manifest declares the same type twice
    #[error("Duplicate type '{0}'")]
    DuplicateType(String),

    /// A type redeclares a property it already has
    #[error("Duplicate property '{property}' on '{type_name}'")]
    DuplicateProperty { type_name: String, property: String },

    /// A type is (transitively) its own base
    #[error("Inheritance cycle through '{0}'")]
    InheritanceCycle(String),

    /// Separator count does not match the node count of a separated list
    #[error("Separated list with {nodes} nodes cannot hold {separators} separators")]
    SeparatorCount { nodes: usize, separators: usize },

    /// A version string could not be parsed
    #[error("Invalid library version '{0}'")]
    InvalidVersion(String),

    /// No bundled manifest exists for the requested version
    #[error("No bundled syntax library for version {0}")]
    UnknownVersion(String),

    /// The manifest JSON could not be decoded
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// I/O error while reading a manifest
    #[error("I/O error: {0}")]
    Io(String),
}

impl SyntaxError {
    /// Wrap a `serde_json` decoding error.
    pub fn manifest(err: &serde_json::Error) -> Self {
        SyntaxError::Manifest(err.to_string())
    }
}

impl From<std::io::Error> for SyntaxError {
    fn from(err: std::io::Error) -> Self {
        SyntaxError::Io(err.to_string())
    }
}

/// Result type alias for [`SyntaxError`]
pub type Result<T> = std::result::Result<T, SyntaxError>;
