//! Versioned syntax-tree library for the synlight shim.
//!
//! This crate plays the part of the external syntax library whose surface
//! changes between releases:
//! - Immutable nodes and tokens (`SyntaxNode`, `SyntaxToken`, lists)
//! - Run-time type metadata (`SyntaxType`, `PropertyDescriptor`, `ValueType`)
//! - Library versions described by JSON manifests (`LibraryManifest`)
//! - Bundled versions and process-level configuration
//!
//! Nodes are dynamically typed. Whether a node type or property exists is a
//! question for the loaded [`SyntaxLibrary`], answered at run time.

pub mod config;
pub mod embedded;
pub mod error;
pub mod library;
pub mod list;
pub mod manifest;
pub mod metadata;
pub mod node;
pub mod token;
pub mod typed;
pub mod value;

pub use config::LibraryConfig;
pub use error::{Result, SyntaxError};
pub use library::{LibraryVersion, SyntaxLibrary};
pub use list::{SeparatedSyntaxList, SyntaxList};
pub use manifest::{LibraryManifest, PropertyManifest, TypeManifest};
pub use metadata::{PropertyDescriptor, SyntaxType, ValueType};
pub use node::{NodeBuilder, SyntaxNode};
pub use token::{SyntaxKind, SyntaxToken, SyntaxTokenList};
pub use typed::{NodeKind, TypedNode, TypedNodeList, TypedSeparatedList};
pub use value::SyntaxValue;

/// Test modules, loaded from `tests/` like the rest of the workspace.
#[cfg(test)]
#[path = "../tests/library_tests.rs"]
mod library_tests;
#[cfg(test)]
#[path = "../tests/node_tests.rs"]
mod node_tests;
#[cfg(test)]
#[path = "../tests/list_tests.rs"]
mod list_tests;
#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod config_tests;
