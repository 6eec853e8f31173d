//! Version-tolerant access to the synlight syntax library.
//!
//! Analysis code written against this crate runs unchanged on every library
//! version. Node types and properties that only some versions have are
//! reached through wrapper kinds:
//! - [`TypeResolver`]: resolves a wrapper's target type once, present or absent
//! - [`AccessorSynthesizer`]: builds cached getters and with-accessors from
//!   the library's type metadata, degrading to `FeatureUnavailable` sentinels
//! - [`SyntaxWrapper`]: checked casts, widening and sibling conversions
//! - [`SeparatedSyntaxListWrapper`]: separated lists of wrapper values
//!
//! All per-library state lives in a [`LightupRegistry`].
//!
//! ```ignore
//! let registry = LightupRegistry::from_config(&LibraryConfig::from_env()?)?;
//! if SingleVariableDesignationSyntaxWrapper::is_instance(&registry, Some(&node)) {
//!     let designation = SingleVariableDesignationSyntaxWrapper::cast(&registry, Some(node))?;
//!     let renamed = designation.with_identifier(SyntaxToken::identifier("renamed"))?;
//! }
//! ```

pub mod accessor;
pub mod error;
pub mod registry;
pub mod resolver;
pub mod separated_list;
pub mod tracing_config;
pub mod wrapper;
pub mod wrappers;

pub use accessor::{
    AccessorDirection, AccessorSynthesizer, FeatureStatus, LightupValue, PropertyAccessor,
    SynthesisStats, WithPropertyAccessor,
};
pub use error::{LightupError, Result};
pub use registry::LightupRegistry;
pub use resolver::{TypeHandle, TypeResolver};
pub use separated_list::SeparatedSyntaxListWrapper;
pub use synlight_syntax as syntax;
pub use wrapper::{NULL_NODE, SyntaxWrapper, Wrapped, WrapperKind};
pub use wrappers::*;

#[cfg(test)]
#[path = "../tests/fixtures.rs"]
mod fixtures;

#[cfg(test)]
#[path = "../tests/resolver_tests.rs"]
mod resolver_tests;
#[cfg(test)]
#[path = "../tests/accessor_tests.rs"]
mod accessor_tests;
#[cfg(test)]
#[path = "../tests/wrapper_tests.rs"]
mod wrapper_tests;
#[cfg(test)]
#[path = "../tests/separated_list_tests.rs"]
mod separated_list_tests;
#[cfg(test)]
#[path = "../tests/registry_tests.rs"]
mod registry_tests;
