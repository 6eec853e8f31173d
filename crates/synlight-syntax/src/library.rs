//! The loaded syntax library: a version-indexed table of node types.

use crate::error::{Result, SyntaxError};
use crate::manifest::{LibraryManifest, TypeManifest};
use crate::metadata::{SyntaxType, ValueType};
use crate::node::NodeBuilder;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// `major.minor` version of a library.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LibraryVersion {
    pub major: u16,
    pub minor: u16,
}

impl LibraryVersion {
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }
}

impl FromStr for LibraryVersion {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SyntaxError::InvalidVersion(s.to_string());
        let trimmed = s.trim();
        let (major, minor) = match trimmed.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (trimmed, "0"),
        };
        let major = major.parse().map_err(|_| invalid())?;
        let minor = minor.parse().map_err(|_| invalid())?;
        Ok(Self { major, minor })
    }
}

impl TryFrom<String> for LibraryVersion {
    type Error = SyntaxError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<LibraryVersion> for String {
    fn from(version: LibraryVersion) -> Self {
        version.to_string()
    }
}

impl fmt::Display for LibraryVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// One loaded version of the syntax library.
///
/// Built once from a [`LibraryManifest`] and immutable afterwards; share it
/// behind an `Arc`.
pub struct SyntaxLibrary {
    name: String,
    version: LibraryVersion,
    types: FxHashMap<Arc<str>, Arc<SyntaxType>>,
    /// Types in manifest order.
    order: Vec<Arc<SyntaxType>>,
}

impl SyntaxLibrary {
    /// Validate a manifest and build its type table.
    pub fn from_manifest(manifest: &LibraryManifest) -> Result<Self> {
        let mut by_name: FxHashMap<&str, &TypeManifest> = FxHashMap::default();
        for ty in &manifest.types {
            if by_name.insert(ty.name.as_str(), ty).is_some() {
                return Err(SyntaxError::DuplicateType(ty.name.clone()));
            }
        }

        let mut types = FxHashMap::default();
        let mut order = Vec::with_capacity(manifest.types.len());
        for ty in &manifest.types {
            let built = build_type(&ty.name, &by_name, &mut types, &mut Vec::new())?;
            order.push(built);
        }

        for ty in &order {
            for property in ty.own_properties() {
                if let Some(element) = property.value_type.element_type() {
                    if !types.contains_key(element) {
                        return Err(SyntaxError::UnknownType(element.to_string()));
                    }
                }
            }
        }

        debug!(
            library = %manifest.name,
            version = %manifest.version,
            types = order.len(),
            "loaded syntax library"
        );
        Ok(Self {
            name: manifest.name.clone(),
            version: manifest.version,
            types,
            order,
        })
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Self::from_manifest(&LibraryManifest::from_json(text)?)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn version(&self) -> LibraryVersion {
        self.version
    }

    /// Look a type up by its fully-qualified name.
    pub fn find_type(&self, name: &str) -> Option<&Arc<SyntaxType>> {
        self.types.get(name)
    }

    pub fn contains_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// All types in manifest order.
    pub fn types(&self) -> impl Iterator<Item = &Arc<SyntaxType>> {
        self.order.iter()
    }

    pub fn type_count(&self) -> usize {
        self.order.len()
    }

    /// Whether a node of type `from` may stand where `to` is expected.
    pub fn is_assignable(&self, from: &str, to: &str) -> bool {
        from == to
            || self
                .find_type(from)
                .is_some_and(|ty| ty.derives_from_name(to))
    }

    /// Whether a value declared as `source` may be used where `target` is
    /// expected.
    ///
    /// Single nodes are covariant. Lists are invariant in their element type.
    pub fn is_value_assignable(&self, source: &ValueType, target: &ValueType) -> bool {
        match (source, target) {
            (ValueType::Token, ValueType::Token) => true,
            (ValueType::TokenList, ValueType::TokenList) => true,
            (ValueType::Node(from), ValueType::Node(to)) => self.is_assignable(from, to),
            (ValueType::NodeList(from), ValueType::NodeList(to)) => from == to,
            (ValueType::SeparatedList(from), ValueType::SeparatedList(to)) => from == to,
            _ => false,
        }
    }

    /// Start building a node of the named concrete type.
    pub fn node(&self, type_name: &str) -> Result<NodeBuilder> {
        let ty = self
            .find_type(type_name)
            .ok_or_else(|| SyntaxError::UnknownType(type_name.to_string()))?;
        if ty.is_abstract() {
            return Err(SyntaxError::AbstractType(type_name.to_string()));
        }
        Ok(NodeBuilder::new(ty.clone()))
    }
}

impl fmt::Debug for SyntaxLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxLibrary")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("types", &self.order.len())
            .finish()
    }
}

/// Build `name` (and, first, its base chain) into `built`.
fn build_type(
    name: &str,
    by_name: &FxHashMap<&str, &TypeManifest>,
    built: &mut FxHashMap<Arc<str>, Arc<SyntaxType>>,
    visiting: &mut Vec<String>,
) -> Result<Arc<SyntaxType>> {
    if let Some(ty) = built.get(name) {
        return Ok(ty.clone());
    }
    let manifest = by_name
        .get(name)
        .ok_or_else(|| SyntaxError::UnknownType(name.to_string()))?;
    if visiting.iter().any(|v| v == name) {
        return Err(SyntaxError::InheritanceCycle(name.to_string()));
    }

    visiting.push(name.to_string());
    let base = match &manifest.base {
        Some(base) => Some(build_type(base, by_name, built, visiting)?),
        None => None,
    };
    visiting.pop();

    let mut own: Vec<(Arc<str>, ValueType, bool)> = Vec::with_capacity(manifest.properties.len());
    for property in &manifest.properties {
        let declared_here = own.iter().any(|(n, _, _)| **n == *property.name);
        let inherited = base
            .as_ref()
            .is_some_and(|b| b.find_property(&property.name).is_some());
        if declared_here || inherited {
            return Err(SyntaxError::DuplicateProperty {
                type_name: name.to_string(),
                property: property.name.clone(),
            });
        }
        own.push((
            Arc::from(property.name.as_str()),
            property.value_type.clone(),
            property.has_with,
        ));
    }

    let type_name: Arc<str> = Arc::from(name);
    let ty = Arc::new(SyntaxType::new(
        type_name.clone(),
        base,
        manifest.is_abstract,
        own,
    ));
    built.insert(type_name, ty.clone());
    Ok(ty)
}
