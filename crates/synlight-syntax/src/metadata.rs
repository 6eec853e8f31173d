//! Run-time type metadata.
//!
//! Every node carries a reference to its [`SyntaxType`]. A type knows its
//! base type and the properties it declares; this is the reflection surface
//! consumers use to discover what a given library version supports.
//!
//! Property values live in slots. A derived type's slots are the slots of
//! its base followed by its own, so a property keeps its slot index across
//! the whole hierarchy below the type that declares it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Declared type of a property.
///
/// Node-bearing variants name the element type by its fully-qualified name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum ValueType {
    Token,
    TokenList,
    Node(Arc<str>),
    NodeList(Arc<str>),
    SeparatedList(Arc<str>),
}

impl ValueType {
    pub fn node(type_name: &str) -> Self {
        ValueType::Node(Arc::from(type_name))
    }

    pub fn node_list(type_name: &str) -> Self {
        ValueType::NodeList(Arc::from(type_name))
    }

    pub fn separated_list(type_name: &str) -> Self {
        ValueType::SeparatedList(Arc::from(type_name))
    }

    /// Node type referenced by this value type, if any.
    pub fn element_type(&self) -> Option<&str> {
        match self {
            ValueType::Token | ValueType::TokenList => None,
            ValueType::Node(name) | ValueType::NodeList(name) | ValueType::SeparatedList(name) => {
                Some(name)
            }
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Token => f.write_str("SyntaxToken"),
            ValueType::TokenList => f.write_str("SyntaxTokenList"),
            ValueType::Node(name) => write!(f, "{name}"),
            ValueType::NodeList(name) => write!(f, "SyntaxList<{name}>"),
            ValueType::SeparatedList(name) => write!(f, "SeparatedSyntaxList<{name}>"),
        }
    }
}

/// One declared property of a [`SyntaxType`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub name: Arc<str>,
    pub value_type: ValueType,
    /// Slot index within every node of the declaring type or a derived type.
    pub slot: usize,
    /// Whether the library offers an immutable `with` update for the property.
    pub has_with: bool,
    /// Type that declares the property.
    pub declaring_type: Arc<str>,
}

/// A node type of a loaded library version.
#[derive(Debug)]
pub struct SyntaxType {
    name: Arc<str>,
    base: Option<Arc<SyntaxType>>,
    is_abstract: bool,
    properties: Vec<PropertyDescriptor>,
    slot_count: usize,
}

impl SyntaxType {
    /// Build a type; `own` lists the properties it declares in slot order.
    ///
    /// Slots are assigned after the base's slots.
    pub(crate) fn new(
        name: Arc<str>,
        base: Option<Arc<SyntaxType>>,
        is_abstract: bool,
        own: Vec<(Arc<str>, ValueType, bool)>,
    ) -> Self {
        let first_slot = base.as_ref().map_or(0, |b| b.slot_count);
        let properties: Vec<PropertyDescriptor> = own
            .into_iter()
            .enumerate()
            .map(|(i, (prop_name, value_type, has_with))| PropertyDescriptor {
                name: prop_name,
                value_type,
                slot: first_slot + i,
                has_with,
                declaring_type: name.clone(),
            })
            .collect();
        let slot_count = first_slot + properties.len();
        Self {
            name,
            base,
            is_abstract,
            properties,
            slot_count,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base(&self) -> Option<&Arc<SyntaxType>> {
        self.base.as_ref()
    }

    #[inline]
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// Properties declared by this type, excluding inherited ones.
    pub fn own_properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    /// All properties in slot order, inherited ones first.
    pub fn properties(&self) -> Vec<&PropertyDescriptor> {
        let mut chain: Vec<&SyntaxType> = self.ancestors().collect();
        chain.reverse();
        chain.into_iter().flat_map(|t| t.properties.iter()).collect()
    }

    /// Number of slots a node of this type carries.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Look a property up on this type or any of its bases.
    pub fn find_property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.ancestors()
            .find_map(|t| t.properties.iter().find(|p| &*p.name == name))
    }

    /// This type followed by its base chain.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// Identity-based hierarchy check: `self` is `other` or derives from it.
    pub fn is_subtype_of(&self, other: &SyntaxType) -> bool {
        self.ancestors().any(|t| std::ptr::eq(t, other))
    }

    /// Name-based hierarchy check used where only a type name is at hand.
    pub fn derives_from_name(&self, name: &str) -> bool {
        self.ancestors().any(|t| t.name() == name)
    }
}

impl fmt::Display for SyntaxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Iterator over a type and its bases, most derived first.
pub struct Ancestors<'a> {
    next: Option<&'a SyntaxType>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a SyntaxType;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.base.as_deref();
        Some(current)
    }
}
