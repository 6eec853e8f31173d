//! Immutable syntax nodes.

use crate::error::{Result, SyntaxError};
use crate::metadata::{PropertyDescriptor, SyntaxType};
use crate::value::SyntaxValue;
use std::fmt;
use std::sync::Arc;

struct NodeData {
    ty: Arc<SyntaxType>,
    slots: Box<[SyntaxValue]>,
}

/// A node of the syntax tree.
///
/// Nodes are immutable and cheap to clone. Updates go through
/// [`SyntaxNode::with_property`], which returns a new node.
#[derive(Clone)]
pub struct SyntaxNode(Arc<NodeData>);

impl SyntaxNode {
    /// Run-time type of this node.
    #[inline]
    pub fn syntax_type(&self) -> &Arc<SyntaxType> {
        &self.0.ty
    }

    #[inline]
    pub fn type_name(&self) -> &str {
        self.0.ty.name()
    }

    /// Raw slot access by index.
    #[inline]
    pub fn slot(&self, index: usize) -> Option<&SyntaxValue> {
        self.0.slots.get(index)
    }

    /// Read a property by name.
    pub fn property(&self, name: &str) -> Result<&SyntaxValue> {
        let descriptor = self.descriptor(name)?;
        self.slot(descriptor.slot)
            .ok_or_else(|| self.unknown_property(name))
    }

    /// Produce a copy of this node with one property replaced.
    ///
    /// Fails when the type has no such property, when the library offers no
    /// `with` operation for it, or when `value` does not fit its declared type.
    pub fn with_property(&self, name: &str, value: impl Into<SyntaxValue>) -> Result<SyntaxNode> {
        let descriptor = self.descriptor(name)?;
        if !descriptor.has_with {
            return Err(SyntaxError::NoWithOperation {
                type_name: self.type_name().to_string(),
                property: name.to_string(),
            });
        }
        let value = value.into();
        check_fits(self.type_name(), descriptor, &value)?;
        let mut slots = self.0.slots.to_vec();
        slots[descriptor.slot] = value;
        Ok(Self::from_parts(self.0.ty.clone(), slots))
    }

    /// Child nodes across all slots, in slot order.
    pub fn children(&self) -> Vec<SyntaxNode> {
        self.0.slots.iter().flat_map(SyntaxValue::child_nodes).collect()
    }

    /// Whether both handles refer to the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &SyntaxNode) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn from_parts(ty: Arc<SyntaxType>, slots: Vec<SyntaxValue>) -> Self {
        SyntaxNode(Arc::new(NodeData {
            ty,
            slots: slots.into_boxed_slice(),
        }))
    }

    fn descriptor(&self, name: &str) -> Result<&PropertyDescriptor> {
        self.0
            .ty
            .find_property(name)
            .ok_or_else(|| self.unknown_property(name))
    }

    fn unknown_property(&self, name: &str) -> SyntaxError {
        SyntaxError::UnknownProperty {
            type_name: self.type_name().to_string(),
            property: name.to_string(),
        }
    }
}

/// Structural equality: same type (by identity) and equal slots.
impl PartialEq for SyntaxNode {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || (Arc::ptr_eq(&self.0.ty, &other.0.ty) && self.0.slots == other.0.slots)
    }
}

impl Eq for SyntaxNode {}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(self.type_name());
        for descriptor in self.0.ty.properties() {
            if let Some(value) = self.slot(descriptor.slot) {
                s.field(&descriptor.name, value);
            }
        }
        s.finish()
    }
}

fn check_fits(type_name: &str, descriptor: &PropertyDescriptor, value: &SyntaxValue) -> Result<()> {
    if value.fits(&descriptor.value_type) {
        return Ok(());
    }
    Err(SyntaxError::ValueMismatch {
        type_name: type_name.to_string(),
        property: descriptor.name.to_string(),
        expected: descriptor.value_type.to_string(),
        actual: value.describe(),
    })
}

/// Builder for a new node; obtained from `SyntaxLibrary::node`.
///
/// Slots that are never set hold the default for their declared type: a
/// missing token, a null node or an empty list.
pub struct NodeBuilder {
    ty: Arc<SyntaxType>,
    slots: Vec<SyntaxValue>,
}

impl NodeBuilder {
    pub(crate) fn new(ty: Arc<SyntaxType>) -> Self {
        let slots = ty
            .properties()
            .into_iter()
            .map(|p| SyntaxValue::default_for(&p.value_type))
            .collect();
        Self { ty, slots }
    }

    /// Set a property. Does not require a `with` operation.
    pub fn set(mut self, name: &str, value: impl Into<SyntaxValue>) -> Result<Self> {
        let descriptor = self
            .ty
            .find_property(name)
            .ok_or_else(|| SyntaxError::UnknownProperty {
                type_name: self.ty.name().to_string(),
                property: name.to_string(),
            })?;
        let value = value.into();
        check_fits(self.ty.name(), descriptor, &value)?;
        let slot = descriptor.slot;
        self.slots[slot] = value;
        Ok(self)
    }

    pub fn build(self) -> SyntaxNode {
        SyntaxNode::from_parts(self.ty, self.slots)
    }
}
