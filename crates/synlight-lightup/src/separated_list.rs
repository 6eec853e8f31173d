//! Separated lists of wrapper values.

use crate::error::{LightupError, Result};
use crate::registry::LightupRegistry;
use crate::wrapper::{NULL_NODE, SyntaxWrapper, Wrapped};
use std::fmt;
use std::marker::PhantomData;
use synlight_syntax::{SeparatedSyntaxList, SyntaxNode, SyntaxToken};

/// A [`SeparatedSyntaxList`] whose elements are read as wrapper kind `T`.
///
/// The list is immutable: `add`, `insert`, `remove_at` and friends return a
/// new list. Elements handed in must be non-default wrappers.
pub struct SeparatedSyntaxListWrapper<T: SyntaxWrapper> {
    list: SeparatedSyntaxList,
    /// Registry elements are bound against; `None` only for lists that were
    /// never read from a node or given an element.
    registry: Option<LightupRegistry>,
    _element: PhantomData<fn() -> T>,
}

impl<T: SyntaxWrapper> SeparatedSyntaxListWrapper<T> {
    pub(crate) fn from_list(registry: Option<LightupRegistry>, list: SeparatedSyntaxList) -> Self {
        Self {
            list,
            registry,
            _element: PhantomData,
        }
    }

    /// An empty list, for library versions that lack the element type.
    pub fn unsupported() -> Self {
        Self::from_list(None, SeparatedSyntaxList::empty())
    }

    /// A comma-separated list of `items`.
    pub fn create(registry: &LightupRegistry, items: impl IntoIterator<Item = T>) -> Result<Self> {
        let nodes = items
            .into_iter()
            .map(element_node)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_list(
            Some(registry.clone()),
            SeparatedSyntaxList::from_nodes(nodes),
        ))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn separator_count(&self) -> usize {
        self.list.separator_count()
    }

    pub fn get(&self, index: usize) -> Option<T> {
        let node = self.list.get(index)?;
        Some(self.wrap(node))
    }

    pub fn first(&self) -> Option<T> {
        self.get(0)
    }

    pub fn last(&self) -> Option<T> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.list.iter().map(|node| self.wrap(node))
    }

    pub fn separator(&self, index: usize) -> Option<&SyntaxToken> {
        self.list.separator(index)
    }

    pub fn separators(&self) -> &[SyntaxToken] {
        self.list.separators()
    }

    /// Position of the first element whose node equals `item`'s.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        let target = item.syntax_node()?;
        self.list.iter().position(|node| node == target)
    }

    pub fn add(&self, item: T) -> Result<Self> {
        self.insert_range(self.len(), std::iter::once(item))
    }

    pub fn add_range(&self, items: impl IntoIterator<Item = T>) -> Result<Self> {
        self.insert_range(self.len(), items)
    }

    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&self, index: usize, item: T) -> Result<Self> {
        self.insert_range(index, std::iter::once(item))
    }

    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_range(&self, index: usize, items: impl IntoIterator<Item = T>) -> Result<Self> {
        let items: Vec<T> = items.into_iter().collect();
        let registry = self.adopt_registry(&items);
        let nodes = items
            .into_iter()
            .map(element_node)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_list(registry, self.list.insert_range(index, nodes)))
    }

    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove_at(&self, index: usize) -> Self {
        Self::from_list(self.registry.clone(), self.list.remove_at(index))
    }

    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn replace(&self, index: usize, item: T) -> Result<Self> {
        let registry = self.adopt_registry(std::slice::from_ref(&item));
        let node = element_node(item)?;
        Ok(Self::from_list(registry, self.list.replace(index, node)))
    }

    pub fn list(&self) -> &SeparatedSyntaxList {
        &self.list
    }

    pub fn into_list(self) -> SeparatedSyntaxList {
        self.list
    }

    fn wrap(&self, node: &SyntaxNode) -> T {
        match &self.registry {
            Some(registry) => T::from_wrapped(Wrapped::bind_unchecked(registry, node.clone())),
            // Non-empty lists always carry a registry.
            None => T::default(),
        }
    }

    fn adopt_registry(&self, items: &[T]) -> Option<LightupRegistry> {
        self.registry
            .clone()
            .or_else(|| items.iter().find_map(|item| item.registry().cloned()))
    }
}

fn element_node<T: SyntaxWrapper>(item: T) -> Result<SyntaxNode> {
    item.into_node()
        .ok_or_else(|| LightupError::invalid_cast(NULL_NODE, T::WRAPPED_TYPE_NAME))
}

impl<T: SyntaxWrapper> Default for SeparatedSyntaxListWrapper<T> {
    fn default() -> Self {
        Self::unsupported()
    }
}

impl<T: SyntaxWrapper> Clone for SeparatedSyntaxListWrapper<T> {
    fn clone(&self) -> Self {
        Self::from_list(self.registry.clone(), self.list.clone())
    }
}

impl<T: SyntaxWrapper> PartialEq for SeparatedSyntaxListWrapper<T> {
    fn eq(&self, other: &Self) -> bool {
        self.list == other.list
    }
}

impl<T: SyntaxWrapper> fmt::Debug for SeparatedSyntaxListWrapper<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeparatedSyntaxListWrapper")
            .field("element", &T::WRAPPED_TYPE_NAME)
            .field("nodes", &self.list.nodes())
            .field("separators", &self.list.separators())
            .finish()
    }
}
