//! Node lists.
//!
//! Both list types are immutable; every modifying operation returns a new
//! list and leaves the receiver untouched.

use crate::error::{Result, SyntaxError};
use crate::node::SyntaxNode;
use crate::token::{SyntaxKind, SyntaxToken};
use std::sync::Arc;

/// Plain ordered list of nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyntaxList {
    nodes: Arc<[SyntaxNode]>,
}

impl SyntaxList {
    pub fn new(nodes: Vec<SyntaxNode>) -> Self {
        Self {
            nodes: nodes.into(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SyntaxNode> {
        self.nodes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SyntaxNode> {
        self.nodes.iter()
    }

    pub fn as_slice(&self) -> &[SyntaxNode] {
        &self.nodes
    }

    pub fn add(&self, node: SyntaxNode) -> Self {
        self.add_range(std::iter::once(node))
    }

    pub fn add_range(&self, nodes: impl IntoIterator<Item = SyntaxNode>) -> Self {
        let mut all = self.nodes.to_vec();
        all.extend(nodes);
        Self::new(all)
    }
}

impl FromIterator<SyntaxNode> for SyntaxList {
    fn from_iter<I: IntoIterator<Item = SyntaxNode>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Ordered list of nodes with interleaved separator tokens.
///
/// A non-empty list holds either `len - 1` separators or, when it ends in a
/// trailing separator, `len` separators. An empty list holds none.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeparatedSyntaxList {
    nodes: Arc<[SyntaxNode]>,
    separators: Arc<[SyntaxToken]>,
}

impl SeparatedSyntaxList {
    /// Build a list from explicit nodes and separators.
    pub fn new(nodes: Vec<SyntaxNode>, separators: Vec<SyntaxToken>) -> Result<Self> {
        let valid = if nodes.is_empty() {
            separators.is_empty()
        } else {
            separators.len() + 1 == nodes.len() || separators.len() == nodes.len()
        };
        if !valid {
            return Err(SyntaxError::SeparatorCount {
                nodes: nodes.len(),
                separators: separators.len(),
            });
        }
        Ok(Self {
            nodes: nodes.into(),
            separators: separators.into(),
        })
    }

    /// Build a comma-separated list.
    pub fn from_nodes(nodes: Vec<SyntaxNode>) -> Self {
        let separators = (1..nodes.len()).map(|_| comma()).collect::<Vec<_>>();
        Self {
            nodes: nodes.into(),
            separators: separators.into(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn separator_count(&self) -> usize {
        self.separators.len()
    }

    pub fn has_trailing_separator(&self) -> bool {
        !self.nodes.is_empty() && self.separators.len() == self.nodes.len()
    }

    pub fn get(&self, index: usize) -> Option<&SyntaxNode> {
        self.nodes.get(index)
    }

    pub fn separator(&self, index: usize) -> Option<&SyntaxToken> {
        self.separators.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SyntaxNode> {
        self.nodes.iter()
    }

    pub fn nodes(&self) -> &[SyntaxNode] {
        &self.nodes
    }

    pub fn separators(&self) -> &[SyntaxToken] {
        &self.separators
    }

    pub fn add(&self, node: SyntaxNode) -> Self {
        self.insert_range(self.len(), vec![node])
    }

    pub fn add_range(&self, nodes: Vec<SyntaxNode>) -> Self {
        self.insert_range(self.len(), nodes)
    }

    pub fn insert(&self, index: usize, node: SyntaxNode) -> Self {
        self.insert_range(index, vec![node])
    }

    /// Insert `inserted` before position `index`.
    ///
    /// Separators between nodes that stay adjacent are kept; every new gap
    /// gets a fresh comma.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_range(&self, index: usize, inserted: Vec<SyntaxNode>) -> Self {
        let old_len = self.nodes.len();
        assert!(
            index <= old_len,
            "insertion index (is {index}) should be <= len (is {old_len})"
        );
        let added = inserted.len();
        if added == 0 {
            return self.clone();
        }

        let mut nodes = Vec::with_capacity(old_len + added);
        nodes.extend_from_slice(&self.nodes[..index]);
        nodes.extend(inserted);
        nodes.extend_from_slice(&self.nodes[index..]);

        let old_separator = |gap: usize| self.separators.get(gap).cloned();
        let gaps = nodes.len() - 1;
        let mut separators = Vec::with_capacity(gaps + 1);
        for gap in 0..gaps {
            let separator = if gap < index {
                // Gap after an old node that precedes the insertion point.
                old_separator(gap)
            } else if gap >= index + added {
                old_separator(gap - added)
            } else {
                None
            };
            separators.push(separator.unwrap_or_else(comma));
        }
        // The old trailing separator was reused for the gap above when
        // appending at the end.
        if self.has_trailing_separator() && index < old_len {
            separators.push(self.separators[old_len - 1].clone());
        }

        Self {
            nodes: nodes.into(),
            separators: separators.into(),
        }
    }

    /// Remove the node at `index` together with one adjacent separator.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove_at(&self, index: usize) -> Self {
        let len = self.nodes.len();
        assert!(index < len, "removal index (is {index}) should be < len (is {len})");

        let mut nodes = self.nodes.to_vec();
        nodes.remove(index);
        let mut separators = self.separators.to_vec();
        if index < separators.len() {
            separators.remove(index);
        } else if index > 0 {
            separators.remove(index - 1);
        }
        Self {
            nodes: nodes.into(),
            separators: separators.into(),
        }
    }

    /// Replace the node at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn replace(&self, index: usize, node: SyntaxNode) -> Self {
        let mut nodes = self.nodes.to_vec();
        nodes[index] = node;
        Self {
            nodes: nodes.into(),
            separators: self.separators.clone(),
        }
    }

    /// Replace the separator at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= separator_count`.
    pub fn replace_separator(&self, index: usize, separator: SyntaxToken) -> Self {
        let mut separators = self.separators.to_vec();
        separators[index] = separator;
        Self {
            nodes: self.nodes.clone(),
            separators: separators.into(),
        }
    }
}

fn comma() -> SyntaxToken {
    SyntaxToken::of(SyntaxKind::Comma)
}
