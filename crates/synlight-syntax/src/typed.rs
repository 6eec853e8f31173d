//! Statically typed views over nodes of stable types.
//!
//! The types named here exist in every library version, so code may refer
//! to them directly. Version-dependent types are only reachable through the
//! lightup wrappers.

use crate::list::{SeparatedSyntaxList, SyntaxList};
use crate::node::SyntaxNode;
use std::fmt;
use std::marker::PhantomData;

/// Marker for a node type that exists in every library version.
pub trait NodeKind: 'static {
    const TYPE_NAME: &'static str;
}

macro_rules! node_kinds {
    ($($(#[$meta:meta])* $name:ident => $type_name:literal,)*) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
            pub enum $name {}

            impl NodeKind for $name {
                const TYPE_NAME: &'static str = $type_name;
            }
        )*
    };
}

node_kinds! {
    /// Root of the node hierarchy.
    CSharpSyntaxNode => "CSharp.Syntax.CSharpSyntaxNode",
    StatementSyntax => "CSharp.Syntax.StatementSyntax",
    ExpressionSyntax => "CSharp.Syntax.ExpressionSyntax",
    TypeSyntax => "CSharp.Syntax.TypeSyntax",
    IdentifierNameSyntax => "CSharp.Syntax.IdentifierNameSyntax",
    PredefinedTypeSyntax => "CSharp.Syntax.PredefinedTypeSyntax",
    LiteralExpressionSyntax => "CSharp.Syntax.LiteralExpressionSyntax",
    BlockSyntax => "CSharp.Syntax.BlockSyntax",
    ExpressionStatementSyntax => "CSharp.Syntax.ExpressionStatementSyntax",
    AttributeListSyntax => "CSharp.Syntax.AttributeListSyntax",
    ParameterSyntax => "CSharp.Syntax.ParameterSyntax",
    ParameterListSyntax => "CSharp.Syntax.ParameterListSyntax",
    TypeParameterSyntax => "CSharp.Syntax.TypeParameterSyntax",
    TypeParameterListSyntax => "CSharp.Syntax.TypeParameterListSyntax",
    TypeParameterConstraintClauseSyntax => "CSharp.Syntax.TypeParameterConstraintClauseSyntax",
    ArrowExpressionClauseSyntax => "CSharp.Syntax.ArrowExpressionClauseSyntax",
}

/// A node known to be of kind `K` or a type derived from it.
pub struct TypedNode<K: NodeKind> {
    node: SyntaxNode,
    _kind: PhantomData<fn() -> K>,
}

impl<K: NodeKind> TypedNode<K> {
    /// Checked narrowing from an untyped node.
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        if !node.syntax_type().derives_from_name(K::TYPE_NAME) {
            return None;
        }
        Some(Self {
            node,
            _kind: PhantomData,
        })
    }

    #[inline]
    pub fn node(&self) -> &SyntaxNode {
        &self.node
    }

    #[inline]
    pub fn into_node(self) -> SyntaxNode {
        self.node
    }
}

impl<K: NodeKind> Clone for TypedNode<K> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K: NodeKind> PartialEq for TypedNode<K> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<K: NodeKind> Eq for TypedNode<K> {}

impl<K: NodeKind> fmt::Debug for TypedNode<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.node, f)
    }
}

impl<K: NodeKind> From<TypedNode<K>> for SyntaxNode {
    fn from(typed: TypedNode<K>) -> Self {
        typed.node
    }
}

/// A [`SyntaxList`] whose elements are all of kind `K`.
pub struct TypedNodeList<K: NodeKind> {
    list: SyntaxList,
    _kind: PhantomData<fn() -> K>,
}

impl<K: NodeKind> TypedNodeList<K> {
    pub fn cast(list: SyntaxList) -> Option<Self> {
        let matches = list
            .iter()
            .all(|n| n.syntax_type().derives_from_name(K::TYPE_NAME));
        if !matches {
            return None;
        }
        Some(Self {
            list,
            _kind: PhantomData,
        })
    }

    pub fn empty() -> Self {
        Self {
            list: SyntaxList::empty(),
            _kind: PhantomData,
        }
    }

    pub fn from_nodes(nodes: impl IntoIterator<Item = TypedNode<K>>) -> Self {
        Self {
            list: nodes.into_iter().map(TypedNode::into_node).collect(),
            _kind: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// A new list with `nodes` appended.
    pub fn add_range(&self, nodes: impl IntoIterator<Item = TypedNode<K>>) -> Self {
        Self {
            list: self.list.add_range(nodes.into_iter().map(TypedNode::into_node)),
            _kind: PhantomData,
        }
    }

    pub fn list(&self) -> &SyntaxList {
        &self.list
    }

    pub fn into_list(self) -> SyntaxList {
        self.list
    }
}

impl<K: NodeKind> Clone for TypedNodeList<K> {
    fn clone(&self) -> Self {
        Self {
            list: self.list.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K: NodeKind> PartialEq for TypedNodeList<K> {
    fn eq(&self, other: &Self) -> bool {
        self.list == other.list
    }
}

impl<K: NodeKind> fmt::Debug for TypedNodeList<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.list, f)
    }
}

/// A [`SeparatedSyntaxList`] whose elements are all of kind `K`.
pub struct TypedSeparatedList<K: NodeKind> {
    list: SeparatedSyntaxList,
    _kind: PhantomData<fn() -> K>,
}

impl<K: NodeKind> TypedSeparatedList<K> {
    pub fn cast(list: SeparatedSyntaxList) -> Option<Self> {
        let matches = list
            .iter()
            .all(|n| n.syntax_type().derives_from_name(K::TYPE_NAME));
        if !matches {
            return None;
        }
        Some(Self {
            list,
            _kind: PhantomData,
        })
    }

    pub fn from_nodes(nodes: impl IntoIterator<Item = TypedNode<K>>) -> Self {
        let nodes = nodes.into_iter().map(TypedNode::into_node).collect();
        Self {
            list: SeparatedSyntaxList::from_nodes(nodes),
            _kind: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn list(&self) -> &SeparatedSyntaxList {
        &self.list
    }

    pub fn into_list(self) -> SeparatedSyntaxList {
        self.list
    }
}

impl<K: NodeKind> Clone for TypedSeparatedList<K> {
    fn clone(&self) -> Self {
        Self {
            list: self.list.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K: NodeKind> PartialEq for TypedSeparatedList<K> {
    fn eq(&self, other: &Self) -> bool {
        self.list == other.list
    }
}

impl<K: NodeKind> fmt::Debug for TypedSeparatedList<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.list, f)
    }
}
