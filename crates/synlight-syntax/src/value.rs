//! Slot values.

use crate::list::{SeparatedSyntaxList, SyntaxList};
use crate::metadata::ValueType;
use crate::node::SyntaxNode;
use crate::token::{SyntaxToken, SyntaxTokenList};

/// Run-time value of one property slot.
///
/// Node slots are nullable: `Node(None)` is a present property that holds
/// no child, which is different from the property not existing at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyntaxValue {
    Token(SyntaxToken),
    TokenList(SyntaxTokenList),
    Node(Option<SyntaxNode>),
    NodeList(SyntaxList),
    SeparatedList(SeparatedSyntaxList),
}

impl SyntaxValue {
    /// Value stored in slots the node factory was not given.
    pub fn default_for(value_type: &ValueType) -> Self {
        match value_type {
            ValueType::Token => SyntaxValue::Token(SyntaxToken::missing()),
            ValueType::TokenList => SyntaxValue::TokenList(SyntaxTokenList::empty()),
            ValueType::Node(_) => SyntaxValue::Node(None),
            ValueType::NodeList(_) => SyntaxValue::NodeList(SyntaxList::empty()),
            ValueType::SeparatedList(_) => SyntaxValue::SeparatedList(SeparatedSyntaxList::empty()),
        }
    }

    /// Whether this value may be stored in a slot declared as `value_type`.
    ///
    /// Node elements must be of the declared element type or derive from it.
    pub fn fits(&self, value_type: &ValueType) -> bool {
        let derives = |node: &SyntaxNode, name: &str| node.syntax_type().derives_from_name(name);
        match (value_type, self) {
            (ValueType::Token, SyntaxValue::Token(_)) => true,
            (ValueType::TokenList, SyntaxValue::TokenList(_)) => true,
            (ValueType::Node(name), SyntaxValue::Node(node)) => {
                node.as_ref().is_none_or(|n| derives(n, name))
            }
            (ValueType::NodeList(name), SyntaxValue::NodeList(list)) => {
                list.iter().all(|n| derives(n, name))
            }
            (ValueType::SeparatedList(name), SyntaxValue::SeparatedList(list)) => {
                list.iter().all(|n| derives(n, name))
            }
            _ => false,
        }
    }

    /// Short description for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            SyntaxValue::Token(_) => "a token".to_string(),
            SyntaxValue::TokenList(_) => "a token list".to_string(),
            SyntaxValue::Node(Some(node)) => format!("node '{}'", node.type_name()),
            SyntaxValue::Node(None) => "a null node".to_string(),
            SyntaxValue::NodeList(_) => "a node list".to_string(),
            SyntaxValue::SeparatedList(_) => "a separated list".to_string(),
        }
    }

    pub fn as_token(&self) -> Option<&SyntaxToken> {
        match self {
            SyntaxValue::Token(token) => Some(token),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&SyntaxNode> {
        match self {
            SyntaxValue::Node(node) => node.as_ref(),
            _ => None,
        }
    }

    /// Child nodes held by this value, in order.
    pub fn child_nodes(&self) -> Vec<SyntaxNode> {
        match self {
            SyntaxValue::Token(_) | SyntaxValue::TokenList(_) => Vec::new(),
            SyntaxValue::Node(node) => node.iter().cloned().collect(),
            SyntaxValue::NodeList(list) => list.iter().cloned().collect(),
            SyntaxValue::SeparatedList(list) => list.iter().cloned().collect(),
        }
    }
}

impl From<SyntaxToken> for SyntaxValue {
    fn from(token: SyntaxToken) -> Self {
        SyntaxValue::Token(token)
    }
}

impl From<SyntaxTokenList> for SyntaxValue {
    fn from(tokens: SyntaxTokenList) -> Self {
        SyntaxValue::TokenList(tokens)
    }
}

impl From<SyntaxNode> for SyntaxValue {
    fn from(node: SyntaxNode) -> Self {
        SyntaxValue::Node(Some(node))
    }
}

impl From<Option<SyntaxNode>> for SyntaxValue {
    fn from(node: Option<SyntaxNode>) -> Self {
        SyntaxValue::Node(node)
    }
}

impl From<SyntaxList> for SyntaxValue {
    fn from(list: SyntaxList) -> Self {
        SyntaxValue::NodeList(list)
    }
}

impl From<SeparatedSyntaxList> for SyntaxValue {
    fn from(list: SeparatedSyntaxList) -> Self {
        SyntaxValue::SeparatedList(list)
    }
}
