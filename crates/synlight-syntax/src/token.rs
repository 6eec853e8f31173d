//! Tokens and token lists.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Kind of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SyntaxKind {
    /// Placeholder for a token the source did not contain.
    None,
    Identifier,
    NumericLiteral,
    StringLiteral,
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    LessThan,
    GreaterThan,
    Comma,
    Semicolon,
    Colon,
    Arrow,
    Underscore,
    AsyncKeyword,
    StaticKeyword,
    UnsafeKeyword,
    ExternKeyword,
    VoidKeyword,
    IntKeyword,
    StringKeyword,
    VarKeyword,
    WhereKeyword,
}

impl SyntaxKind {
    /// Fixed text of punctuation and keyword kinds.
    pub const fn text(self) -> Option<&'static str> {
        Some(match self {
            SyntaxKind::OpenParen => "(",
            SyntaxKind::CloseParen => ")",
            SyntaxKind::OpenBrace => "{",
            SyntaxKind::CloseBrace => "}",
            SyntaxKind::OpenBracket => "[",
            SyntaxKind::CloseBracket => "]",
            SyntaxKind::LessThan => "<",
            SyntaxKind::GreaterThan => ">",
            SyntaxKind::Comma => ",",
            SyntaxKind::Semicolon => ";",
            SyntaxKind::Colon => ":",
            SyntaxKind::Arrow => "=>",
            SyntaxKind::Underscore => "_",
            SyntaxKind::AsyncKeyword => "async",
            SyntaxKind::StaticKeyword => "static",
            SyntaxKind::UnsafeKeyword => "unsafe",
            SyntaxKind::ExternKeyword => "extern",
            SyntaxKind::VoidKeyword => "void",
            SyntaxKind::IntKeyword => "int",
            SyntaxKind::StringKeyword => "string",
            SyntaxKind::VarKeyword => "var",
            SyntaxKind::WhereKeyword => "where",
            SyntaxKind::None
            | SyntaxKind::Identifier
            | SyntaxKind::NumericLiteral
            | SyntaxKind::StringLiteral => return None,
        })
    }

    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            SyntaxKind::AsyncKeyword
                | SyntaxKind::StaticKeyword
                | SyntaxKind::UnsafeKeyword
                | SyntaxKind::ExternKeyword
                | SyntaxKind::VoidKeyword
                | SyntaxKind::IntKeyword
                | SyntaxKind::StringKeyword
                | SyntaxKind::VarKeyword
                | SyntaxKind::WhereKeyword
        )
    }
}

/// A single token. Cheap to clone.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SyntaxToken {
    kind: SyntaxKind,
    text: Arc<str>,
}

impl SyntaxToken {
    pub fn new(kind: SyntaxKind, text: impl Into<Arc<str>>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Token of a punctuation or keyword kind, using the kind's fixed text.
    pub fn of(kind: SyntaxKind) -> Self {
        Self::new(kind, kind.text().unwrap_or(""))
    }

    pub fn identifier(name: &str) -> Self {
        Self::new(SyntaxKind::Identifier, name)
    }

    /// The token the library stores in token slots nobody set.
    pub fn missing() -> Self {
        Self::new(SyntaxKind::None, "")
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        self.kind == SyntaxKind::None
    }
}

impl Default for SyntaxToken {
    fn default() -> Self {
        Self::missing()
    }
}

impl fmt::Display for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Immutable ordered list of tokens (modifier lists and the like).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SyntaxTokenList {
    tokens: Arc<[SyntaxToken]>,
}

impl SyntaxTokenList {
    pub fn new(tokens: Vec<SyntaxToken>) -> Self {
        Self {
            tokens: tokens.into(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SyntaxToken> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SyntaxToken> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[SyntaxToken] {
        &self.tokens
    }

    pub fn contains_kind(&self, kind: SyntaxKind) -> bool {
        self.tokens.iter().any(|t| t.kind() == kind)
    }

    /// A new list with `token` appended.
    pub fn add(&self, token: SyntaxToken) -> Self {
        let mut tokens = self.tokens.to_vec();
        tokens.push(token);
        Self::new(tokens)
    }
}

impl FromIterator<SyntaxToken> for SyntaxTokenList {
    fn from_iter<I: IntoIterator<Item = SyntaxToken>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SyntaxTokenList {
    type Item = &'a SyntaxToken;
    type IntoIter = std::slice::Iter<'a, SyntaxToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
