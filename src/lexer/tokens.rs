use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

use super::operators::Precedence;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, Keyword> = {
        let mut map = HashMap::new();
        map.insert("if", Keyword::If);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Keyword {
    If,
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::If => "if",
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum TokenKind {
    Int(i64),
    Double(f64),
    /// Decoded string contents, escapes already applied.
    String(String),
    Identifier(String),
    Keyword(Keyword),
    Operator {
        lexeme: String,
        precedence: Precedence,
    },
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Int(value) => write!(f, "{}", value),
            TokenKind::Double(value) => write!(f, "{:?}", value),
            TokenKind::String(value) => write!(f, "{:?}", value),
            TokenKind::Identifier(name) => write!(f, "{}", name),
            TokenKind::Keyword(keyword) => write!(f, "{}", keyword.as_str()),
            TokenKind::Operator { lexeme, .. } => write!(f, "{}", lexeme),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl Token {
    pub fn is_operator(&self, expected: &str) -> bool {
        matches!(&self.kind, TokenKind::Operator { lexeme, .. } if lexeme == expected)
    }

    pub fn is_keyword(&self, expected: Keyword) -> bool {
        self.kind == TokenKind::Keyword(expected)
    }

    pub fn identifier(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// The operator's tier if it can join two operands.
    pub fn binary_precedence(&self) -> Option<Precedence> {
        match &self.kind {
            TokenKind::Operator { precedence, .. } if precedence.is_binary() => Some(*precedence),
            _ => None,
        }
    }

    /// Length of the lexeme in the source, in bytes.
    pub fn len(&self) -> u32 {
        self.span.len()
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }
}
