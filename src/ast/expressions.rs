use crate::{lexer::operators::Precedence, Span};

use super::ast::Expr;

// LITERALS

/// Literal value of a constant expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Int(i64),
    Double(f64),
    /// Decoded text, escapes already applied.
    String(String),
}

/// Constant Expression
/// Represents an integer, double or string literal in the AST.
#[derive(Debug, Clone)]
pub struct ConstantExpr {
    pub value: Constant,
    pub span: Span,
}

/// Symbol Expression
/// Represents an identifier in the AST. This includes function names.
#[derive(Debug, Clone)]
pub struct SymbolExpr {
    pub value: String,
    pub span: Span,
}

// COMPLEX

/// Binary Expression
/// Two operands joined by an operator; member access (`a.b`) included.
#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: String,
    pub precedence: Precedence,
    pub right: Box<Expr>,
    pub span: Span,
}

impl BinaryExpr {
    pub fn is_member_access(&self) -> bool {
        self.precedence == Precedence::Member
    }

    pub fn is_assignment(&self) -> bool {
        self.precedence == Precedence::Assignment
    }
}

/// Call Expression
/// An identifier immediately followed by a parenthesised argument list.
#[derive(Debug, Clone)]
pub struct CallExpr {
    pub callee: SymbolExpr,
    pub arguments: Vec<Expr>,
    pub span: Span,
}
