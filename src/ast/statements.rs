use std::slice::Iter;

use crate::Span;

use super::{
    ast::{Expr, Stmt},
    expressions::SymbolExpr,
};

/// The contents of a `{ ... }` block: nested function declarations and
/// statements. Statement order is execution order; the two lists are not
/// ordered relative to each other.
#[derive(Debug, Clone)]
pub struct FunctionBody {
    pub functions: Vec<FnDeclStmt>,
    pub statements: Vec<Stmt>,
    pub span: Span,
}

impl FunctionBody {
    pub fn new(span: Span) -> Self {
        FunctionBody {
            functions: vec![],
            statements: vec![],
            span,
        }
    }

    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.statements.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.statements.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
}

/// `identifier = value`
#[derive(Debug, Clone)]
pub struct AssignmentStmt {
    pub identifier: SymbolExpr,
    pub value: Expr,
    pub span: Span,
}

/// `if condition { body }`
#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: Expr,
    pub body: FunctionBody,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FnDeclStmt {
    /// Explicit name, or `anonymous_N` when `anonymous` is set.
    pub identifier: String,
    pub anonymous: bool,
    pub parameters: Vec<SymbolExpr>,
    pub body: FunctionBody,
    pub span: Span,
}

impl FnDeclStmt {
    pub fn parameter_names(&self) -> Vec<&str> {
        self.parameters
            .iter()
            .map(|parameter| parameter.value.as_str())
            .collect()
    }
}
