use crate::Span;

use super::{
    expressions::{BinaryExpr, CallExpr, Constant, ConstantExpr, SymbolExpr},
    statements::{AssignmentStmt, ExpressionStmt, FnDeclStmt, FunctionBody, IfStmt},
};

/// Statement
///
/// Closed set of statement kinds; consumers match exhaustively.
#[derive(Debug, Clone)]
pub enum Stmt {
    Assignment(AssignmentStmt),
    If(IfStmt),
    Expression(ExpressionStmt),
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Assignment(assignment) => &assignment.span,
            Stmt::If(if_stmt) => &if_stmt.span,
            Stmt::Expression(expression) => &expression.span,
        }
    }
}

/// Expression
#[derive(Debug, Clone)]
pub enum Expr {
    Binary(BinaryExpr),
    Symbol(SymbolExpr),
    Constant(ConstantExpr),
    Call(CallExpr),
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Binary(binary) => &binary.span,
            Expr::Symbol(symbol) => &symbol.span,
            Expr::Constant(constant) => &constant.span,
            Expr::Call(call) => &call.span,
        }
    }
}

/// Tree equality that ignores spans.
///
/// Two trees are structurally equal when they would print to the same
/// canonical source, wherever their nodes came from.
pub trait StructuralEq {
    fn structurally_eq(&self, other: &Self) -> bool;
}

impl<T: StructuralEq> StructuralEq for Vec<T> {
    fn structurally_eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(left, right)| left.structurally_eq(right))
    }
}

impl StructuralEq for SymbolExpr {
    fn structurally_eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl StructuralEq for Expr {
    fn structurally_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Expr::Binary(left), Expr::Binary(right)) => {
                left.operator == right.operator
                    && left.left.structurally_eq(&right.left)
                    && left.right.structurally_eq(&right.right)
            }
            (Expr::Symbol(left), Expr::Symbol(right)) => left.structurally_eq(right),
            (Expr::Constant(left), Expr::Constant(right)) => match (&left.value, &right.value) {
                (Constant::Int(left), Constant::Int(right)) => left == right,
                (Constant::Double(left), Constant::Double(right)) => left == right,
                (Constant::String(left), Constant::String(right)) => left == right,
                _ => false,
            },
            (Expr::Call(left), Expr::Call(right)) => {
                left.callee.structurally_eq(&right.callee)
                    && left.arguments.structurally_eq(&right.arguments)
            }
            _ => false,
        }
    }
}

impl StructuralEq for Stmt {
    fn structurally_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Stmt::Assignment(left), Stmt::Assignment(right)) => {
                left.identifier.structurally_eq(&right.identifier)
                    && left.value.structurally_eq(&right.value)
            }
            (Stmt::If(left), Stmt::If(right)) => {
                left.condition.structurally_eq(&right.condition)
                    && left.body.structurally_eq(&right.body)
            }
            (Stmt::Expression(left), Stmt::Expression(right)) => {
                left.expression.structurally_eq(&right.expression)
            }
            _ => false,
        }
    }
}

impl StructuralEq for FnDeclStmt {
    fn structurally_eq(&self, other: &Self) -> bool {
        // Generated names depend on where the declaration sat in the source
        let same_name = self.anonymous || self.identifier == other.identifier;

        same_name
            && self.anonymous == other.anonymous
            && self.parameters.structurally_eq(&other.parameters)
            && self.body.structurally_eq(&other.body)
    }
}

impl StructuralEq for FunctionBody {
    fn structurally_eq(&self, other: &Self) -> bool {
        self.functions.structurally_eq(&other.functions)
            && self.statements.structurally_eq(&other.statements)
    }
}
