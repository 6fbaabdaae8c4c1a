//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree. It uses precedence climbing for expressions
//! over the tiers of the operator table and handles:
//!
//! - Function declarations, named and anonymous
//! - Statements (assignments, if-statements, bare expressions)
//! - Expressions (binary ops, member access, calls, literals)
//! - Error recovery and reporting
//!
//! Errors never abort the parse. Each failing item consumes at least one
//! token, so parsing always terminates with a tree.

pub mod expr;
pub mod parser;
pub mod stmt;
