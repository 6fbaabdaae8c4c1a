//! Scope checking module.
//!
//! This module performs the semantic pass over the AST. It does not
//! transform the tree; it only reports:
//!
//! - Functions declared twice in the same body
//! - Identifiers that do not resolve to a visible variable, parameter
//!   or function
//! - Assignments to a name that is bound as a function
//!
//! The checker maintains an environment stack: one environment per
//! function body and per if-body, searched innermost to outermost.

pub mod scope_checker;

#[cfg(test)]
mod tests;
