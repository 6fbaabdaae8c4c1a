//! Lexical analysis module for the front end.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using anchored regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Greedy operator matching and the operator precedence table
//! - Token position tracking for error reporting
//! - Best-effort recovery: errors are collected and lexing continues

pub mod lexer;
pub mod operators;
pub mod tokens;
