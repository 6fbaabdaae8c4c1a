//! Error types and error handling for the front end.
//!
//! This module defines the error types used by every pass. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for the lex, parse and scope phases
//! - Line/column diagnostics derived from a `LineIndex`
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
