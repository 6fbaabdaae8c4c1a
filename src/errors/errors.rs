use std::fmt::Display;

use thiserror::Error;

use crate::{LineIndex, Position};

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::MalformedNumber { .. } => "MalformedNumber",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::UnexpectedEndOfInput { .. } => "UnexpectedEndOfInput",
            ErrorImpl::ExpectedStatement { .. } => "ExpectedStatement",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
            ErrorImpl::DuplicateDeclaration { .. } => "DuplicateDeclaration",
            ErrorImpl::UnresolvedIdentifier { .. } => "UnresolvedIdentifier",
            ErrorImpl::FunctionReassigned { .. } => "FunctionReassigned",
        }
    }

    pub fn phase(&self) -> ErrorPhase {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnterminatedString
            | ErrorImpl::MalformedNumber { .. }
            | ErrorImpl::NumberParseError { .. } => ErrorPhase::Lex,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::UnexpectedEndOfInput { .. }
            | ErrorImpl::ExpectedStatement { .. }
            | ErrorImpl::NestingTooDeep { .. } => ErrorPhase::Parse,
            ErrorImpl::DuplicateDeclaration { .. }
            | ErrorImpl::UnresolvedIdentifier { .. }
            | ErrorImpl::FunctionReassigned { .. } => ErrorPhase::Scope,
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("String literal is missing its closing `\"`"))
            }
            ErrorImpl::MalformedNumber { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, numbers are written as `digits` or `digits.digits`",
                token
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", token))
            }
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::UnexpectedEndOfInput { expected } => {
                ErrorTip::Suggestion(format!("Input ended while expecting {}", expected))
            }
            ErrorImpl::ExpectedStatement { .. } => ErrorTip::Suggestion(String::from(
                "Expected statement, function declaration or }",
            )),
            ErrorImpl::NestingTooDeep { limit } => ErrorTip::Suggestion(format!(
                "Nesting is limited to {} levels, move the inner part into a function or variable",
                limit
            )),
            ErrorImpl::DuplicateDeclaration { function } => ErrorTip::Suggestion(format!(
                "Function `{}` already declared in this scope",
                function
            )),
            ErrorImpl::UnresolvedIdentifier { identifier } => ErrorTip::Suggestion(format!(
                "Identifier `{}` is not declared in any enclosing scope",
                identifier
            )),
            ErrorImpl::FunctionReassigned { function } => ErrorTip::Suggestion(format!(
                "`{}` is a function and cannot be assigned to",
                function
            )),
        }
    }

    /// Projects this error onto a line/column pair of its source text.
    pub fn to_diagnostic(&self, line_index: &LineIndex) -> Diagnostic {
        let position = line_index.text_position(self.position.0);

        Diagnostic {
            line: position.line,
            column: position.column,
            message: self.internal_error.to_string(),
            phase: self.phase(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// The pass that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPhase {
    Lex,
    Parse,
    Scope,
}

impl Display for ErrorPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorPhase::Lex => write!(f, "lexer error"),
            ErrorPhase::Parse => write!(f, "syntax error"),
            ErrorPhase::Scope => write!(f, "scope error"),
        }
    }
}

/// A (line, column, message) triple ready to show to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub column: usize,
    pub message: String,
    pub phase: ErrorPhase,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} {}: {}", self.line, self.column, self.phase, self.message)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("malformed number: {token:?}")]
    MalformedNumber { token: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEndOfInput { expected: String },
    #[error("expected statement, function declaration or }}, found {token:?}")]
    ExpectedStatement { token: String },
    #[error("nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
    #[error("function {function:?} already declared")]
    DuplicateDeclaration { function: String },
    #[error("no variable named {identifier:?} accessible")]
    UnresolvedIdentifier { identifier: String },
    #[error("an identifier with the name {function:?} already exists as a function")]
    FunctionReassigned { function: String },
}
