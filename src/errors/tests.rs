//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use pretty_assertions::assert_eq;

use crate::errors::errors::{Diagnostic, Error, ErrorImpl, ErrorPhase, ErrorTip};
use crate::{LineIndex, Position};
use std::rc::Rc;

fn at(offset: u32) -> Position {
    Position(offset, Rc::new("test.rad".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        at(10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 10);
    assert_eq!(error.get_position().1.as_str(), "test.rad");
}

#[test]
fn test_error_phases() {
    let lex = Error::new(ErrorImpl::UnterminatedString, at(0));
    let parse = Error::new(
        ErrorImpl::ExpectedStatement {
            token: ")".to_string(),
        },
        at(0),
    );
    let scope = Error::new(
        ErrorImpl::UnresolvedIdentifier {
            identifier: "x".to_string(),
        },
        at(0),
    );

    assert_eq!(lex.phase(), ErrorPhase::Lex);
    assert_eq!(parse.phase(), ErrorPhase::Parse);
    assert_eq!(scope.phase(), ErrorPhase::Scope);
}

#[test]
fn test_duplicate_declaration_error() {
    let error = Error::new(
        ErrorImpl::DuplicateDeclaration {
            function: "main".to_string(),
        },
        at(0),
    );

    assert_eq!(error.get_error_name(), "DuplicateDeclaration");
    assert_eq!(error.to_string(), "function \"main\" already declared");
}

#[test]
fn test_unresolved_identifier_error() {
    let error = Error::new(
        ErrorImpl::UnresolvedIdentifier {
            identifier: "foo".to_string(),
        },
        at(0),
    );

    assert_eq!(error.get_error_name(), "UnresolvedIdentifier");
    assert_eq!(error.to_string(), "no variable named \"foo\" accessible");
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        at(0),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "}".to_string(),
        },
        at(0),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert_eq!(tip, "Unexpected token: `}`"),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_expected_statement_message() {
    let error = Error::new(
        ErrorImpl::ExpectedStatement {
            token: ")".to_string(),
        },
        at(0),
    );

    assert_eq!(
        error.to_string(),
        "expected statement, function declaration or }, found \")\""
    );
}

#[test]
fn test_to_diagnostic() {
    let index = LineIndex::new("x = 1\n  y = @\n");
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        at(12),
    );

    let diagnostic = error.to_diagnostic(&index);
    assert_eq!(
        diagnostic,
        Diagnostic {
            line: 2,
            column: 7,
            message: "unrecognised token: \"@\"".to_string(),
            phase: ErrorPhase::Lex,
        }
    );
    assert_eq!(diagnostic.to_string(), "2:7 lexer error: unrecognised token: \"@\"");
}

#[test]
fn test_nesting_too_deep_error() {
    let error = Error::new(ErrorImpl::NestingTooDeep { limit: 128 }, at(3));

    assert_eq!(error.get_error_name(), "NestingTooDeep");
    assert_eq!(error.phase(), ErrorPhase::Parse);
    assert_eq!(error.to_string(), "nesting deeper than 128 levels");
}
