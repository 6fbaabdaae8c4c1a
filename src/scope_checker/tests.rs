//! Unit tests for the scope checker.
//!
//! This module contains tests for:
//! - Identifier resolution through nested environments
//! - Function hoisting and duplicate declarations
//! - Parameters, member access and nested assignments
//! - Isolation between sibling functions

use std::rc::Rc;

use pretty_assertions::assert_eq;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
    parser::parser::parse,
};

use super::scope_checker::{scope_check, Binding, ScopeChecker};

fn check(source: &str) -> (ScopeChecker, Vec<Error>) {
    let (tokens, lex_errors) = tokenize(source.to_string(), Some("test.rad".to_string()));
    assert!(lex_errors.is_empty(), "unexpected lex errors: {:?}", lex_errors);

    let (ast, parse_errors) = parse(tokens, Rc::new("test.rad".to_string()));
    assert!(parse_errors.is_empty(), "unexpected parse errors: {:?}", parse_errors);

    scope_check(&ast)
}

fn error_kinds(source: &str) -> Vec<ErrorImpl> {
    let (_, errors) = check(source);
    errors.iter().map(|error| error.get_internal_error().clone()).collect()
}

fn unresolved(identifier: &str) -> ErrorImpl {
    ErrorImpl::UnresolvedIdentifier {
        identifier: identifier.to_string(),
    }
}

#[test]
fn test_unassigned_variable_is_unresolved() {
    let (_, errors) = check("y = x");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_internal_error(), &unresolved("x"));
    assert_eq!(errors[0].get_position().0, 4);
}

#[test]
fn test_assigned_variable_resolves() {
    assert!(error_kinds("x = 1 y = x").is_empty());
}

#[test]
fn test_duplicate_sibling_functions() {
    let (_, errors) = check("g { } g { }");
    assert_eq!(
        errors.iter().map(|error| error.get_internal_error().clone()).collect::<Vec<_>>(),
        vec![ErrorImpl::DuplicateDeclaration {
            function: "g".to_string()
        }]
    );
    assert_eq!(errors[0].get_position().0, 6);
}

#[test]
fn test_same_name_in_different_bodies_is_not_a_duplicate() {
    assert!(error_kinds("f { g { } } g { }").is_empty());
    assert!(error_kinds("f { } g { f { } }").is_empty());
}

#[test]
fn test_sibling_functions_do_not_share_variables() {
    assert_eq!(error_kinds("f { a = 1 } g { b = a }"), vec![unresolved("a")]);
}

#[test]
fn test_function_variables_are_not_visible_outside() {
    assert_eq!(error_kinds("f { a = 1 } b = a"), vec![unresolved("a")]);
}

#[test]
fn test_parameters_resolve_inside_the_body() {
    assert!(error_kinds("f(a, b) { c = a + b }").is_empty());
    assert_eq!(error_kinds("f(a) { } y = a"), vec![unresolved("a")]);
}

#[test]
fn test_functions_are_hoisted() {
    assert!(error_kinds("x = f f { }").is_empty());
    assert!(error_kinds("r = compute(1) compute(n) { }").is_empty());
}

#[test]
fn test_nested_function_sees_later_assignments_of_enclosing_body() {
    assert!(error_kinds("outer { inner { y = x } x = 1 }").is_empty());
}

#[test]
fn test_assigning_to_a_function_name() {
    assert_eq!(
        error_kinds("f { } f = 1"),
        vec![ErrorImpl::FunctionReassigned {
            function: "f".to_string()
        }]
    );
    assert_eq!(
        error_kinds("f { } g { f = 1 }"),
        vec![ErrorImpl::FunctionReassigned {
            function: "f".to_string()
        }]
    );
}

#[test]
fn test_member_name_is_not_resolved() {
    assert!(error_kinds("o = 1 y = o.field").is_empty());
    assert_eq!(error_kinds("y = o.field.other"), vec![unresolved("o")]);
}

#[test]
fn test_if_body_has_its_own_environment() {
    assert!(error_kinds("c = 1 if c { d = c }").is_empty());
    assert_eq!(error_kinds("c = 1 if c { t = 2 } u = t"), vec![unresolved("t")]);
}

#[test]
fn test_if_body_assigns_to_visible_variable() {
    let (checker, errors) = check("c = 1 if c { c = 2 }");
    assert!(errors.is_empty());

    let root = checker.root_environment().expect("root environment");
    assert_eq!(root.variables.len(), 1);
    assert_eq!(checker.lookup("c"), Some(Binding::Variable));
}

#[test]
fn test_nested_assignment_expression_binds() {
    assert!(error_kinds("x = (y = 2) + y").is_empty());
    assert!(error_kinds("a = b = 1 c = a + b").is_empty());
}

#[test]
fn test_assignment_value_is_checked_before_binding() {
    assert_eq!(error_kinds("a = a + 1"), vec![unresolved("a")]);
}

#[test]
fn test_compound_assignment_requires_a_binding() {
    assert_eq!(error_kinds("z += 1"), vec![unresolved("z")]);
    assert!(error_kinds("z = 0 z += 1").is_empty());
}

#[test]
fn test_calls_resolve_callee_and_arguments() {
    assert_eq!(error_kinds("print(1)"), vec![unresolved("print")]);
    assert_eq!(error_kinds("f(a) { } f(q)"), vec![unresolved("q")]);
    assert!(error_kinds("x = 1 f(a) { } f(x)").is_empty());
}

#[test]
fn test_errors_are_reported_in_order() {
    assert_eq!(error_kinds("y = a + b"), vec![unresolved("a"), unresolved("b")]);
}

#[test]
fn test_root_environment_remains_after_check() {
    let (checker, _) = check("x = 1 f { }");
    let root = checker.root_environment().expect("root environment");
    assert!(root.variables.contains("x"));
    assert!(root.functions.contains_key("f"));
    assert_eq!(checker.environments.len(), 1);
}
