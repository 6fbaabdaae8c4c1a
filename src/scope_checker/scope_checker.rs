use std::collections::{HashMap, HashSet};

use crate::{
    ast::{
        ast::{Expr, Stmt},
        expressions::{BinaryExpr, SymbolExpr},
        statements::{FnDeclStmt, FunctionBody},
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// What a visible name is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Variable,
    Function,
}

/// Names introduced by one function body or if-body.
#[derive(Debug, Default)]
pub struct Environment {
    /// Parameters and assigned variables
    pub variables: HashSet<String>,
    /// Declared functions and where they were declared
    pub functions: HashMap<String, Position>,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    pub fn with_parameters(parameters: &[SymbolExpr]) -> Self {
        Environment {
            variables: parameters.iter().map(|parameter| parameter.value.clone()).collect(),
            functions: HashMap::new(),
        }
    }

    pub fn declare_function(&mut self, function_name: String, current_position: Position) -> Result<(), Error> {
        if self.functions.contains_key(&function_name) {
            Err(Error::new(
                ErrorImpl::DuplicateDeclaration { function: function_name },
                current_position,
            ))
        } else {
            self.functions.insert(function_name, current_position);
            Ok(())
        }
    }

    pub fn declare_variable(&mut self, variable_name: String) {
        self.variables.insert(variable_name);
    }

    pub fn get_binding(&self, name: &str) -> Option<Binding> {
        if self.variables.contains(name) {
            Some(Binding::Variable)
        } else if self.functions.contains_key(name) {
            Some(Binding::Function)
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
pub struct ScopeChecker {
    /// Innermost environment last. After `scope_check` only the root remains.
    pub environments: Vec<Environment>,
    errors: Vec<Error>,
}

impl ScopeChecker {
    pub fn new() -> Self {
        ScopeChecker::default()
    }

    /// Resolves `name` innermost to outermost.
    pub fn lookup(&self, name: &str) -> Option<Binding> {
        self.environments
            .iter()
            .rev()
            .find_map(|environment| environment.get_binding(name))
    }

    pub fn root_environment(&self) -> Option<&Environment> {
        self.environments.first()
    }

    fn report(&mut self, error: Error) {
        self.errors.push(error);
    }

    /// Binds an assignment target in the innermost environment unless the
    /// name is already visible.
    fn assign(&mut self, target: &SymbolExpr) {
        match self.lookup(&target.value) {
            Some(Binding::Variable) => {}
            Some(Binding::Function) => self.report(Error::new(
                ErrorImpl::FunctionReassigned {
                    function: target.value.clone(),
                },
                target.span.start.clone(),
            )),
            None => {
                if let Some(environment) = self.environments.last_mut() {
                    environment.declare_variable(target.value.clone());
                }
            }
        }
    }

    fn resolve(&mut self, symbol: &SymbolExpr) {
        if self.lookup(&symbol.value).is_none() {
            self.report(Error::new(
                ErrorImpl::UnresolvedIdentifier {
                    identifier: symbol.value.clone(),
                },
                symbol.span.start.clone(),
            ));
        }
    }
}

pub fn scope_check_expr(scope_checker: &mut ScopeChecker, expr: &Expr) {
    match expr {
        Expr::Constant(_) => {}
        Expr::Symbol(symbol) => scope_checker.resolve(symbol),
        Expr::Call(call) => {
            scope_checker.resolve(&call.callee);
            for argument in &call.arguments {
                scope_check_expr(scope_checker, argument);
            }
        }
        Expr::Binary(binary) => scope_check_binary_expr(scope_checker, binary),
    }
}

fn scope_check_binary_expr(scope_checker: &mut ScopeChecker, binary: &BinaryExpr) {
    if binary.is_member_access() {
        // The right operand names a member, not a variable
        scope_check_expr(scope_checker, &binary.left);
        return;
    }

    if binary.operator == "=" {
        if let Expr::Symbol(target) = binary.left.as_ref() {
            scope_check_expr(scope_checker, &binary.right);
            scope_checker.assign(target);
            return;
        }
    }

    scope_check_expr(scope_checker, &binary.left);
    scope_check_expr(scope_checker, &binary.right);
}

pub fn scope_check_stmt(scope_checker: &mut ScopeChecker, stmt: &Stmt) {
    match stmt {
        Stmt::Assignment(assignment) => {
            scope_check_expr(scope_checker, &assignment.value);
            scope_checker.assign(&assignment.identifier);
        }
        Stmt::If(if_stmt) => {
            scope_check_expr(scope_checker, &if_stmt.condition);

            scope_checker.environments.push(Environment::new());
            scope_check_function_body(scope_checker, &if_stmt.body);
            scope_checker.environments.pop();
        }
        Stmt::Expression(expression) => scope_check_expr(scope_checker, &expression.expression),
    }
}

pub fn scope_check_fn_decl(scope_checker: &mut ScopeChecker, function: &FnDeclStmt) {
    scope_checker
        .environments
        .push(Environment::with_parameters(&function.parameters));
    scope_check_function_body(scope_checker, &function.body);
    scope_checker.environments.pop();
}

/// Checks `body` inside the environment the caller pushed for it.
///
/// Declarations are registered before any statement is checked, and nested
/// bodies are checked last so they see every variable the body assigns.
pub fn scope_check_function_body(scope_checker: &mut ScopeChecker, body: &FunctionBody) {
    for function in &body.functions {
        let declared = match scope_checker.environments.last_mut() {
            Some(environment) => {
                environment.declare_function(function.identifier.clone(), function.span.start.clone())
            }
            None => Ok(()),
        };

        if let Err(error) = declared {
            scope_checker.report(error);
        }
    }

    for stmt in body.iter() {
        scope_check_stmt(scope_checker, stmt);
    }

    for function in &body.functions {
        scope_check_fn_decl(scope_checker, function);
    }
}

/// Runs the scope checker over a parsed tree.
///
/// # Returns
///
/// The checker, holding the root environment, and every scope error in the
/// order found.
pub fn scope_check(ast: &FunctionBody) -> (ScopeChecker, Vec<Error>) {
    let mut scope_checker = ScopeChecker::new();

    scope_checker.environments.push(Environment::new());
    scope_check_function_body(&mut scope_checker, ast);

    let errors = std::mem::take(&mut scope_checker.errors);
    (scope_checker, errors)
}
