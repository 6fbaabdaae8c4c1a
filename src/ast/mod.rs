/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The statement and expression sum types and structural equality
/// - expressions: Definitions for the expression node kinds
/// - statements: Definitions for statements, function bodies and declarations
/// - printer: Canonical source printer
pub mod ast;
pub mod expressions;
pub mod printer;
pub mod statements;
