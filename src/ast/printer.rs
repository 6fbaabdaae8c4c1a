//! Canonical source printer.
//!
//! Renders an AST back to source text that parses to a structurally equal
//! tree. Binary expressions are fully parenthesised so the printed text does
//! not depend on precedence or associativity. Declarations and statements
//! keep their source order, since a statement followed by `(` or `{` can
//! read differently once its neighbour changes.

use super::{
    ast::{Expr, Stmt},
    expressions::Constant,
    statements::{FnDeclStmt, FunctionBody},
};

const INDENT: &str = "  ";

pub fn print_function_body(body: &FunctionBody) -> String {
    let mut printer = Printer::default();
    printer.function_body(body);
    printer.output
}

pub fn print_expr(expr: &Expr) -> String {
    let mut output = String::new();
    write_expr(&mut output, expr);
    output
}

#[derive(Default)]
struct Printer {
    output: String,
    indent: usize,
}

impl Printer {
    fn line(&mut self, text: &str) {
        self.output.push_str(&INDENT.repeat(self.indent));
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn function_body(&mut self, body: &FunctionBody) {
        let items = source_order(body);

        // How each item's successor begins. Found back to front, since
        // wrapping a statement in parentheses changes how it begins.
        let mut followers = vec![Opening::Other; items.len()];
        let mut next = Opening::Other;
        for (index, item) in items.iter().enumerate().rev() {
            followers[index] = next;
            next = item.opening(next);
        }

        for (item, next) in items.iter().zip(followers) {
            match item {
                Item::Function(function) => self.function(function),
                Item::Stmt(stmt) => self.stmt(stmt, next),
            }
        }
    }

    /// Prints `header {`, the indented body and `}`; `header {}` when empty.
    fn block(&mut self, header: &str, body: &FunctionBody) {
        let open = if header.is_empty() {
            String::from("{")
        } else {
            format!("{} {{", header)
        };

        if body.is_empty() {
            self.line(&format!("{}}}", open));
            return;
        }

        self.line(&open);
        self.indent += 1;
        self.function_body(body);
        self.indent -= 1;
        self.line("}");
    }

    fn function(&mut self, function: &FnDeclStmt) {
        let mut header = String::new();
        if !function.anonymous {
            header.push_str(&function.identifier);
        }
        if !function.parameters.is_empty() {
            header.push_str(&format!("({})", function.parameter_names().join(", ")));
        }

        self.block(&header, &function.body);
    }

    /// `next` is how the item printed after `stmt` begins.
    fn stmt(&mut self, stmt: &Stmt, next: Opening) {
        match stmt {
            Stmt::Assignment(assignment) => {
                let value = match (&assignment.value, next) {
                    // `x = y (...)` would call `y`
                    (Expr::Symbol(symbol), Opening::Paren) => format!("({})", symbol.value),
                    (value, _) => print_expr(value),
                };
                self.line(&format!("{} = {}", assignment.identifier.value, value));
            }
            Stmt::If(if_stmt) => {
                let header = format!("if {}", print_expr(&if_stmt.condition));
                self.block(&header, &if_stmt.body);
            }
            Stmt::Expression(expression) => {
                let text = print_expr(&expression.expression);
                let line = match (&expression.expression, next) {
                    (Expr::Symbol(_), Opening::Paren) => format!("({})", text),
                    // `y {` and `(y) {` both open a declaration
                    (Expr::Symbol(_), Opening::Brace) => format!("(({}))", text),
                    (Expr::Call(_), Opening::Brace) => format!("({})", text),
                    _ => text,
                };
                self.line(&line);
            }
        }
    }
}

/// A body item, declarations and statements alike.
enum Item<'a> {
    Function(&'a FnDeclStmt),
    Stmt(&'a Stmt),
}

/// The first printed character of an item, as far as it matters to the
/// item before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Opening {
    Paren,
    Brace,
    Other,
}

impl Item<'_> {
    /// How this item prints its first character when followed by `next`.
    fn opening(&self, next: Opening) -> Opening {
        match self {
            Item::Function(function) if function.anonymous => {
                if function.parameters.is_empty() {
                    Opening::Brace
                } else {
                    Opening::Paren
                }
            }
            Item::Stmt(Stmt::Expression(expression)) => match (&expression.expression, next) {
                (Expr::Binary(_), _) => Opening::Paren,
                (Expr::Symbol(_), Opening::Paren | Opening::Brace) => Opening::Paren,
                (Expr::Call(_), Opening::Brace) => Opening::Paren,
                _ => Opening::Other,
            },
            _ => Opening::Other,
        }
    }
}

/// Merges the declarations and statements of `body` by start offset. Both
/// lists are already in source order.
fn source_order(body: &FunctionBody) -> Vec<Item<'_>> {
    let mut items = Vec::with_capacity(body.functions.len() + body.statements.len());
    let mut functions = body.functions.iter().peekable();
    let mut statements = body.statements.iter().peekable();

    loop {
        let function_first = match (functions.peek(), statements.peek()) {
            (Some(function), Some(stmt)) => function.span.start.0 <= stmt.get_span().start.0,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };

        let item = if function_first {
            functions.next().map(Item::Function)
        } else {
            statements.next().map(Item::Stmt)
        };
        items.extend(item);
    }

    items
}

fn write_expr(output: &mut String, expr: &Expr) {
    match expr {
        Expr::Binary(binary) => {
            output.push('(');
            write_expr(output, &binary.left);
            output.push(' ');
            output.push_str(&binary.operator);
            output.push(' ');
            write_expr(output, &binary.right);
            output.push(')');
        }
        Expr::Symbol(symbol) => output.push_str(&symbol.value),
        Expr::Constant(constant) => match &constant.value {
            Constant::Int(value) => output.push_str(&value.to_string()),
            Constant::Double(value) => output.push_str(&format_double(*value)),
            Constant::String(value) => output.push_str(&escape_string(value)),
        },
        Expr::Call(call) => {
            output.push_str(&call.callee.value);
            output.push('(');
            for (index, argument) in call.arguments.iter().enumerate() {
                if index > 0 {
                    output.push_str(", ");
                }
                write_expr(output, argument);
            }
            output.push(')');
        }
    }
}

/// Doubles always print with a `.` so they lex back as doubles.
fn format_double(value: f64) -> String {
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}

fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(ch),
        }
    }
    escaped.push('"');
    escaped
}
