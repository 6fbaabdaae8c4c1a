use crate::{
    ast::{
        ast::Stmt,
        expressions::SymbolExpr,
        statements::{AssignmentStmt, ExpressionStmt, FnDeclStmt, FunctionBody, IfStmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::Keyword,
};

use super::{
    expr::{can_start_expr, parse_expr, LOWEST},
    parser::Parser,
};

/// Parses one statement, or returns `Ok(None)` when the current token cannot
/// start one.
pub fn parse_stmt(parser: &mut Parser) -> Result<Option<Stmt>, Error> {
    let Some(token) = parser.current_token() else {
        return Ok(None);
    };

    if token.identifier().is_some() && parser.peek_operator(1, "=") {
        return parse_assignment_stmt(parser).map(Some);
    }

    if token.is_keyword(Keyword::If) {
        return parse_if_stmt(parser).map(Some);
    }

    if can_start_expr(token) {
        let expression = parse_expr(parser, LOWEST)?;

        return Ok(Some(Stmt::Expression(ExpressionStmt {
            span: expression.get_span().clone(),
            expression,
        })));
    }

    Ok(None)
}

pub fn parse_assignment_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let identifier = match parser.advance() {
        Some(token) => SymbolExpr { value: token.to_string(), span: token.span },
        None => return Err(parser.end_of_input("an identifier")),
    };
    parser.expect_operator("=", "expected '=' in assignment")?;

    let value = parse_expr(parser, LOWEST)?;

    Ok(Stmt::Assignment(AssignmentStmt {
        span: parser.span_from(identifier.span.start.clone()),
        identifier,
        value,
    }))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.get_position();
    parser.advance();

    let condition = parse_expr(parser, LOWEST)?;
    let open = parser.expect_operator("{", "expected '{' after if condition")?;
    parser.enter_block(open.span.start)?;

    let body = parse_function_body(parser);
    close_block(parser, "expected '}' to close the if body");
    parser.exit_block();

    Ok(Stmt::If(IfStmt {
        condition,
        body,
        span: parser.span_from(start),
    }))
}

/// What lookahead found in front of a function body.
struct FnDeclPrefix {
    name: Option<String>,
    parameters: Vec<SymbolExpr>,
    /// Tokens up to and including the opening `{`.
    length: usize,
}

/// Matches `[ident] ['(' [ident {, ident}] ')'] '{'` without moving the
/// cursor.
fn match_fn_decl_prefix(parser: &Parser) -> Option<FnDeclPrefix> {
    let mut offset = 0;

    let name = parser
        .peek(offset)
        .and_then(|token| token.identifier())
        .map(String::from);
    if name.is_some() {
        offset += 1;
    }

    let mut parameters = vec![];

    if parser.peek_operator(offset, "(") {
        offset += 1;

        if parser.peek_operator(offset, ")") {
            offset += 1;
        } else {
            loop {
                let token = parser.peek(offset)?;
                let value = token.identifier()?;
                parameters.push(SymbolExpr {
                    value: String::from(value),
                    span: token.span.clone(),
                });
                offset += 1;

                if parser.peek_operator(offset, ",") {
                    offset += 1;
                } else if parser.peek_operator(offset, ")") {
                    offset += 1;
                    break;
                } else {
                    return None;
                }
            }
        }
    }

    if !parser.peek_operator(offset, "{") {
        return None;
    }

    Some(FnDeclPrefix {
        name,
        parameters,
        length: offset + 1,
    })
}

/// Parses a function declaration if one starts at the cursor.
///
/// Returns `Ok(None)` without consuming anything when the lookahead does not
/// match, so the caller can fall back to a statement. A declaration nested
/// too deeply is skipped whole and reported as an error.
pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Option<FnDeclStmt>, Error> {
    let Some(prefix) = match_fn_decl_prefix(parser) else {
        return Ok(None);
    };
    let start = parser.get_position();
    parser.commit(prefix.length);
    parser.enter_block(start.clone())?;

    let (identifier, anonymous) = match prefix.name {
        Some(name) => (name, false),
        None => (parser.next_anonymous_name(), true),
    };

    let body = parse_function_body(parser);
    close_block(parser, "expected '}' to close the function body");
    parser.exit_block();

    Ok(Some(FnDeclStmt {
        identifier,
        anonymous,
        parameters: prefix.parameters,
        body,
        span: parser.span_from(start),
    }))
}

/// Parses items up to (not including) the closing `}` or end of input.
pub fn parse_function_body(parser: &mut Parser) -> FunctionBody {
    let start = parser.get_position();
    let mut body = FunctionBody::new(parser.span_from(start.clone()));

    parse_body_items(parser, &mut body);

    body.span = parser.span_from(start);
    body
}

/// Alternates declarations and statements into `body` until `}` or end of
/// input. Every failed item consumes at least one token.
pub fn parse_body_items(parser: &mut Parser, body: &mut FunctionBody) {
    loop {
        match parser.current_token() {
            None => break,
            Some(token) if token.is_operator("}") => break,
            Some(_) => {}
        }

        let checkpoint = parser.checkpoint();

        match parse_fn_decl_stmt(parser) {
            Ok(Some(function)) => {
                body.functions.push(function);
                continue;
            }
            Ok(None) => {}
            Err(error) => {
                parser.report(error);
                continue;
            }
        }

        match parse_stmt(parser) {
            Ok(Some(stmt)) => body.statements.push(stmt),
            Ok(None) => {
                let error = match parser.current_token() {
                    Some(token) => Error::new(
                        ErrorImpl::ExpectedStatement { token: token.to_string() },
                        token.span.start.clone(),
                    ),
                    None => parser.end_of_input("a statement"),
                };
                parser.report(error);
            }
            Err(error) => parser.report(error),
        }

        if !parser.has_advanced_since(checkpoint) {
            parser.advance();
        }
    }
}

/// Consumes the `}` closing a block, reporting it when missing.
fn close_block(parser: &mut Parser, message: &str) {
    if let Err(error) = parser.expect_operator("}", message) {
        parser.report(error);
    }
}
