use crate::{
    ast::{
        ast::Expr,
        expressions::{BinaryExpr, CallExpr, Constant, ConstantExpr, SymbolExpr},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{
        operators::{Associativity, Precedence},
        tokens::{Token, TokenKind},
    },
    Span,
};

use super::parser::Parser;

/// Floor for a complete expression: every binary operator may extend it.
pub const LOWEST: Precedence = Precedence::Assignment;

/// Precedence climbing.
///
/// Parses a primary expression, then keeps extending it with binary
/// operators whose tier is at least `min`. Left-associative operators parse
/// their right operand with a strictly tighter floor, so equal-tier operators
/// to the right are left for this loop and the chain leans left.
///
/// Every operator taken counts towards the nesting limit until this call
/// returns.
pub fn parse_expr(parser: &mut Parser, min: Precedence) -> Result<Expr, Error> {
    let mut left = parse_primary_expr(parser)?;
    let mut operators = 0;

    let result = loop {
        let Some(precedence) = parser.current_token().and_then(Token::binary_precedence) else {
            break Ok(left);
        };
        if precedence < min {
            break Ok(left);
        }

        if let Err(error) = parser.enter_operand() {
            break Err(error);
        }
        operators += 1;

        match parse_binary_expr(parser, left, precedence) {
            Ok(expr) => left = expr,
            Err(error) => break Err(error),
        }
    };

    parser.exit_operands(operators);
    result
}

/// Whether `token` can begin a primary expression.
pub fn can_start_expr(token: &Token) -> bool {
    match &token.kind {
        TokenKind::Int(_) | TokenKind::Double(_) | TokenKind::String(_) | TokenKind::Identifier(_) => true,
        TokenKind::Operator { lexeme, .. } => lexeme == "(",
        TokenKind::Keyword(_) => false,
    }
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = match parser.current_token() {
        Some(token) => token.clone(),
        None => return Err(parser.end_of_input("an expression")),
    };

    match token.kind {
        TokenKind::Int(value) => {
            parser.advance();
            Ok(Expr::Constant(ConstantExpr { value: Constant::Int(value), span: token.span }))
        }
        TokenKind::Double(value) => {
            parser.advance();
            Ok(Expr::Constant(ConstantExpr { value: Constant::Double(value), span: token.span }))
        }
        TokenKind::String(value) => {
            parser.advance();
            Ok(Expr::Constant(ConstantExpr { value: Constant::String(value), span: token.span }))
        }
        TokenKind::Identifier(name) => {
            if parser.peek_operator(1, "(") {
                parse_call_expr(parser)
            } else {
                parser.advance();
                Ok(Expr::Symbol(SymbolExpr { value: name, span: token.span }))
            }
        }
        TokenKind::Operator { ref lexeme, .. } if lexeme == "(" => parse_grouping_expr(parser),
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken { token: token.to_string() },
            token.span.start.clone(),
        )),
    }
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, precedence: Precedence) -> Result<Expr, Error> {
    let operator_token = match parser.advance() {
        Some(token) => token,
        None => return Err(parser.end_of_input("an operator")),
    };

    let floor = match precedence.associativity() {
        Associativity::Left => precedence.tighter(),
        Associativity::Right => precedence,
    };
    let right = parse_expr(parser, floor)?;

    Ok(Expr::Binary(BinaryExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        left: Box::new(left),
        operator: operator_token.to_string(),
        precedence,
        right: Box::new(right),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.enter_group()?;
    let expr = parse_group_contents(parser);
    parser.exit_group();

    expr
}

fn parse_group_contents(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, LOWEST)?;
    parser.expect_operator(")", "expected ')' to close the parenthesised expression")?;

    Ok(expr)
}

pub fn parse_call_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let callee = match parser.advance() {
        Some(token) => SymbolExpr { value: token.to_string(), span: token.span },
        None => return Err(parser.end_of_input("a function name")),
    };

    parser.enter_group()?;
    let arguments = parse_arguments(parser);
    parser.exit_group();
    let arguments = arguments?;

    Ok(Expr::Call(CallExpr {
        span: parser.span_from(callee.span.start.clone()),
        callee,
        arguments,
    }))
}

/// Parses `( [expr {, expr}] )`.
fn parse_arguments(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    parser.expect_operator("(", "expected '(' to start the argument list")?;

    let mut arguments = vec![];

    if !parser.peek_operator(0, ")") {
        loop {
            arguments.push(parse_expr(parser, LOWEST)?);

            if parser.peek_operator(0, ",") {
                parser.advance();
            } else {
                break;
            }
        }
    }

    parser.expect_operator(")", "expected ')' after arguments")?;

    Ok(arguments)
}
