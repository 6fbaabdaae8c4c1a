//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! The parser is a cursor over the token sequence:
//!
//! - `peek(k)` looks ahead without moving
//! - `commit(n)` moves past a prefix that lookahead has already matched
//! - `checkpoint()` / `has_advanced_since()` let recovery loops prove
//!   forward progress
//! - `enter_*` / `exit_*` bound how deeply constructs nest
//!
//! Errors are collected on the parser instead of aborting, so one parse
//! reports as many problems as it can find.

use std::rc::Rc;

use crate::{
    ast::statements::FunctionBody,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::Token,
    Position, Span,
};

use super::stmt::parse_body_items;

/// How deep groups, argument lists, blocks and operator chains may nest
/// before the parser gives up on the construct.
pub const MAX_NESTING_DEPTH: usize = 128;

/// A saved cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// The list of tokens to parse
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// The name of the source file being parsed
    file: Rc<String>,
    /// Errors reported so far, in source order of discovery
    errors: Vec<Error>,
    /// Suffix of the next `anonymous_N` function name
    anonymous_counter: usize,
    /// Constructs currently being parsed inside one another
    depth: usize,
    /// `(` groups and argument lists open since the innermost block
    open_groups: usize,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// # Arguments
    ///
    /// * `tokens` - Vector of tokens to parse
    /// * `file` - Reference-counted string containing the source file name
    pub fn new(tokens: Vec<Token>, file: Rc<String>) -> Self {
        Parser {
            tokens,
            pos: 0,
            file,
            errors: vec![],
            anonymous_counter: 0,
            depth: 0,
            open_groups: 0,
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> Option<&Token> {
        self.peek(0)
    }

    /// Returns the token `offset` places after the current one.
    pub fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    /// Whether the token at `offset` is the operator `lexeme`.
    pub fn peek_operator(&self, offset: usize, lexeme: &str) -> bool {
        self.peek(offset).is_some_and(|token| token.is_operator(lexeme))
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Moves past `count` tokens matched by lookahead.
    pub fn commit(&mut self, count: usize) {
        self.pos = (self.pos + count).min(self.tokens.len());
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.pos)
    }

    pub fn has_advanced_since(&self, checkpoint: Checkpoint) -> bool {
        self.pos > checkpoint.0
    }

    /// Consumes the operator `lexeme`, or reports what was found instead.
    ///
    /// # Arguments
    ///
    /// * `lexeme` - The expected operator
    /// * `message` - Context for the error, e.g. "expected ')' after arguments"
    pub fn expect_operator(&mut self, lexeme: &str, message: &str) -> Result<Token, Error> {
        match self.current_token() {
            Some(token) if token.is_operator(lexeme) => {
                let token = token.clone();
                self.pos += 1;
                Ok(token)
            }
            Some(token) => Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: token.to_string(),
                    message: String::from(message),
                },
                token.span.start.clone(),
            )),
            None => Err(self.end_of_input(&format!("'{}'", lexeme))),
        }
    }

    /// An error for running out of tokens while expecting `expected`.
    pub fn end_of_input(&self, expected: &str) -> Error {
        Error::new(
            ErrorImpl::UnexpectedEndOfInput {
                expected: String::from(expected),
            },
            self.get_position(),
        )
    }

    pub fn report(&mut self, error: Error) {
        self.errors.push(error);
    }

    /// Returns the next `anonymous_N` name.
    pub fn next_anonymous_name(&mut self) -> String {
        let name = format!("anonymous_{}", self.anonymous_counter);
        self.anonymous_counter += 1;
        name
    }

    /// Returns the start of the current token, or the end of the last token
    /// once the input is exhausted.
    pub fn get_position(&self) -> Position {
        match self.current_token() {
            Some(token) => token.span.start.clone(),
            None => self.previous_end(),
        }
    }

    /// End of the most recently consumed token.
    pub fn previous_end(&self) -> Position {
        match self.pos.checked_sub(1).and_then(|index| self.tokens.get(index)) {
            Some(token) => token.span.end.clone(),
            None => Position(0, Rc::clone(&self.file)),
        }
    }

    fn nesting_error(&self, position: Position) -> Error {
        Error::new(ErrorImpl::NestingTooDeep { limit: MAX_NESTING_DEPTH }, position)
    }

    /// Enters the group whose `(` is the current token.
    ///
    /// Past the depth limit the error is returned instead, and every group
    /// open since the innermost block is skipped through its `)`, so the
    /// statement that failed ends where the source closes it.
    pub fn enter_group(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            let error = self.nesting_error(self.get_position());
            self.skip_open_groups();
            return Err(error);
        }

        self.depth += 1;
        self.open_groups += 1;
        Ok(())
    }

    pub fn exit_group(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.open_groups = self.open_groups.saturating_sub(1);
    }

    fn skip_open_groups(&mut self) {
        let mut open = self.open_groups;

        while let Some(token) = self.current_token() {
            // A block boundary ends the statement regardless
            if token.is_operator("}") {
                break;
            }

            let opens = token.is_operator("(");
            let closes = token.is_operator(")");
            self.pos += 1;

            if opens {
                open += 1;
            } else if closes {
                open = open.saturating_sub(1);
                if open == 0 {
                    break;
                }
            }
        }
    }

    /// Enters a block whose `{` (at `position`) was just consumed.
    ///
    /// Past the depth limit the whole block is skipped through its matching
    /// `}` and the error is returned.
    pub fn enter_block(&mut self, position: Position) -> Result<(), Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            self.skip_block();
            return Err(self.nesting_error(position));
        }

        self.depth += 1;
        Ok(())
    }

    pub fn exit_block(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn skip_block(&mut self) {
        let mut open = 1;

        while let Some(token) = self.current_token() {
            let opens = token.is_operator("{");
            let closes = token.is_operator("}");
            self.pos += 1;

            if opens {
                open += 1;
            } else if closes {
                open -= 1;
                if open == 0 {
                    break;
                }
            }
        }
    }

    /// Takes one more operator into the expression being built. Operator
    /// chains deepen the tree even where parsing them does not recurse.
    pub fn enter_operand(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.nesting_error(self.get_position()));
        }

        self.depth += 1;
        Ok(())
    }

    /// Leaves `count` operator levels taken by `enter_operand`.
    pub fn exit_operands(&mut self, count: usize) {
        self.depth = self.depth.saturating_sub(count);
    }

    pub fn span_from(&self, start: Position) -> Span {
        Span {
            start,
            end: self.previous_end(),
        }
    }
}

/// Parses a stream of tokens into an Abstract Syntax Tree.
///
/// This is the main entry point for parsing. The whole input is one
/// top-level function body; a stray `}` at the top level is reported and
/// skipped so parsing continues after it.
///
/// # Returns
///
/// A tuple containing the root FunctionBody and every syntax error found.
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> (FunctionBody, Vec<Error>) {
    let mut parser = Parser::new(tokens, Rc::clone(&file));
    let start = Position(0, Rc::clone(&file));
    let mut root = FunctionBody::new(Span {
        start: start.clone(),
        end: start.clone(),
    });

    loop {
        parse_body_items(&mut parser, &mut root);

        match parser.advance() {
            Some(stray) => parser.report(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: stray.to_string(),
                    message: String::from("no block to close"),
                },
                stray.span.start.clone(),
            )),
            None => break,
        }
    }

    root.span = parser.span_from(start);
    (root, parser.errors)
}
