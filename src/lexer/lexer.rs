use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{errors::errors::{Error, ErrorImpl}, source_offset, Position, MK_TOKEN};

use super::{
    operators::{lookup_precedence, DOUBLE_OPERATORS, SINGLE_OPERATORS, TRIPLE_OPERATORS},
    tokens::{Token, TokenKind, RESERVED_LOOKUP},
};

pub const DEFAULT_FILE_NAME: &str = "shell";

/// Called with the unlexed remainder of the source when `regex` matches at
/// its start.
pub type RegexHandler = fn(&mut Lexer, &Regex, &str);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new(r"^\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"^//[^\n]*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"^[0-9][0-9.]*").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new(r"^[\p{L}_][\p{L}\p{Nd}_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new(r#"(?s)^"((?:[^"\\]|\\.)*)("?)"#).unwrap(), handler: string_handler },
        RegexPattern { regex: operator_regex(), handler: operator_handler },
    ];
}

/// Longest operators first: regex alternation is leftmost-first, so listing
/// the three-character forms before their prefixes makes the match greedy.
fn operator_regex() -> Regex {
    let alternatives = TRIPLE_OPERATORS
        .iter()
        .chain(DOUBLE_OPERATORS.iter())
        .chain(SINGLE_OPERATORS.iter())
        .map(|operator| regex::escape(operator))
        .collect::<Vec<String>>()
        .join("|");

    Regex::new(&format!("^(?:{})", alternatives)).unwrap()
}

pub struct Lexer {
    tokens: Vec<Token>,
    errors: Vec<Error>,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from(DEFAULT_FILE_NAME))
        };

        Lexer {
            tokens: vec![],
            errors: vec![],
            pos: 0,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn error(&mut self, error_impl: ErrorImpl, offset: usize) {
        self.errors.push(Error::new(error_impl, Position(source_offset(offset), Rc::clone(&self.file))));
    }

    /// Emits a token for the `len` bytes at the current offset and moves past them.
    fn emit(&mut self, kind: TokenKind, len: usize) {
        let start = self.pos;
        self.push(MK_TOKEN!(kind, start, start + len, self.file));
        self.advance_n(len);
    }
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex, remainder: &str) {
    if let Some(matched) = regex.find(remainder) {
        lexer.advance_n(matched.end());
    }
}

fn number_handler(lexer: &mut Lexer, regex: &Regex, remainder: &str) {
    let Some(matched) = regex.find(remainder) else {
        return;
    };
    let text = matched.as_str();

    // Only `digits` and `digits.digits` are literals
    let dots = text.matches('.').count();
    if dots > 1 || text.ends_with('.') {
        lexer.error(ErrorImpl::MalformedNumber { token: text.to_string() }, lexer.pos);
        lexer.advance_n(text.len());
        return;
    }

    let kind = if dots == 1 {
        // Digit runs too long for f64 parse to infinity
        text.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(TokenKind::Double)
    } else {
        text.parse::<i64>().ok().map(TokenKind::Int)
    };

    match kind {
        Some(kind) => lexer.emit(kind, text.len()),
        None => {
            lexer.error(ErrorImpl::NumberParseError { token: text.to_string() }, lexer.pos);
            lexer.advance_n(text.len());
        }
    }
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex, remainder: &str) {
    let Some(value) = regex.find(remainder) else {
        return;
    };

    if let Some(keyword) = RESERVED_LOOKUP.get(value.as_str()) {
        lexer.emit(TokenKind::Keyword(*keyword), value.len());
    } else {
        lexer.emit(TokenKind::Identifier(String::from(value.as_str())), value.len());
    }
}

fn string_handler(lexer: &mut Lexer, regex: &Regex, remainder: &str) {
    let Some(captures) = regex.captures(remainder) else {
        return;
    };

    let body = captures.get(1).map_or("", |body| body.as_str());
    let terminated = captures.get(2).is_some_and(|quote| !quote.is_empty());

    let mut result = String::new();
    let mut chars = body.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some(other) => result.push(other),
                None => {}
            }
        } else {
            result.push(ch);
        }
    }

    if terminated {
        lexer.emit(TokenKind::String(result), captures[0].len());
    } else {
        // The match only stops short of a closing quote at end of input, so
        // the literal owns everything that is left (including a lone `\`).
        lexer.error(ErrorImpl::UnterminatedString, lexer.pos);
        lexer.emit(TokenKind::String(result), remainder.len());
    }
}

fn operator_handler(lexer: &mut Lexer, regex: &Regex, remainder: &str) {
    let Some(matched) = regex.find(remainder) else {
        return;
    };
    let lexeme = matched.as_str();

    lexer.emit(
        TokenKind::Operator {
            lexeme: String::from(lexeme),
            precedence: lookup_precedence(lexeme),
        },
        lexeme.len(),
    );
}

/// Converts source text into tokens.
///
/// Lexing never stops early: an unrecognised character is reported and
/// skipped, and lexing resumes after it.
pub fn tokenize(source: String, file: Option<String>) -> (Vec<Token>, Vec<Error>) {
    let mut lex = Lexer::new(file);

    while lex.pos < source.len() {
        let remainder = &source[lex.pos..];
        let start = lex.pos;

        if let Some(pattern) = PATTERNS.iter().find(|pattern| pattern.regex.is_match(remainder)) {
            (pattern.handler)(&mut lex, &pattern.regex, remainder);
        }

        if lex.pos == start {
            let ch = remainder.chars().next().unwrap_or_default();
            lex.error(ErrorImpl::UnrecognisedToken { token: ch.to_string() }, start);
            lex.advance_n(ch.len_utf8());
        }
    }

    (lex.tokens, lex.errors)
}
