#![allow(clippy::module_inception)]

use std::{fmt::Display, rc::Rc};

use colored::Colorize;

use crate::{
    ast::statements::FunctionBody,
    errors::errors::{Diagnostic, Error, ErrorTip},
    lexer::lexer::{tokenize, DEFAULT_FILE_NAME},
    parser::parser::parse,
    scope_checker::scope_checker::scope_check,
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod scope_checker;

extern crate regex;

/// A byte offset into a named source.
///
/// Offsets are stored as `u32`. Offsets past `u32::MAX` saturate to it, so
/// positions in sources over 4 GiB all point at the limit.
#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

/// Narrows a byte offset to the width stored in a `Position`.
pub fn source_offset(offset: usize) -> u32 {
    u32::try_from(offset).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Length of the spanned text in bytes.
    pub fn len(&self) -> u32 {
        self.end.0.saturating_sub(self.start.0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A 1-based line/column projection of a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextPosition {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Display for TextPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Maps offsets into one source text to line/column pairs.
///
/// Line starts are computed once, so every lookup is a binary search instead
/// of a rescan from the beginning of the text. Columns count characters, not
/// bytes.
#[derive(Debug, Clone)]
pub struct LineIndex {
    source: String,
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(source.match_indices('\n').map(|(index, _)| index + 1));

        LineIndex {
            source: source.to_string(),
            line_starts,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn text_position(&self, offset: u32) -> TextPosition {
        let mut offset = usize::try_from(offset).unwrap_or(usize::MAX).min(self.source.len());
        while !self.source.is_char_boundary(offset) {
            offset -= 1;
        }

        // line_starts[0] == 0, so at least one start is <= offset
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line - 1];
        let column = self.source[line_start..offset].chars().count() + 1;

        TextPosition {
            offset,
            line,
            column,
        }
    }

    /// Text of a 1-based line without its line terminator.
    pub fn line_text(&self, line: usize) -> &str {
        if line == 0 || line > self.line_starts.len() {
            return "";
        }

        let start = self.line_starts[line - 1];
        let end = self
            .line_starts
            .get(line)
            .copied()
            .unwrap_or(self.source.len());

        self.source[start..end].trim_end_matches(['\n', '\r'])
    }
}

/// Result of running every front-end pass over one compilation unit.
#[derive(Debug)]
pub struct Analysis {
    pub ast: FunctionBody,
    /// Lexer errors, then parser errors, then scope errors.
    pub errors: Vec<Error>,
    pub line_index: LineIndex,
}

impl Analysis {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors
            .iter()
            .map(|error| error.to_diagnostic(&self.line_index))
            .collect()
    }
}

/// Tokenizes, parses and scope checks `source`.
///
/// Every pass runs even when an earlier one reported errors; whether to stop
/// is up to the caller.
pub fn analyze(source: String, file: Option<String>) -> Analysis {
    let line_index = LineIndex::new(&source);
    let file_name = Rc::new(
        file.clone()
            .unwrap_or_else(|| String::from(DEFAULT_FILE_NAME)),
    );

    let (tokens, mut errors) = tokenize(source, file);
    let (ast, parse_errors) = parse(tokens, file_name);
    errors.extend(parse_errors);

    let (_, scope_errors) = scope_check(&ast);
    errors.extend(scope_errors);

    Analysis {
        ast,
        errors,
        line_index,
    }
}

/// Renders an error as a caret snippet against the source line it points at.
pub fn display_error(error: &Error, line_index: &LineIndex) -> String {
    /*
        Error: UnresolvedIdentifier (Identifier `x` is not declared)
        -> main.rad
          |
        1 | y = x
          | ----^
    */

    let position = line_index.text_position(error.get_position().0);
    let line_text = line_index.line_text(position.line);

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    let mut output = String::new();

    if let ErrorTip::None = error.get_tip() {
        output.push_str(&format!("{}: {}\n", "Error".red().bold(), error.get_error_name()));
    } else {
        output.push_str(&format!(
            "{}: {} ({})\n",
            "Error".red().bold(),
            error.get_error_name(),
            error.get_tip()
        ));
    }
    output.push_str(&format!("-> {}\n", error.get_position().1));
    output.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    output.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = position.column.saturating_sub(removed_whitespace).max(1);
    output.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    output
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let start = string.chars().take_while(|c| *c == ' ').count();
    (&string[start..], start)
}
