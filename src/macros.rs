//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance spanning `start..end` in a file
//! - `MK_SPAN!` - Creates a Span between two byte offsets in a file
//!
//! These macros reduce boilerplate in the lexer implementation.

/// Creates a Span between two byte offsets.
///
/// Offsets beyond `u32::MAX` saturate, see `source_offset`.
///
/// # Arguments
///
/// * `$start` - Start offset (inclusive)
/// * `$end` - End offset (exclusive)
/// * `$file` - The `Rc<String>` file name
#[macro_export]
macro_rules! MK_SPAN {
    ($start:expr, $end:expr, $file:expr) => {
        $crate::Span {
            start: $crate::Position($crate::source_offset(($start) as usize), ::std::rc::Rc::clone(&$file)),
            end: $crate::Position($crate::source_offset(($end) as usize), ::std::rc::Rc::clone(&$file)),
        }
    };
}

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$start` - Start offset of the lexeme
/// * `$end` - End offset of the lexeme
/// * `$file` - The `Rc<String>` file name
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Int(42), 0, 2, lexer.file);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $start:expr, $end:expr, $file:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            span: $crate::MK_SPAN!($start, $end, $file),
        }
    };
}
