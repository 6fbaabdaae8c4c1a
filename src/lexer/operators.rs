//! Operator table.
//!
//! Maps every operator lexeme to the precedence tier used by the expression
//! parser. The table is fixed; lexemes that are not binary operators (braces,
//! commas, increments, ...) map to `Precedence::Unrecognized` so they can
//! never extend an expression.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// Operator precedence tiers, loosest binding first.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
pub enum Precedence {
    Unrecognized,
    Parens,
    Assignment,
    Ternary,
    NullCoalescing,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Member,
    /// Floor above every operator: only a primary expression is accepted.
    Primary,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Associativity {
    Left,
    Right,
}

impl Precedence {
    /// Whether an operator of this tier may join two operands.
    pub fn is_binary(self) -> bool {
        self > Precedence::Parens && self < Precedence::Primary
    }

    /// The next tier binding tighter than this one.
    pub fn tighter(self) -> Precedence {
        match self {
            Precedence::Unrecognized => Precedence::Parens,
            Precedence::Parens => Precedence::Assignment,
            Precedence::Assignment => Precedence::Ternary,
            Precedence::Ternary => Precedence::NullCoalescing,
            Precedence::NullCoalescing => Precedence::LogicalOr,
            Precedence::LogicalOr => Precedence::LogicalAnd,
            Precedence::LogicalAnd => Precedence::BitwiseOr,
            Precedence::BitwiseOr => Precedence::BitwiseXor,
            Precedence::BitwiseXor => Precedence::BitwiseAnd,
            Precedence::BitwiseAnd => Precedence::Equality,
            Precedence::Equality => Precedence::Relational,
            Precedence::Relational => Precedence::Shift,
            Precedence::Shift => Precedence::Additive,
            Precedence::Additive => Precedence::Multiplicative,
            Precedence::Multiplicative => Precedence::Member,
            Precedence::Member | Precedence::Primary => Precedence::Primary,
        }
    }

    pub fn associativity(self) -> Associativity {
        match self {
            Precedence::Assignment | Precedence::Ternary | Precedence::NullCoalescing => {
                Associativity::Right
            }
            _ => Associativity::Left,
        }
    }
}

/// Three-character operators, matched before anything shorter.
pub const TRIPLE_OPERATORS: [&str; 5] = ["&&=", "||=", "<<=", ">>=", "??="];

pub const DOUBLE_OPERATORS: [&str; 19] = [
    "++", "--", "==", "!=", "<=", ">=", "<<", ">>", "&&", "||", "??", "+=", "-=", "*=", "/=",
    "%=", "&=", "|=", "^=",
];

pub const SINGLE_OPERATORS: [&str; 22] = [
    "+", "-", "*", "/", "%", "&", "|", "^", "=", "<", ">", "!", "?", ":", ",", ".", "(", ")",
    "{", "}", "[", "]",
];

lazy_static! {
    pub static ref PRECEDENCE_LOOKUP: HashMap<&'static str, Precedence> = {
        let mut map = HashMap::new();
        map.insert("(", Precedence::Parens);
        map.insert(")", Precedence::Parens);

        for assignment in [
            "=", "+=", "-=", "*=", "/=", "%=", "&=", "^=", "|=", "<<=", ">>=", "&&=", "||=", "??=",
        ] {
            map.insert(assignment, Precedence::Assignment);
        }

        map.insert("?", Precedence::Ternary);
        map.insert("??", Precedence::NullCoalescing);
        map.insert("||", Precedence::LogicalOr);
        map.insert("&&", Precedence::LogicalAnd);
        map.insert("|", Precedence::BitwiseOr);
        map.insert("^", Precedence::BitwiseXor);
        map.insert("&", Precedence::BitwiseAnd);

        map.insert("==", Precedence::Equality);
        map.insert("!=", Precedence::Equality);

        map.insert("<", Precedence::Relational);
        map.insert(">", Precedence::Relational);
        map.insert("<=", Precedence::Relational);
        map.insert(">=", Precedence::Relational);

        map.insert("<<", Precedence::Shift);
        map.insert(">>", Precedence::Shift);

        map.insert("+", Precedence::Additive);
        map.insert("-", Precedence::Additive);

        map.insert("*", Precedence::Multiplicative);
        map.insert("/", Precedence::Multiplicative);
        map.insert("%", Precedence::Multiplicative);

        map.insert(".", Precedence::Member);
        map
    };
}

pub fn lookup_precedence(lexeme: &str) -> Precedence {
    PRECEDENCE_LOOKUP
        .get(lexeme)
        .copied()
        .unwrap_or(Precedence::Unrecognized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_order() {
        assert!(lookup_precedence(".") > lookup_precedence("*"));
        assert!(lookup_precedence("*") > lookup_precedence("+"));
        assert!(lookup_precedence("+") > lookup_precedence("<<"));
        assert!(lookup_precedence("<<") > lookup_precedence("<"));
        assert!(lookup_precedence("<") > lookup_precedence("=="));
        assert!(lookup_precedence("==") > lookup_precedence("&"));
        assert!(lookup_precedence("&") > lookup_precedence("^"));
        assert!(lookup_precedence("^") > lookup_precedence("|"));
        assert!(lookup_precedence("|") > lookup_precedence("&&"));
        assert!(lookup_precedence("&&") > lookup_precedence("||"));
        assert!(lookup_precedence("||") > lookup_precedence("??"));
        assert!(lookup_precedence("??") > lookup_precedence("?"));
        assert!(lookup_precedence("?") > lookup_precedence("="));
        assert!(lookup_precedence("=") > lookup_precedence("("));
        assert!(lookup_precedence("(") > lookup_precedence("{"));
    }

    #[test]
    fn test_unknown_lexemes_are_unrecognized() {
        for lexeme in ["{", "}", ",", ":", "!", "++", "--", "[", "]", "@", ""] {
            assert_eq!(lookup_precedence(lexeme), Precedence::Unrecognized, "{}", lexeme);
            assert!(!lookup_precedence(lexeme).is_binary());
        }
    }

    #[test]
    fn test_parens_are_not_binary() {
        assert!(!Precedence::Parens.is_binary());
        assert!(!Precedence::Primary.is_binary());
        assert!(Precedence::Member.is_binary());
        assert!(Precedence::Assignment.is_binary());
    }

    #[test]
    fn test_every_lexed_operator_has_a_tier_entry_or_is_punctuation() {
        let punctuation = ["++", "--", "!", ":", ",", "{", "}", "[", "]"];
        for lexeme in TRIPLE_OPERATORS
            .iter()
            .chain(DOUBLE_OPERATORS.iter())
            .chain(SINGLE_OPERATORS.iter())
        {
            let known = PRECEDENCE_LOOKUP.contains_key(lexeme);
            assert_eq!(known, !punctuation.contains(lexeme), "{}", lexeme);
        }
    }

    #[test]
    fn test_associativity() {
        assert_eq!(lookup_precedence("-").associativity(), Associativity::Left);
        assert_eq!(lookup_precedence("==").associativity(), Associativity::Left);
        assert_eq!(lookup_precedence("+=").associativity(), Associativity::Right);
        assert_eq!(lookup_precedence("??").associativity(), Associativity::Right);
        assert_eq!(Precedence::Multiplicative.tighter(), Precedence::Member);
        assert_eq!(Precedence::Member.tighter(), Precedence::Primary);
    }
}
