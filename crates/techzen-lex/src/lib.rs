//! techzen-lex - lexical analysis for TechZen source text.
//!
//! Turns a source string into a flat [`token::Token`] stream. Lexing is a
//! single fatal-per-scan pass (spec.md §4.1): the first illegal character
//! or malformed literal aborts the scan and is reported as a
//! `techzen_util::SourceError`, there is no error-recovery mode.

pub mod cursor;
pub mod lexer;
pub mod token;
pub mod unicode;

pub use lexer::Lexer;
pub use token::{Keyword, Token, TokenKind};

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;
    use techzen_util::span::FileId;

    use crate::lexer::Lexer;
    use crate::token::TokenKind;

    proptest! {
        /// Any run of digits lexes to a single `Int` token carrying that
        /// exact value (as long as it fits in an `i64`).
        #[test]
        fn digit_runs_lex_as_int(n in 0i64..1_000_000_000) {
            let src = n.to_string();
            let tokens = Lexer::new(&src, FileId::DUMMY).tokenize().unwrap();
            prop_assert_eq!(&tokens[0].kind, &TokenKind::Int(n));
            prop_assert_eq!(&tokens[1].kind, &TokenKind::Eof);
        }

        /// Lexing never panics on arbitrary printable ASCII input - it
        /// either succeeds or returns a `SourceError`.
        #[test]
        fn never_panics_on_ascii(s in "[ -~]{0,64}") {
            let _ = Lexer::new(&s, FileId::DUMMY).tokenize();
        }
    }
}
