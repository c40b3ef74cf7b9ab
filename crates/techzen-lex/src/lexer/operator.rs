use techzen_util::error::SourceError;

use super::core::Lexer;
use crate::token::{Token, TokenKind};

impl<'source> Lexer<'source> {
    /// `-` starts either a `Minus` or, followed by `>`, an `Arrow` (used
    /// by single-line function/if/for/while bodies).
    pub(crate) fn make_minus_or_arrow(
        &mut self,
        start_pos: usize,
        start_line: u32,
        start_col: u32,
    ) -> Result<Token, SourceError> {
        self.cursor_mut().advance();
        if self.cursor().current_char() == Some('>') {
            self.cursor_mut().advance();
            Ok(self.make_token_pub(TokenKind::Arrow, start_pos, start_line, start_col))
        } else {
            Ok(self.make_token_pub(TokenKind::Minus, start_pos, start_line, start_col))
        }
    }

    /// `/` starts either `Div` or, doubled, `Dfl` (floor division).
    pub(crate) fn make_div_or_dfl(
        &mut self,
        start_pos: usize,
        start_line: u32,
        start_col: u32,
    ) -> Result<Token, SourceError> {
        self.cursor_mut().advance();
        if self.cursor().current_char() == Some('/') {
            self.cursor_mut().advance();
            Ok(self.make_token_pub(TokenKind::Dfl, start_pos, start_line, start_col))
        } else {
            Ok(self.make_token_pub(TokenKind::Div, start_pos, start_line, start_col))
        }
    }

    /// `=` starts either `Eq` (assignment) or, doubled, `Ee` (equality).
    pub(crate) fn make_eq_or_ee(
        &mut self,
        start_pos: usize,
        start_line: u32,
        start_col: u32,
    ) -> Result<Token, SourceError> {
        self.cursor_mut().advance();
        if self.cursor().current_char() == Some('=') {
            self.cursor_mut().advance();
            Ok(self.make_token_pub(TokenKind::Ee, start_pos, start_line, start_col))
        } else {
            Ok(self.make_token_pub(TokenKind::Eq, start_pos, start_line, start_col))
        }
    }

    /// `!` only ever appears as `!=`; a bare `!` is an `ExpectedChar`
    /// error rather than a token of its own (the language has no logical
    /// negation operator spelled `!` — that's `NOT`).
    pub(crate) fn make_ne(
        &mut self,
        start_pos: usize,
        start_line: u32,
        start_col: u32,
    ) -> Result<Token, SourceError> {
        self.cursor_mut().advance();
        if self.cursor().current_char() == Some('=') {
            self.cursor_mut().advance();
            Ok(self.make_token_pub(TokenKind::Ne, start_pos, start_line, start_col))
        } else {
            Err(self.expected_char_here_pub(
                "expected '=' after '!'",
                start_pos,
                start_line,
                start_col,
            ))
        }
    }

    /// `<` starts either `Lt` or, followed by `=`, `Lte`.
    pub(crate) fn make_lt_or_lte(
        &mut self,
        start_pos: usize,
        start_line: u32,
        start_col: u32,
    ) -> Result<Token, SourceError> {
        self.cursor_mut().advance();
        if self.cursor().current_char() == Some('=') {
            self.cursor_mut().advance();
            Ok(self.make_token_pub(TokenKind::Lte, start_pos, start_line, start_col))
        } else {
            Ok(self.make_token_pub(TokenKind::Lt, start_pos, start_line, start_col))
        }
    }

    /// `>` starts either `Gt` or, followed by `=`, `Gte`.
    pub(crate) fn make_gt_or_gte(
        &mut self,
        start_pos: usize,
        start_line: u32,
        start_col: u32,
    ) -> Result<Token, SourceError> {
        self.cursor_mut().advance();
        if self.cursor().current_char() == Some('=') {
            self.cursor_mut().advance();
            Ok(self.make_token_pub(TokenKind::Gte, start_pos, start_line, start_col))
        } else {
            Ok(self.make_token_pub(TokenKind::Gt, start_pos, start_line, start_col))
        }
    }
}

#[cfg(test)]
mod tests {
    use techzen_util::span::FileId;

    use crate::lexer::Lexer;
    use crate::token::TokenKind;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src, FileId::DUMMY).tokenize().unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn minus_vs_arrow() {
        assert_eq!(kinds("-"), vec![TokenKind::Minus, TokenKind::Eof]);
        assert_eq!(kinds("->"), vec![TokenKind::Arrow, TokenKind::Eof]);
    }

    #[test]
    fn div_vs_floor_div() {
        assert_eq!(kinds("/"), vec![TokenKind::Div, TokenKind::Eof]);
        assert_eq!(kinds("//"), vec![TokenKind::Dfl, TokenKind::Eof]);
    }

    #[test]
    fn eq_vs_ee() {
        assert_eq!(kinds("="), vec![TokenKind::Eq, TokenKind::Eof]);
        assert_eq!(kinds("=="), vec![TokenKind::Ee, TokenKind::Eof]);
    }

    #[test]
    fn bang_alone_is_an_expected_char_error() {
        let err = Lexer::new("!", FileId::DUMMY).tokenize().unwrap_err();
        assert_eq!(err.kind, techzen_util::error::ErrorKind::ExpectedChar);
    }

    #[test]
    fn bang_equals_is_ne() {
        assert_eq!(kinds("!="), vec![TokenKind::Ne, TokenKind::Eof]);
    }

    #[test]
    fn relational_operators() {
        assert_eq!(kinds("<"), vec![TokenKind::Lt, TokenKind::Eof]);
        assert_eq!(kinds("<="), vec![TokenKind::Lte, TokenKind::Eof]);
        assert_eq!(kinds(">"), vec![TokenKind::Gt, TokenKind::Eof]);
        assert_eq!(kinds(">="), vec![TokenKind::Gte, TokenKind::Eof]);
    }
}
