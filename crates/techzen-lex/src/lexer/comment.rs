use techzen_util::error::SourceError;

use super::core::Lexer;

impl<'source> Lexer<'source> {
    /// Consumes a comment starting at the current `#`.
    ///
    /// Two forms: `# ... \n` runs to end of line (the newline itself is
    /// left for the main dispatch loop to turn into a `Newline` token);
    /// `#[ ... ]#` is a block comment that can span multiple lines and
    /// must be explicitly closed — an unterminated block comment is a
    /// lex error rather than silently running to EOF.
    pub(crate) fn skip_comment(&mut self) -> Result<(), SourceError> {
        let start_pos = self.cursor().pos();
        let start_line = self.cursor().line();
        let start_col = self.cursor().column();

        self.cursor_mut().advance(); // consume '#'

        if self.cursor().current_char() == Some('[') {
            self.cursor_mut().advance();
            loop {
                match self.cursor().current_char() {
                    None => {
                        return Err(self.error_here_pub(
                            "unterminated block comment",
                            start_pos,
                            start_line,
                            start_col,
                        ))
                    }
                    Some(']') => {
                        self.cursor_mut().advance();
                        break;
                    }
                    Some(_) => {
                        self.cursor_mut().advance();
                    }
                }
            }
            if self.cursor().current_char() != Some('#') {
                return Err(self.expected_char_here_pub(
                    "'#' (Hash sign) expected after ']' (Square bracket) closing a multiline comment",
                    start_pos,
                    start_line,
                    start_col,
                ));
            }
            while let Some(c) = self.cursor().current_char() {
                if c == '\n' {
                    break;
                }
                self.cursor_mut().advance();
            }
            return Ok(());
        }

        while let Some(c) = self.cursor().current_char() {
            if c == '\n' {
                break;
            }
            self.cursor_mut().advance();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use techzen_util::span::FileId;

    use crate::lexer::Lexer;
    use crate::token::TokenKind;

    #[test]
    fn block_comment_can_span_multiple_lines() {
        let tokens = Lexer::new("1 #[ a\nb\nc ]# 2", FileId::DUMMY).tokenize().unwrap();
        let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::Int(1), TokenKind::Int(2), TokenKind::Eof]);
    }

    #[test]
    fn unterminated_block_comment_is_an_error() {
        let result = Lexer::new("1 #[ never closed", FileId::DUMMY).tokenize();
        assert!(result.is_err());
    }

    #[test]
    fn block_comment_stops_at_the_first_square_bracket_not_a_later_hash() {
        // The first `]` here is not followed by `#`, so this must fail
        // right there rather than keep scanning for a later `]#` pair.
        let result = Lexer::new("1 #[ a ] b ]# c", FileId::DUMMY).tokenize();
        let err = result.unwrap_err();
        assert_eq!(err.kind, techzen_util::error::ErrorKind::ExpectedChar);
    }
}
