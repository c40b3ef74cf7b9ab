use techzen_util::error::SourceError;

use super::core::Lexer;
use crate::token::{Token, TokenKind};
use crate::unicode::is_digit;

impl<'source> Lexer<'source> {
    /// Scans a number literal: digits, with at most one `.` making it a
    /// float. A second `.` ends the number (it belongs to whatever comes
    /// next, e.g. dotted access on a numeric literal is simply not valid
    /// and is left for the parser to reject) rather than being treated as
    /// a lex error.
    pub(crate) fn make_number(
        &mut self,
        start_pos: usize,
        start_line: u32,
        start_col: u32,
    ) -> Result<Token, SourceError> {
        let mut text = String::new();
        let mut dot_count = 0;

        loop {
            match self.cursor().current_char() {
                Some(c) if is_digit(c) => {
                    text.push(c);
                    self.cursor_mut().advance();
                }
                Some('.') if dot_count == 0 => {
                    dot_count += 1;
                    text.push('.');
                    self.cursor_mut().advance();
                }
                _ => break,
            }
        }

        let kind = if dot_count == 0 {
            let value: i64 = text.parse().map_err(|_| {
                self.error_here_pub(format!("invalid integer literal '{text}'"), start_pos, start_line, start_col)
            })?;
            TokenKind::Int(value)
        } else {
            let value: f64 = text.parse().map_err(|_| {
                self.error_here_pub(format!("invalid float literal '{text}'"), start_pos, start_line, start_col)
            })?;
            TokenKind::Float(value)
        };

        Ok(self.make_token_pub(kind, start_pos, start_line, start_col))
    }
}

#[cfg(test)]
mod tests {
    use techzen_util::span::FileId;

    use crate::lexer::Lexer;
    use crate::token::TokenKind;

    #[test]
    fn scans_integer() {
        let tokens = Lexer::new("42", FileId::DUMMY).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Int(42));
    }

    #[test]
    fn scans_float() {
        let tokens = Lexer::new("3.25", FileId::DUMMY).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Float(3.25));
    }

    #[test]
    fn second_dot_stops_the_number() {
        let tokens = Lexer::new("1.2.3", FileId::DUMMY).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Float(1.2));
        assert_eq!(tokens[1].kind, TokenKind::Dot);
        assert_eq!(tokens[2].kind, TokenKind::Int(3));
    }
}
