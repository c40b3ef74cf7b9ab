use techzen_util::error::SourceError;

use super::core::Lexer;
use crate::token::{Token, TokenKind};

impl<'source> Lexer<'source> {
    /// Scans a string literal starting at the opening quote, which may be
    /// either `"` or `'` — the closing quote must match whichever one
    /// opened the literal.
    ///
    /// Supports the escapes `\n \t \r \v \0 \" \\`; any other character
    /// following a backslash is taken literally (the backslash is
    /// dropped), matching the upstream scanner rather than erroring on an
    /// unrecognized escape. An unterminated string (end of source or a
    /// bare newline before the closing quote) is a lex error.
    pub(crate) fn make_string(
        &mut self,
        quote: char,
        start_pos: usize,
        start_line: u32,
        start_col: u32,
    ) -> Result<Token, SourceError> {
        self.cursor_mut().advance(); // opening quote
        let mut text = String::new();
        let mut escaped = false;

        loop {
            match self.cursor().current_char() {
                None => {
                    return Err(self.error_here_pub(
                        "unterminated string literal",
                        start_pos,
                        start_line,
                        start_col,
                    ))
                }
                Some('\n') if !escaped => {
                    return Err(self.error_here_pub(
                        "unterminated string literal",
                        start_pos,
                        start_line,
                        start_col,
                    ))
                }
                Some(c) if c == quote && !escaped => {
                    self.cursor_mut().advance();
                    break;
                }
                Some('\\') if !escaped => {
                    escaped = true;
                    self.cursor_mut().advance();
                }
                Some(c) if escaped => {
                    text.push(unescape(c));
                    escaped = false;
                    self.cursor_mut().advance();
                }
                Some(c) => {
                    text.push(c);
                    self.cursor_mut().advance();
                }
            }
        }

        Ok(self.make_token_pub(TokenKind::String(text), start_pos, start_line, start_col))
    }
}

fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        'v' => '\u{000B}',
        '0' => '\0',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use techzen_util::span::FileId;

    use crate::lexer::Lexer;
    use crate::token::TokenKind;

    #[test]
    fn scans_plain_string() {
        let tokens = Lexer::new("\"hello\"", FileId::DUMMY).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String("hello".to_string()));
    }

    #[test]
    fn decodes_escape_sequences() {
        let tokens = Lexer::new("\"a\\nb\\tc\"", FileId::DUMMY).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String("a\nb\tc".to_string()));
    }

    #[test]
    fn escaped_quote_does_not_close_string() {
        let tokens = Lexer::new("\"a\\\"b\"", FileId::DUMMY).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String("a\"b".to_string()));
    }

    #[test]
    fn single_quoted_string_is_equivalent_to_double_quoted() {
        let tokens = Lexer::new("'hello'", FileId::DUMMY).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String("hello".to_string()));
    }

    #[test]
    fn single_quote_does_not_close_a_double_quoted_string() {
        let tokens = Lexer::new("\"a'b\"", FileId::DUMMY).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String("a'b".to_string()));
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let result = Lexer::new("\"never closed", FileId::DUMMY).tokenize();
        assert!(result.is_err());
    }
}
