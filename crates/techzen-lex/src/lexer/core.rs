use techzen_util::error::SourceError;
use techzen_util::span::{FileId, Span};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};
use crate::unicode::is_whitespace_not_newline;

/// Scans a source string into a flat token stream.
///
/// Lexing is fatal-per-scan: the first illegal character or malformed
/// construct stops the whole pass and is returned as a `SourceError`
/// rather than collected alongside whatever tokens came before it. This
/// mirrors the upstream interpreter's `make_tokens` exactly — there is no
/// recovery-and-continue mode.
pub struct Lexer<'source> {
    cursor: Cursor<'source>,
    file_id: FileId,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str, file_id: FileId) -> Self {
        Self {
            cursor: Cursor::new(source),
            file_id,
        }
    }

    /// Scan the entire source, returning every token up to and including
    /// a trailing `Eof`, or the first error encountered.
    pub fn tokenize(mut self) -> Result<Vec<Token>, SourceError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn span_here(&self, start_pos: usize, start_line: u32, start_col: u32) -> Span {
        Span::with_file(start_pos, self.cursor.pos(), self.file_id, start_line, start_col)
    }

    fn make_token(&self, kind: TokenKind, start_pos: usize, start_line: u32, start_col: u32) -> Token {
        Token::new(kind, self.span_here(start_pos, start_line, start_col))
    }

    fn error_here(&self, message: impl Into<String>, start_pos: usize, start_line: u32, start_col: u32) -> SourceError {
        SourceError::illegal_char(message, self.span_here(start_pos, start_line, start_col))
    }

    fn expected_char_here(&self, message: impl Into<String>, start_pos: usize, start_line: u32, start_col: u32) -> SourceError {
        SourceError::expected_char(message, self.span_here(start_pos, start_line, start_col))
    }

    /// Dispatches on the current character to produce exactly one token.
    fn next_token(&mut self) -> Result<Token, SourceError> {
        loop {
            let Some(c) = self.cursor.current_char() else {
                let pos = self.cursor.pos();
                return Ok(self.make_token(TokenKind::Eof, pos, self.cursor.line(), self.cursor.column()));
            };

            if is_whitespace_not_newline(c) {
                self.cursor.advance();
                continue;
            }

            if c == '#' {
                self.skip_comment()?;
                continue;
            }

            let start_pos = self.cursor.pos();
            let start_line = self.cursor.line();
            let start_col = self.cursor.column();

            return match c {
                '\n' | ';' => {
                    self.cursor.advance();
                    Ok(self.make_token(TokenKind::Newline, start_pos, start_line, start_col))
                }
                c if c.is_ascii_digit() => self.make_number(start_pos, start_line, start_col),
                c if crate::unicode::is_ident_start(c) => Ok(self.make_identifier_or_keyword(start_pos, start_line, start_col)),
                '"' | '\'' => self.make_string(c, start_pos, start_line, start_col),
                '+' => {
                    self.cursor.advance();
                    Ok(self.make_token(TokenKind::Plus, start_pos, start_line, start_col))
                }
                '-' => self.make_minus_or_arrow(start_pos, start_line, start_col),
                '*' => {
                    self.cursor.advance();
                    Ok(self.make_token(TokenKind::Mul, start_pos, start_line, start_col))
                }
                '/' => self.make_div_or_dfl(start_pos, start_line, start_col),
                '%' => {
                    self.cursor.advance();
                    Ok(self.make_token(TokenKind::Mod, start_pos, start_line, start_col))
                }
                '^' => {
                    self.cursor.advance();
                    Ok(self.make_token(TokenKind::Pow, start_pos, start_line, start_col))
                }
                '=' => self.make_eq_or_ee(start_pos, start_line, start_col),
                '!' => self.make_ne(start_pos, start_line, start_col),
                '<' => self.make_lt_or_lte(start_pos, start_line, start_col),
                '>' => self.make_gt_or_gte(start_pos, start_line, start_col),
                '(' => {
                    self.cursor.advance();
                    Ok(self.make_token(TokenKind::LParen, start_pos, start_line, start_col))
                }
                ')' => {
                    self.cursor.advance();
                    Ok(self.make_token(TokenKind::RParen, start_pos, start_line, start_col))
                }
                '[' => {
                    self.cursor.advance();
                    Ok(self.make_token(TokenKind::LSquare, start_pos, start_line, start_col))
                }
                ']' => {
                    self.cursor.advance();
                    Ok(self.make_token(TokenKind::RSquare, start_pos, start_line, start_col))
                }
                '{' => {
                    self.cursor.advance();
                    Ok(self.make_token(TokenKind::LCurly, start_pos, start_line, start_col))
                }
                '}' => {
                    self.cursor.advance();
                    Ok(self.make_token(TokenKind::RCurly, start_pos, start_line, start_col))
                }
                ',' => {
                    self.cursor.advance();
                    Ok(self.make_token(TokenKind::Comma, start_pos, start_line, start_col))
                }
                ':' => {
                    self.cursor.advance();
                    Ok(self.make_token(TokenKind::Colon, start_pos, start_line, start_col))
                }
                '.' => {
                    self.cursor.advance();
                    Ok(self.make_token(TokenKind::Dot, start_pos, start_line, start_col))
                }
                other => {
                    self.cursor.advance();
                    Err(self.error_here(format!("illegal character '{other}'"), start_pos, start_line, start_col))
                }
            };
        }
    }
}

impl<'source> Lexer<'source> {
    pub(crate) fn cursor_mut(&mut self) -> &mut Cursor<'source> {
        &mut self.cursor
    }

    pub(crate) fn cursor(&self) -> &Cursor<'source> {
        &self.cursor
    }

    pub(crate) fn file_id(&self) -> FileId {
        self.file_id
    }

    pub(crate) fn make_token_pub(&self, kind: TokenKind, start_pos: usize, start_line: u32, start_col: u32) -> Token {
        self.make_token(kind, start_pos, start_line, start_col)
    }

    pub(crate) fn error_here_pub(&self, message: impl Into<String>, start_pos: usize, start_line: u32, start_col: u32) -> SourceError {
        self.error_here(message, start_pos, start_line, start_col)
    }

    pub(crate) fn expected_char_here_pub(&self, message: impl Into<String>, start_pos: usize, start_line: u32, start_col: u32) -> SourceError {
        self.expected_char_here(message, start_pos, start_line, start_col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use techzen_util::span::FileId;

    fn tokenize(src: &str) -> Vec<TokenKind> {
        Lexer::new(src, FileId::DUMMY)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn empty_source_is_just_eof() {
        assert_eq!(tokenize(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn skips_inline_whitespace_but_keeps_newlines() {
        let kinds = tokenize("1 + 1\n2");
        assert!(kinds.iter().any(|k| matches!(k, TokenKind::Newline)));
    }

    #[test]
    fn single_hash_comment_runs_to_end_of_line() {
        let kinds = tokenize("1 # trailing comment\n2");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Int(1),
                TokenKind::Newline,
                TokenKind::Int(2),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn illegal_character_is_fatal() {
        let result = Lexer::new("1 $ 2", FileId::DUMMY).tokenize();
        assert!(result.is_err());
    }
}
