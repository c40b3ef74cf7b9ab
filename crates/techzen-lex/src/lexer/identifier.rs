use super::core::Lexer;
use crate::token::{Keyword, Token, TokenKind};
use crate::unicode::is_ident_continue;

impl<'source> Lexer<'source> {
    /// Scans an identifier or keyword. Keyword matching is
    /// case-insensitive (`VAR`, `Var` and `var` all become the same
    /// keyword); anything that doesn't upper-case to a reserved word
    /// becomes a plain identifier.
    pub(crate) fn make_identifier_or_keyword(&mut self, start_pos: usize, start_line: u32, start_col: u32) -> Token {
        let mut text = String::new();
        while let Some(c) = self.cursor().current_char() {
            if is_ident_continue(c) {
                text.push(c);
                self.cursor_mut().advance();
            } else {
                break;
            }
        }

        let kind = match Keyword::from_str(&text) {
            Some(kw) => TokenKind::Keyword(kw),
            None => TokenKind::Identifier(text),
        };

        self.make_token_pub(kind, start_pos, start_line, start_col)
    }
}

#[cfg(test)]
mod tests {
    use techzen_util::span::FileId;

    use crate::lexer::Lexer;
    use crate::token::{Keyword, TokenKind};

    #[test]
    fn scans_keyword() {
        let tokens = Lexer::new("VAR", FileId::DUMMY).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::Var));
    }

    #[test]
    fn scans_identifier() {
        let tokens = Lexer::new("my_var", FileId::DUMMY).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Identifier("my_var".to_string()));
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let tokens = Lexer::new("If", FileId::DUMMY).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::If));
        let tokens = Lexer::new("var", FileId::DUMMY).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::Var));
    }
}
