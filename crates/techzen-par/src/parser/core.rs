use techzen_lex::{Token, TokenKind};
use techzen_util::error::SourceError;
use techzen_util::span::Span;

use super::result::ParseResult;
use crate::ast::Node;

/// Recursive-descent parser over a pre-scanned token stream.
///
/// Holds its own cursor (`tok_idx`) rather than an iterator so rules can
/// freely rewind after a speculative attempt fails (see
/// [`ParseResult::try_register`]).
pub struct Parser {
    tokens: Vec<Token>,
    tok_idx: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, tok_idx: 0 }
    }

    /// Parse an entire source file as a top-level statement list and
    /// require every token to be consumed.
    pub fn parse(tokens: Vec<Token>) -> Result<Node, SourceError> {
        let mut parser = Parser::new(tokens);
        let result = parser.statements();
        if let Some(err) = result.error {
            return Err(err);
        }
        let node = result.node.expect("ParseResult with no error must carry a node");
        if !parser.current().is_eof() {
            return Err(SourceError::invalid_syntax(
                "expected an operator",
                parser.current().span,
            ));
        }
        Ok(node)
    }

    pub(crate) fn current(&self) -> &Token {
        &self.tokens[self.tok_idx.min(self.tokens.len() - 1)]
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if self.tok_idx < self.tokens.len() - 1 {
            self.tok_idx += 1;
        }
        self.current()
    }

    pub(crate) fn reverse(&mut self, amount: usize) -> &Token {
        self.tok_idx = self.tok_idx.saturating_sub(amount);
        self.current()
    }

    pub(crate) fn is_kind(&self, kind: &TokenKind) -> bool {
        &self.current().kind == kind
    }

    pub(crate) fn is_newline(&self) -> bool {
        matches!(self.current().kind, TokenKind::Newline)
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.current().is_eof()
    }

    /// Consume zero or more `Newline` tokens, returning how many were
    /// skipped (mirrored into the caller's `ParseResult` advancement).
    pub(crate) fn skip_newlines(&mut self, result: &mut ParseResult) {
        while self.is_newline() {
            result.register_advancement();
            self.advance();
        }
    }

    pub(crate) fn invalid_syntax(&self, message: impl Into<String>) -> SourceError {
        SourceError::invalid_syntax(message, self.current().span)
    }

    pub(crate) fn span_from(&self, start: Span) -> Span {
        start.to(self.current().span)
    }
}

pub(crate) trait TokenExt {
    fn is_eof(&self) -> bool;
}

impl TokenExt for Token {
    fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use techzen_lex::Lexer;
    use techzen_util::span::FileId;

    fn tokens(src: &str) -> Vec<Token> {
        Lexer::new(src, FileId::DUMMY).tokenize().unwrap()
    }

    #[test]
    fn parses_single_number_statement() {
        let node = Parser::parse(tokens("42")).unwrap();
        match node {
            Node::Statements { statements, .. } => {
                assert_eq!(statements.len(), 1);
            }
            other => panic!("expected Statements, got {other:?}"),
        }
    }

    #[test]
    fn trailing_garbage_is_a_syntax_error() {
        let result = Parser::parse(tokens("1 2"));
        assert!(result.is_err());
    }
}
