use techzen_lex::{Keyword, TokenKind};

use super::core::Parser;
use super::result::ParseResult;
use crate::ast::{CaseBranch, Node, Param};

impl Parser {
    /// `LSQUARE (expr (COMMA expr)*)? RSQUARE`
    pub(crate) fn list_expr(&mut self) -> ParseResult {
        let mut result = ParseResult::new();
        let start = self.current().span;

        if !self.is_kind(&TokenKind::LSquare) {
            return result.failure(self.invalid_syntax("expected '['"));
        }
        result.register_advancement();
        self.advance();

        let mut elements = Vec::new();
        if !self.is_kind(&TokenKind::RSquare) {
            let first = match result.register(self.expr()) {
                Some(node) => node,
                None => return result,
            };
            elements.push(first);
            while self.is_kind(&TokenKind::Comma) {
                result.register_advancement();
                self.advance();
                let next = match result.register(self.expr()) {
                    Some(node) => node,
                    None => return result,
                };
                elements.push(next);
            }
        }

        if !self.is_kind(&TokenKind::RSquare) {
            return result.failure(self.invalid_syntax("expected ']' or ','"));
        }
        result.register_advancement();
        self.advance();

        let span = self.span_from(start);
        result.success(Node::List { elements, span })
    }

    /// `LCURLY (expr COLON expr (COMMA expr COLON expr)*)? RCURLY`
    pub(crate) fn dict_expr(&mut self) -> ParseResult {
        let mut result = ParseResult::new();
        let start = self.current().span;

        if !self.is_kind(&TokenKind::LCurly) {
            return result.failure(self.invalid_syntax("expected '{'"));
        }
        result.register_advancement();
        self.advance();

        let mut pairs = Vec::new();
        if !self.is_kind(&TokenKind::RCurly) {
            let pair = match self.dict_pair(&mut result) {
                Some(pair) => pair,
                None => return result,
            };
            pairs.push(pair);
            while self.is_kind(&TokenKind::Comma) {
                result.register_advancement();
                self.advance();
                let pair = match self.dict_pair(&mut result) {
                    Some(pair) => pair,
                    None => return result,
                };
                pairs.push(pair);
            }
        }

        if !self.is_kind(&TokenKind::RCurly) {
            return result.failure(self.invalid_syntax("expected '}' or ','"));
        }
        result.register_advancement();
        self.advance();

        let span = self.span_from(start);
        result.success(Node::Dict { pairs, span })
    }

    /// `expr COLON expr`, folded into the caller's `ParseResult`. Returns
    /// `None` (with the error already recorded on `result`) on failure.
    fn dict_pair(&mut self, result: &mut ParseResult) -> Option<(Node, Node)> {
        let key = result.register(self.expr())?;
        if !self.is_kind(&TokenKind::Colon) {
            result.error = Some(self.invalid_syntax("expected ':'"));
            return None;
        }
        result.register_advancement();
        self.advance();
        let value = result.register(self.expr())?;
        Some((key, value))
    }

    /// `KEYWORD:IF expr KEYWORD:THEN (statement (if-b|if-c)? | NEWLINE statements (END|if-b|if-c))`
    pub(crate) fn if_expr(&mut self) -> ParseResult {
        self.if_expr_cases(Keyword::If)
    }

    fn if_expr_cases(&mut self, keyword: Keyword) -> ParseResult {
        let mut result = ParseResult::new();
        let start = self.current().span;
        let mut cases = Vec::new();
        let mut else_case: Option<(Box<Node>, bool)> = None;

        if !self.current().is_keyword(keyword) {
            return result.failure(self.invalid_syntax(format!("expected '{}'", keyword.as_str())));
        }
        result.register_advancement();
        self.advance();

        let condition = match result.register(self.expr()) {
            Some(node) => node,
            None => return result,
        };

        if !self.current().is_keyword(Keyword::Then) {
            return result.failure(self.invalid_syntax("expected 'THEN'"));
        }
        result.register_advancement();
        self.advance();

        if self.is_newline() {
            result.register_advancement();
            self.advance();
            let body = match result.register(self.statements()) {
                Some(node) => node,
                None => return result,
            };
            cases.push(CaseBranch {
                condition,
                body,
                should_return_value: false,
            });

            if self.current().is_keyword(Keyword::End) {
                result.register_advancement();
                self.advance();
            } else if self.current().is_keyword(Keyword::Elif) {
                let (more_cases, more_else) = match self.register_elif_chain(&mut result) {
                    Some(pair) => pair,
                    None => return result,
                };
                cases.extend(more_cases);
                else_case = more_else;
            } else if self.current().is_keyword(Keyword::Else) {
                result.register_advancement();
                self.advance();
                if self.is_newline() {
                    result.register_advancement();
                    self.advance();
                    let body = match result.register(self.statements()) {
                        Some(node) => node,
                        None => return result,
                    };
                    if !self.current().is_keyword(Keyword::End) {
                        return result.failure(self.invalid_syntax("expected 'END'"));
                    }
                    result.register_advancement();
                    self.advance();
                    else_case = Some((Box::new(body), false));
                } else {
                    let body = match result.register(self.statement()) {
                        Some(node) => node,
                        None => return result,
                    };
                    else_case = Some((Box::new(body), true));
                }
            } else {
                return result.failure(self.invalid_syntax("expected 'END', 'ELIF' or 'ELSE'"));
            }
        } else {
            let body = match result.register(self.statement()) {
                Some(node) => node,
                None => return result,
            };
            cases.push(CaseBranch {
                condition,
                body,
                should_return_value: true,
            });

            if self.current().is_keyword(Keyword::Elif) {
                let (more_cases, more_else) = match self.register_elif_chain(&mut result) {
                    Some(pair) => pair,
                    None => return result,
                };
                cases.extend(more_cases);
                else_case = more_else;
            } else if self.current().is_keyword(Keyword::Else) {
                result.register_advancement();
                self.advance();
                let body = match result.register(self.statement()) {
                    Some(node) => node,
                    None => return result,
                };
                else_case = Some((Box::new(body), true));
            }
        }

        let span = self.span_from(start);
        result.success(Node::If { cases, else_case, span })
    }

    fn register_elif_chain(&mut self, result: &mut ParseResult) -> Option<(Vec<CaseBranch>, Option<(Box<Node>, bool)>)> {
        let elif = match result.register(self.if_expr_cases(Keyword::Elif)) {
            Some(node) => node,
            None => return None,
        };
        match elif {
            Node::If { cases, else_case, .. } => Some((cases, else_case)),
            other => unreachable!("if_expr_cases always returns Node::If, got {other:?}"),
        }
    }

    /// `KEYWORD:FOR IDENTIFIER EQ expr KEYWORD:TO expr (KEYWORD:STEP expr)? KEYWORD:THEN (statement | NEWLINE statements END)`
    pub(crate) fn for_expr(&mut self) -> ParseResult {
        let mut result = ParseResult::new();
        let start = self.current().span;

        if !self.current().is_keyword(Keyword::For) {
            return result.failure(self.invalid_syntax("expected 'FOR'"));
        }
        result.register_advancement();
        self.advance();

        let var_name = match &self.current().kind {
            TokenKind::Identifier(name) => name.clone(),
            _ => return result.failure(self.invalid_syntax("expected identifier")),
        };
        result.register_advancement();
        self.advance();

        if !self.is_kind(&TokenKind::Eq) {
            return result.failure(self.invalid_syntax("expected '='"));
        }
        result.register_advancement();
        self.advance();

        let start_value = match result.register(self.expr()) {
            Some(node) => node,
            None => return result,
        };

        if !self.current().is_keyword(Keyword::To) {
            return result.failure(self.invalid_syntax("expected 'TO'"));
        }
        result.register_advancement();
        self.advance();

        let end_value = match result.register(self.expr()) {
            Some(node) => node,
            None => return result,
        };

        let step_value = if self.current().is_keyword(Keyword::Step) {
            result.register_advancement();
            self.advance();
            match result.register(self.expr()) {
                Some(node) => Some(Box::new(node)),
                None => return result,
            }
        } else {
            None
        };

        if !self.current().is_keyword(Keyword::Then) {
            return result.failure(self.invalid_syntax("expected 'THEN'"));
        }
        result.register_advancement();
        self.advance();

        let (body, should_return_value) = if self.is_newline() {
            result.register_advancement();
            self.advance();
            let body = match result.register(self.statements()) {
                Some(node) => node,
                None => return result,
            };
            if !self.current().is_keyword(Keyword::End) {
                return result.failure(self.invalid_syntax("expected 'END'"));
            }
            result.register_advancement();
            self.advance();
            (body, false)
        } else {
            let body = match result.register(self.statement()) {
                Some(node) => node,
                None => return result,
            };
            (body, true)
        };

        let span = self.span_from(start);
        result.success(Node::For {
            var_name,
            start: Box::new(start_value),
            end: Box::new(end_value),
            step: step_value,
            body: Box::new(body),
            should_return_value,
            span,
        })
    }

    /// `KEYWORD:WHILE expr KEYWORD:THEN (statement | NEWLINE statements END)`
    pub(crate) fn while_expr(&mut self) -> ParseResult {
        let mut result = ParseResult::new();
        let start = self.current().span;

        if !self.current().is_keyword(Keyword::While) {
            return result.failure(self.invalid_syntax("expected 'WHILE'"));
        }
        result.register_advancement();
        self.advance();

        let condition = match result.register(self.expr()) {
            Some(node) => node,
            None => return result,
        };

        if !self.current().is_keyword(Keyword::Then) {
            return result.failure(self.invalid_syntax("expected 'THEN'"));
        }
        result.register_advancement();
        self.advance();

        let (body, should_return_value) = if self.is_newline() {
            result.register_advancement();
            self.advance();
            let body = match result.register(self.statements()) {
                Some(node) => node,
                None => return result,
            };
            if !self.current().is_keyword(Keyword::End) {
                return result.failure(self.invalid_syntax("expected 'END'"));
            }
            result.register_advancement();
            self.advance();
            (body, false)
        } else {
            let body = match result.register(self.statement()) {
                Some(node) => node,
                None => return result,
            };
            (body, true)
        };

        let span = self.span_from(start);
        result.success(Node::While {
            condition: Box::new(condition),
            body: Box::new(body),
            should_return_value,
            span,
        })
    }

    /// `KEYWORD:FUN IDENTIFIER? LPAREN (IDENTIFIER (COMMA IDENTIFIER)*)? RPAREN (ARROW expr | NEWLINE statements END)`
    pub(crate) fn func_def(&mut self) -> ParseResult {
        let mut result = ParseResult::new();
        let start = self.current().span;

        if !self.current().is_keyword(Keyword::Fun) {
            return result.failure(self.invalid_syntax("expected 'FUN'"));
        }
        result.register_advancement();
        self.advance();

        let name = if let TokenKind::Identifier(name) = &self.current().kind {
            let name = name.clone();
            result.register_advancement();
            self.advance();
            Some(name)
        } else {
            None
        };

        if !self.is_kind(&TokenKind::LParen) {
            return result.failure(self.invalid_syntax("expected '('"));
        }
        result.register_advancement();
        self.advance();

        let mut params = Vec::new();
        if let TokenKind::Identifier(name) = self.current().kind.clone() {
            let span = self.current().span;
            result.register_advancement();
            self.advance();
            params.push(Param { name, span });

            while self.is_kind(&TokenKind::Comma) {
                result.register_advancement();
                self.advance();
                let (name, span) = match &self.current().kind {
                    TokenKind::Identifier(name) => (name.clone(), self.current().span),
                    _ => return result.failure(self.invalid_syntax("expected identifier")),
                };
                result.register_advancement();
                self.advance();
                params.push(Param { name, span });
            }
        }

        if !self.is_kind(&TokenKind::RParen) {
            return result.failure(self.invalid_syntax("expected ')' or ','"));
        }
        result.register_advancement();
        self.advance();

        if self.is_kind(&TokenKind::Arrow) {
            result.register_advancement();
            self.advance();
            let body = match result.register(self.expr()) {
                Some(node) => node,
                None => return result,
            };
            let span = self.span_from(start);
            return result.success(Node::FuncDef {
                name,
                params,
                body: Box::new(body),
                should_auto_return: true,
                span,
            });
        }

        if !self.is_newline() {
            return result.failure(self.invalid_syntax("expected '->' or newline"));
        }
        result.register_advancement();
        self.advance();

        let body = match result.register(self.statements()) {
            Some(node) => node,
            None => return result,
        };

        if !self.current().is_keyword(Keyword::End) {
            return result.failure(self.invalid_syntax("expected 'END'"));
        }
        result.register_advancement();
        self.advance();

        let span = self.span_from(start);
        result.success(Node::FuncDef {
            name,
            params,
            body: Box::new(body),
            should_auto_return: false,
            span,
        })
    }

    /// `KEYWORD:CLASS IDENTIFIER NEWLINE statements END`
    pub(crate) fn class_node(&mut self) -> ParseResult {
        let mut result = ParseResult::new();
        let start = self.current().span;

        if !self.current().is_keyword(Keyword::Class) {
            return result.failure(self.invalid_syntax("expected 'CLASS'"));
        }
        result.register_advancement();
        self.advance();

        let name = match &self.current().kind {
            TokenKind::Identifier(name) => name.clone(),
            _ => return result.failure(self.invalid_syntax("expected identifier")),
        };
        result.register_advancement();
        self.advance();

        if !self.is_newline() {
            return result.failure(self.invalid_syntax("expected newline"));
        }
        result.register_advancement();
        self.advance();

        let body = match result.register(self.statements()) {
            Some(node) => node,
            None => return result,
        };

        if !self.current().is_keyword(Keyword::End) {
            return result.failure(self.invalid_syntax("expected 'END'"));
        }
        result.register_advancement();
        self.advance();

        let span = self.span_from(start);
        let members = match body {
            Node::Statements { statements, .. } => statements,
            other => vec![other],
        };
        result.success(Node::Class { name, body: members, span })
    }

    /// `KEYWORD:TRY NEWLINE statements KEYWORD:EXCEPT NEWLINE statements END`
    pub(crate) fn try_expr(&mut self) -> ParseResult {
        let mut result = ParseResult::new();
        let start = self.current().span;

        if !self.current().is_keyword(Keyword::Try) {
            return result.failure(self.invalid_syntax("expected 'TRY'"));
        }
        result.register_advancement();
        self.advance();

        if !self.is_newline() {
            return result.failure(self.invalid_syntax("expected newline"));
        }
        result.register_advancement();
        self.advance();

        let try_block = match result.register(self.statements()) {
            Some(node) => node,
            None => return result,
        };

        if !self.current().is_keyword(Keyword::Except) {
            return result.failure(self.invalid_syntax("expected 'EXCEPT'"));
        }
        result.register_advancement();
        self.advance();

        if !self.is_newline() {
            return result.failure(self.invalid_syntax("expected newline"));
        }
        result.register_advancement();
        self.advance();

        let except_block = match result.register(self.statements()) {
            Some(node) => node,
            None => return result,
        };

        if !self.current().is_keyword(Keyword::End) {
            return result.failure(self.invalid_syntax("expected 'END'"));
        }
        result.register_advancement();
        self.advance();

        let span = self.span_from(start);
        result.success(Node::Try {
            try_block: Box::new(try_block),
            except_block: Box::new(except_block),
            span,
        })
    }
}
