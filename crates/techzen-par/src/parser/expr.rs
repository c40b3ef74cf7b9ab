use techzen_lex::{Keyword, TokenKind};

use super::core::Parser;
use super::result::ParseResult;
use crate::ast::{BinOpKind, Node, NumberLiteral, UnaryOpKind};

impl Parser {
    /// `NEWLINE* statement (NEWLINE+ statement)* NEWLINE*` - a block body.
    /// The first statement is mandatory; later ones are speculative so a
    /// run of trailing blank lines before `END`/`EOF` doesn't error.
    pub(crate) fn statements(&mut self) -> ParseResult {
        let mut result = ParseResult::new();
        let start = self.current().span;
        let mut list = Vec::new();

        self.skip_newlines(&mut result);

        let first = match result.register(self.statement()) {
            Some(node) => node,
            None => return result,
        };
        list.push(first);

        loop {
            let mut newlines = 0;
            while self.is_newline() {
                result.register_advancement();
                self.advance();
                newlines += 1;
            }
            if newlines == 0 {
                break;
            }
            let attempt = self.statement();
            match result.try_register(attempt) {
                Some(node) => list.push(node),
                None => {
                    self.reverse(result.to_reverse_count);
                    break;
                }
            }
        }

        let span = self.span_from(start);
        result.success(Node::Statements { statements: list, span })
    }

    /// `KEYWORD:RETURN expr? | KEYWORD:CONTINUE | KEYWORD:BREAK | expr`
    pub(crate) fn statement(&mut self) -> ParseResult {
        let mut result = ParseResult::new();
        let start = self.current().span;

        if self.current().is_keyword(Keyword::Return) {
            result.register_advancement();
            self.advance();
            let value = if self.is_newline() || self.is_eof() {
                None
            } else {
                let attempt = self.expr();
                match result.try_register(attempt) {
                    Some(node) => Some(Box::new(node)),
                    None => {
                        self.reverse(result.to_reverse_count);
                        None
                    }
                }
            };
            let span = self.span_from(start);
            return result.success(Node::Return { value, span });
        }

        if self.current().is_keyword(Keyword::Continue) {
            result.register_advancement();
            self.advance();
            return result.success(Node::Continue { span: start });
        }

        if self.current().is_keyword(Keyword::Break) {
            result.register_advancement();
            self.advance();
            return result.success(Node::Break { span: start });
        }

        match result.register(self.expr()) {
            Some(node) => result.success(node),
            None => result,
        }
    }

    /// `KEYWORD:VAR IDENTIFIER (DOT IDENTIFIER)* EQ expr | comp-expr ((AND|OR) comp-expr)*`
    ///
    /// Checking for both `AND` and `OR` here (rather than `AND` twice) is
    /// the one place this grammar differs from a literal transcription of
    /// the upstream interpreter's `expr` rule, which checks `KEYWORD:AND`
    /// in both positions of the binary-operator table and so never
    /// actually parses `OR`.
    pub(crate) fn expr(&mut self) -> ParseResult {
        let mut result = ParseResult::new();
        let start = self.current().span;

        if self.current().is_keyword(Keyword::Var) {
            result.register_advancement();
            self.advance();

            let first_name = match &self.current().kind {
                TokenKind::Identifier(name) => name.clone(),
                _ => return result.failure(self.invalid_syntax("expected identifier")),
            };
            let first_span = self.current().span;
            result.register_advancement();
            self.advance();

            let mut names = vec![first_name];
            while self.is_kind(&TokenKind::Dot) {
                result.register_advancement();
                self.advance();
                let name = match &self.current().kind {
                    TokenKind::Identifier(name) => name.clone(),
                    _ => return result.failure(self.invalid_syntax("expected identifier after '.'")),
                };
                result.register_advancement();
                self.advance();
                names.push(name);
            }

            if !self.is_kind(&TokenKind::Eq) {
                return result.failure(self.invalid_syntax("expected '='"));
            }
            result.register_advancement();
            self.advance();

            let value = match result.register(self.expr()) {
                Some(node) => node,
                None => return result,
            };
            let span = self.span_from(start);

            let node = if names.len() == 1 {
                Node::VarAssign {
                    name: names.into_iter().next().unwrap(),
                    value: Box::new(value),
                    span,
                }
            } else {
                let assigned = names.pop().expect("at least one name");
                let mut base = Node::VarAccess {
                    name: names[0].clone(),
                    span: first_span,
                };
                for name in &names[1..] {
                    base = Node::AttrAccess {
                        base: Box::new(base),
                        name: name.clone(),
                        span: first_span,
                    };
                }
                Node::AttrAssign {
                    base: Box::new(base),
                    name: assigned,
                    value: Box::new(value),
                    span,
                }
            };
            return result.success(node);
        }

        self.binary_op(
            Parser::comp_expr,
            &[
                (TokenKind::Keyword(Keyword::And), BinOpKind::And),
                (TokenKind::Keyword(Keyword::Or), BinOpKind::Or),
            ],
        )
    }

    /// `NOT comp-expr | arith-expr ((EE|NE|LT|GT|LTE|GTE) arith-expr)*`
    pub(crate) fn comp_expr(&mut self) -> ParseResult {
        let mut result = ParseResult::new();
        let start = self.current().span;

        if self.current().is_keyword(Keyword::Not) {
            result.register_advancement();
            self.advance();
            let operand = match result.register(self.comp_expr()) {
                Some(node) => node,
                None => return result,
            };
            let span = self.span_from(start);
            return result.success(Node::UnaryOp {
                op: UnaryOpKind::Not,
                operand: Box::new(operand),
                span,
            });
        }

        self.binary_op(
            Parser::arith_expr,
            &[
                (TokenKind::Ee, BinOpKind::Ee),
                (TokenKind::Ne, BinOpKind::Ne),
                (TokenKind::Lt, BinOpKind::Lt),
                (TokenKind::Gt, BinOpKind::Gt),
                (TokenKind::Lte, BinOpKind::Lte),
                (TokenKind::Gte, BinOpKind::Gte),
            ],
        )
    }

    /// `term ((PLUS|MINUS) term)*`
    pub(crate) fn arith_expr(&mut self) -> ParseResult {
        self.binary_op(
            Parser::term,
            &[(TokenKind::Plus, BinOpKind::Plus), (TokenKind::Minus, BinOpKind::Minus)],
        )
    }

    /// `factor ((MUL|DIV|DFL|MOD) factor)*`
    pub(crate) fn term(&mut self) -> ParseResult {
        self.binary_op(
            Parser::factor,
            &[
                (TokenKind::Mul, BinOpKind::Mul),
                (TokenKind::Div, BinOpKind::Div),
                (TokenKind::Dfl, BinOpKind::Dfl),
                (TokenKind::Mod, BinOpKind::Mod),
            ],
        )
    }

    /// `(PLUS|MINUS) factor | power`
    pub(crate) fn factor(&mut self) -> ParseResult {
        let mut result = ParseResult::new();
        let start = self.current().span;

        let op = match self.current().kind {
            TokenKind::Plus => Some(UnaryOpKind::Plus),
            TokenKind::Minus => Some(UnaryOpKind::Minus),
            _ => None,
        };

        if let Some(op) = op {
            result.register_advancement();
            self.advance();
            let operand = match result.register(self.factor()) {
                Some(node) => node,
                None => return result,
            };
            let span = start.to(operand.span());
            return result.success(Node::UnaryOp {
                op,
                operand: Box::new(operand),
                span,
            });
        }

        self.power()
    }

    /// `call (POW factor)*` - the exponent binds through `factor`, not
    /// `power`, so `2 ^ -1` parses as `2 ^ (-1)` rather than requiring
    /// extra parens.
    pub(crate) fn power(&mut self) -> ParseResult {
        let mut result = ParseResult::new();
        let mut left = match result.register(self.call()) {
            Some(node) => node,
            None => return result,
        };

        while self.is_kind(&TokenKind::Pow) {
            result.register_advancement();
            self.advance();
            let right = match result.register(self.factor()) {
                Some(node) => node,
                None => return result,
            };
            let span = left.span().to(right.span());
            left = Node::BinOp {
                left: Box::new(left),
                op: BinOpKind::Pow,
                right: Box::new(right),
                span,
            };
        }

        result.success(left)
    }

    /// `atom (LPAREN (expr (COMMA expr)*)? RPAREN)? (DOT IDENTIFIER (LPAREN ... RPAREN)?)*`
    pub(crate) fn call(&mut self) -> ParseResult {
        let mut result = ParseResult::new();
        let mut node = match result.register(self.atom()) {
            Some(node) => node,
            None => return result,
        };

        loop {
            if self.is_kind(&TokenKind::LParen) {
                result.register_advancement();
                self.advance();

                let mut args = Vec::new();
                if !self.is_kind(&TokenKind::RParen) {
                    let arg = match result.register(self.expr()) {
                        Some(node) => node,
                        None => return result,
                    };
                    args.push(arg);
                    while self.is_kind(&TokenKind::Comma) {
                        result.register_advancement();
                        self.advance();
                        let arg = match result.register(self.expr()) {
                            Some(node) => node,
                            None => return result,
                        };
                        args.push(arg);
                    }
                }

                if !self.is_kind(&TokenKind::RParen) {
                    return result.failure(self.invalid_syntax("expected ')' or ','"));
                }
                let span = node.span().to(self.current().span);
                result.register_advancement();
                self.advance();
                node = Node::Call {
                    callee: Box::new(node),
                    args,
                    span,
                };
            } else if self.is_kind(&TokenKind::Dot) {
                result.register_advancement();
                self.advance();
                let name = match &self.current().kind {
                    TokenKind::Identifier(name) => name.clone(),
                    _ => return result.failure(self.invalid_syntax("expected identifier after '.'")),
                };
                let span = node.span().to(self.current().span);
                result.register_advancement();
                self.advance();
                node = Node::AttrAccess {
                    base: Box::new(node),
                    name,
                    span,
                };
            } else {
                break;
            }
        }

        result.success(node)
    }

    /// `INT|FLOAT|STRING|IDENTIFIER|LPAREN expr RPAREN|list-expr|dict-expr|if-expr|for-expr|while-expr|func-def|class-node|try-expr`
    pub(crate) fn atom(&mut self) -> ParseResult {
        let start = self.current().span;

        match self.current().kind.clone() {
            TokenKind::Int(value) => {
                let mut result = ParseResult::new();
                result.register_advancement();
                self.advance();
                result.success(Node::Number {
                    value: NumberLiteral::Int(value),
                    span: start,
                })
            }
            TokenKind::Float(value) => {
                let mut result = ParseResult::new();
                result.register_advancement();
                self.advance();
                result.success(Node::Number {
                    value: NumberLiteral::Float(value),
                    span: start,
                })
            }
            TokenKind::String(value) => {
                let mut result = ParseResult::new();
                result.register_advancement();
                self.advance();
                result.success(Node::StringLit { value, span: start })
            }
            TokenKind::Identifier(name) => {
                let mut result = ParseResult::new();
                result.register_advancement();
                self.advance();
                result.success(Node::VarAccess { name, span: start })
            }
            TokenKind::LParen => {
                let mut result = ParseResult::new();
                result.register_advancement();
                self.advance();
                let inner = match result.register(self.expr()) {
                    Some(node) => node,
                    None => return result,
                };
                if !self.is_kind(&TokenKind::RParen) {
                    return result.failure(self.invalid_syntax("expected ')'"));
                }
                result.register_advancement();
                self.advance();
                result.success(inner)
            }
            TokenKind::LSquare => self.list_expr(),
            TokenKind::LCurly => self.dict_expr(),
            TokenKind::Keyword(Keyword::If) => self.if_expr(),
            TokenKind::Keyword(Keyword::For) => self.for_expr(),
            TokenKind::Keyword(Keyword::While) => self.while_expr(),
            TokenKind::Keyword(Keyword::Fun) => self.func_def(),
            TokenKind::Keyword(Keyword::Class) => self.class_node(),
            TokenKind::Keyword(Keyword::Try) => self.try_expr(),
            _ => ParseResult::new().failure(self.invalid_syntax("expected an expression")),
        }
    }

    /// Generic left-associative binary-operator chain: `sub (OP sub)*`.
    /// `ops` is searched in order, so earlier entries shadow later ones if
    /// a token could ever match more than one (none currently do).
    pub(crate) fn binary_op(&mut self, sub: fn(&mut Parser) -> ParseResult, ops: &[(TokenKind, BinOpKind)]) -> ParseResult {
        let mut result = ParseResult::new();
        let mut left = match result.register(sub(self)) {
            Some(node) => node,
            None => return result,
        };

        loop {
            let matched = ops.iter().find(|(kind, _)| &self.current().kind == kind).map(|(_, op)| *op);
            let Some(op) = matched else { break };
            result.register_advancement();
            self.advance();
            let right = match result.register(sub(self)) {
                Some(node) => node,
                None => return result,
            };
            let span = left.span().to(right.span());
            left = Node::BinOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
                span,
            };
        }

        result.success(left)
    }
}
