//! techzen-par - recursive-descent parsing of the TechZen token stream
//! into an AST.
//!
//! [`Parser::parse`] is the only entry point a caller needs; the grammar
//! itself is split across `parser::expr` (the precedence chain) and
//! `parser::stmt` (the block-structured forms: `if`/`for`/`while`/`fun`/
//! `class`/`try`, plus list/dict literals).

pub mod ast;
mod parser;

pub use ast::{BinOpKind, CaseBranch, Node, NumberLiteral, Param, UnaryOpKind};
pub use parser::Parser;

#[cfg(test)]
mod tests {
    use techzen_lex::Lexer;
    use techzen_util::span::FileId;

    use super::*;

    fn parse(src: &str) -> Node {
        let tokens = Lexer::new(src, FileId::DUMMY).tokenize().expect("lex failed");
        Parser::parse(tokens).expect("parse failed")
    }

    fn first_statement(node: Node) -> Node {
        match node {
            Node::Statements { mut statements, .. } => statements.remove(0),
            other => other,
        }
    }

    #[test]
    fn parses_var_assign() {
        let node = first_statement(parse("VAR x = 5"));
        assert!(matches!(node, Node::VarAssign { .. }));
    }

    #[test]
    fn parses_dotted_var_assign() {
        let node = first_statement(parse("VAR self.x = v"));
        match node {
            Node::AttrAssign { name, .. } => assert_eq!(name, "x"),
            other => panic!("expected AttrAssign, got {other:?}"),
        }
    }

    #[test]
    fn and_and_or_both_parse() {
        let and_node = first_statement(parse("1 == 1 AND 2 == 2"));
        let or_node = first_statement(parse("1 == 1 OR 2 == 3"));
        match (and_node, or_node) {
            (Node::BinOp { op: and_op, .. }, Node::BinOp { op: or_op, .. }) => {
                assert_eq!(and_op, BinOpKind::And);
                assert_eq!(or_op, BinOpKind::Or);
            }
            other => panic!("expected BinOp pair, got {other:?}"),
        }
    }

    #[test]
    fn parses_arithmetic_precedence() {
        let node = first_statement(parse("1 + 2 * 3"));
        match node {
            Node::BinOp { op, right, .. } => {
                assert_eq!(op, BinOpKind::Plus);
                assert!(matches!(*right, Node::BinOp { op: BinOpKind::Mul, .. }));
            }
            other => panic!("expected BinOp, got {other:?}"),
        }
    }

    #[test]
    fn parses_class_with_constructor() {
        let node = parse("CLASS A\nFUN A(v)\nVAR self.x = v\nEND\nEND");
        match first_statement(node) {
            Node::Class { name, body, .. } => {
                assert_eq!(name, "A");
                assert_eq!(body.len(), 1);
                assert!(matches!(body[0], Node::FuncDef { .. }));
            }
            other => panic!("expected Class, got {other:?}"),
        }
    }

    #[test]
    fn parses_try_except() {
        let node = parse("TRY\n1 / 0\nEXCEPT\nVAR r = \"ok\"\nEND");
        assert!(matches!(first_statement(node), Node::Try { .. }));
    }

    #[test]
    fn parses_single_line_if_else() {
        let node = first_statement(parse("IF 1 == 1 THEN 1 ELSE 2"));
        match node {
            Node::If { cases, else_case, .. } => {
                assert_eq!(cases.len(), 1);
                assert!(else_case.is_some());
            }
            other => panic!("expected If, got {other:?}"),
        }
    }

    #[test]
    fn parses_multiline_for() {
        let node = parse("FOR i = 0 TO 5 THEN\nVAR x = i\nEND");
        match first_statement(node) {
            Node::For { var_name, should_return_value, .. } => {
                assert_eq!(var_name, "i");
                assert!(!should_return_value);
            }
            other => panic!("expected For, got {other:?}"),
        }
    }

    #[test]
    fn dangling_operator_is_a_syntax_error() {
        let tokens = Lexer::new("1 +", FileId::DUMMY).tokenize().unwrap();
        assert!(Parser::parse(tokens).is_err());
    }
}
