//! Abstract syntax tree node types.
//!
//! Every node is a plain data variant carrying its children by value
//! (wrapped in `Box` where recursion requires it) plus the `Span` it
//! covers. Dispatch over the tree is always a `match` in the evaluator —
//! there is no virtual-dispatch node hierarchy, mirroring the value
//! system's own closed sum-type design.

use techzen_util::span::Span;

#[derive(Clone, Debug, PartialEq)]
pub struct CaseBranch {
    pub condition: Node,
    pub body: Node,
    /// True when the branch used the single-line `-> expr` form, in
    /// which case the evaluator must wrap the result rather than
    /// returning Number::null by default.
    pub should_return_value: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: String,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Number {
        value: NumberLiteral,
        span: Span,
    },
    StringLit {
        value: String,
        span: Span,
    },
    List {
        elements: Vec<Node>,
        span: Span,
    },
    Dict {
        pairs: Vec<(Node, Node)>,
        span: Span,
    },
    VarAccess {
        name: String,
        span: Span,
    },
    /// Dotted access/assignment target, e.g. `this.x` or `obj.method()`.
    /// `child` is `None` for a plain `VarAccess`/`VarAssign`.
    AttrAccess {
        base: Box<Node>,
        name: String,
        span: Span,
    },
    VarAssign {
        name: String,
        value: Box<Node>,
        span: Span,
    },
    AttrAssign {
        base: Box<Node>,
        name: String,
        value: Box<Node>,
        span: Span,
    },
    BinOp {
        left: Box<Node>,
        op: BinOpKind,
        right: Box<Node>,
        span: Span,
    },
    UnaryOp {
        op: UnaryOpKind,
        operand: Box<Node>,
        span: Span,
    },
    If {
        cases: Vec<CaseBranch>,
        else_case: Option<(Box<Node>, bool)>,
        span: Span,
    },
    For {
        var_name: String,
        start: Box<Node>,
        end: Box<Node>,
        step: Option<Box<Node>>,
        body: Box<Node>,
        should_return_value: bool,
        span: Span,
    },
    While {
        condition: Box<Node>,
        body: Box<Node>,
        should_return_value: bool,
        span: Span,
    },
    FuncDef {
        name: Option<String>,
        params: Vec<Param>,
        body: Box<Node>,
        should_auto_return: bool,
        span: Span,
    },
    Call {
        callee: Box<Node>,
        args: Vec<Node>,
        span: Span,
    },
    Return {
        value: Option<Box<Node>>,
        span: Span,
    },
    Continue {
        span: Span,
    },
    Break {
        span: Span,
    },
    Class {
        name: String,
        body: Vec<Node>,
        span: Span,
    },
    Try {
        try_block: Box<Node>,
        except_block: Box<Node>,
        span: Span,
    },
    /// A brace-delimited sequence of statements, produced by `statements`
    /// and used as the body of blocks that aren't a single expression.
    Statements {
        statements: Vec<Node>,
        span: Span,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NumberLiteral {
    Int(i64),
    Float(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOpKind {
    Plus,
    Minus,
    Mul,
    Div,
    Dfl,
    Pow,
    Mod,
    Ee,
    Ne,
    Lt,
    Gt,
    Lte,
    Gte,
    And,
    Or,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOpKind {
    Plus,
    Minus,
    Not,
}

impl Node {
    pub fn span(&self) -> Span {
        match self {
            Node::Number { span, .. }
            | Node::StringLit { span, .. }
            | Node::List { span, .. }
            | Node::Dict { span, .. }
            | Node::VarAccess { span, .. }
            | Node::AttrAccess { span, .. }
            | Node::VarAssign { span, .. }
            | Node::AttrAssign { span, .. }
            | Node::BinOp { span, .. }
            | Node::UnaryOp { span, .. }
            | Node::If { span, .. }
            | Node::For { span, .. }
            | Node::While { span, .. }
            | Node::FuncDef { span, .. }
            | Node::Call { span, .. }
            | Node::Return { span, .. }
            | Node::Continue { span }
            | Node::Break { span }
            | Node::Class { span, .. }
            | Node::Try { span, .. }
            | Node::Statements { span, .. } => *span,
        }
    }
}
