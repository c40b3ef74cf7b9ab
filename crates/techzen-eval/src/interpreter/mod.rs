//! The tree-walking evaluator.
//!
//! [`Interpreter::eval`] is the single recursive entry point, matching
//! `interpreter_.py`'s `visit` dispatch table one arm per `Node` variant.
//! Non-value control flow (`return`/`continue`/`break`/`exit`) is threaded
//! through via [`crate::control::Outcome`] and the `step!` macro instead of
//! Python's `RTResult` flag bundle; everything else - symbol lookup,
//! operator dispatch, traceback contexts - is a direct port of the
//! corresponding `visit_*Node` method.

pub(crate) mod call;

use std::cell::RefCell;
use std::rc::Rc;

use techzen_par::{BinOpKind, Node, NumberLiteral, Param, UnaryOpKind};
use techzen_util::span::{SourceMap, Span};

use crate::context::Context;
use crate::control::{ok, step, Outcome, RtResult};
use crate::error::RuntimeError;
use crate::symbol_table::SymbolTable;
use crate::value::{ClassData, NumberValue, Value, ValueKind};

/// The console/host collaborator behind `print`/`input`/`input_int`/`clear`,
/// kept out of this crate so evaluation stays free of direct file or
/// terminal I/O.
pub trait HostIo {
    fn print_line(&mut self, text: &str);
    /// Blocks for one line of input, optionally preceded by a prompt
    /// (mirrors `input(question)`). The trailing newline is stripped.
    fn read_line(&mut self, prompt: Option<&str>) -> String;
    fn clear_screen(&mut self);
}

/// The `run` builtin's file-loading collaborator, kept abstract for the
/// same reason as [`HostIo`].
pub trait SourceLoader {
    fn load(&self, filename: &str) -> Result<String, String>;
}

/// Owns the host collaborators for one evaluation session and threads them
/// through every recursive `eval` call.
pub struct Interpreter<'a> {
    pub io: &'a mut dyn HostIo,
    pub loader: &'a dyn SourceLoader,
    pub source_map: &'a RefCell<SourceMap>,
}

impl<'a> Interpreter<'a> {
    pub fn new(io: &'a mut dyn HostIo, loader: &'a dyn SourceLoader, source_map: &'a RefCell<SourceMap>) -> Self {
        Self { io, loader, source_map }
    }

    pub fn eval(&mut self, node: &Node, ctx: &Rc<Context>) -> RtResult {
        match node {
            Node::Number { value, span } => ok(number_literal(*value).with_span(*span).with_ctx(ctx.clone())),
            Node::StringLit { value, span } => ok(Value::string(value.clone()).with_span(*span).with_ctx(ctx.clone())),
            Node::List { elements, span } => self.eval_sequence(elements, *span, ctx),
            Node::Statements { statements, span } => self.eval_sequence(statements, *span, ctx),
            Node::Dict { pairs, span } => self.eval_dict(pairs, *span, ctx),
            Node::VarAccess { name, span } => self.eval_var_access(name, *span, ctx),
            Node::AttrAccess { base, name, span } => self.eval_attr_access(base, name, *span, ctx),
            Node::VarAssign { name, value, span } => self.eval_var_assign(name, value, *span, ctx),
            Node::AttrAssign { base, name, value, span } => self.eval_attr_assign(base, name, value, *span, ctx),
            Node::BinOp { left, op, right, span } => self.eval_binop(left, *op, right, *span, ctx),
            Node::UnaryOp { op, operand, span } => self.eval_unaryop(*op, operand, *span, ctx),
            Node::If { cases, else_case, span } => self.eval_if(cases, else_case, *span, ctx),
            Node::For { var_name, start, end, step: step_node, body, should_return_value, span } => {
                self.eval_for(var_name, start, end, step_node.as_deref(), body, *should_return_value, *span, ctx)
            }
            Node::While { condition, body, should_return_value, span } => {
                self.eval_while(condition, body, *should_return_value, *span, ctx)
            }
            Node::FuncDef { name, params, body, should_auto_return, span } => {
                self.eval_funcdef(name, params, body, *should_auto_return, *span, ctx)
            }
            Node::Call { callee, args, span } => self.eval_call(callee, args, *span, ctx),
            Node::Return { value, span } => self.eval_return(value.as_deref(), *span, ctx),
            Node::Continue { .. } => Ok(Outcome::Continue),
            Node::Break { .. } => Ok(Outcome::Break),
            Node::Class { name, body, span } => self.eval_class(name, body, *span, ctx),
            Node::Try { try_block, except_block, .. } => self.eval_try(try_block, except_block, ctx),
        }
    }

    fn eval_sequence(&mut self, nodes: &[Node], span: Span, ctx: &Rc<Context>) -> RtResult {
        let mut values = Vec::with_capacity(nodes.len());
        for node in nodes {
            values.push(step!(self.eval(node, ctx)));
        }
        ok(Value::list(values).with_span(span).with_ctx(ctx.clone()))
    }

    fn eval_dict(&mut self, pairs: &[(Node, Node)], span: Span, ctx: &Rc<Context>) -> RtResult {
        let mut entries = Vec::with_capacity(pairs.len());
        for (key_node, value_node) in pairs {
            let key = step!(self.eval(key_node, ctx));
            let value = step!(self.eval(value_node, ctx));
            entries.push((key, value));
        }
        ok(Value::dict(entries).with_span(span).with_ctx(ctx.clone()))
    }

    fn eval_var_access(&mut self, name: &str, span: Span, ctx: &Rc<Context>) -> RtResult {
        let value = ctx
            .symbol_table
            .borrow()
            .get(name)
            .ok_or_else(|| RuntimeError::new(span, format!("'{name}' is not defined"), ctx.clone()))?;
        ok(value.copy().with_span(span).with_ctx(ctx.clone()))
    }

    fn eval_attr_access(&mut self, base: &Node, name: &str, span: Span, ctx: &Rc<Context>) -> RtResult {
        let base_val = step!(self.eval(base, ctx));
        let (table, display_name) = entity_table_and_name(&base_val)?;
        let member_ctx = ctx.for_member(display_name, span, table);
        let inner = step!(self.eval_var_access(name, span, &member_ctx));
        ok(inner.copy().with_span(span).with_ctx(ctx.clone()))
    }

    fn eval_var_assign(&mut self, name: &str, value_node: &Node, span: Span, ctx: &Rc<Context>) -> RtResult {
        let value = step!(self.eval(value_node, ctx));
        ctx.symbol_table.borrow_mut().set(name.to_string(), value.copy());
        ok(value.with_span(span).with_ctx(ctx.clone()))
    }

    fn eval_attr_assign(&mut self, base: &Node, name: &str, value_node: &Node, span: Span, ctx: &Rc<Context>) -> RtResult {
        let value = step!(self.eval(value_node, ctx));
        let entity = self.resolve_assign_target(base, ctx)?;
        let (table, _) = entity_table_and_name(&entity)?;
        table.borrow_mut().set(name.to_string(), value.copy());
        ok(value.with_span(span).with_ctx(ctx.clone()))
    }

    /// Resolves the object `base` names for a dotted assignment. The root
    /// of the chain is looked up through the full scope chain (miss ->
    /// `'{name}' not defined`, distinct from plain `VarAccess`'s wording);
    /// every hop after that is resolved directly against the previous
    /// entity's own frame, without falling back to an enclosing scope,
    /// since an intermediate hop can never itself be the binding being
    /// written.
    fn resolve_assign_target(&mut self, base: &Node, ctx: &Rc<Context>) -> Result<Value, RuntimeError> {
        match base {
            Node::VarAccess { name, span } => ctx
                .symbol_table
                .borrow()
                .get(name)
                .ok_or_else(|| RuntimeError::new(*span, format!("'{name}' not defined"), ctx.clone())),
            Node::AttrAccess { base: inner, name, span } => {
                let entity = self.resolve_assign_target(inner, ctx)?;
                let (table, _) = entity_table_and_name(&entity)?;
                let value = table.borrow().symbols.get(name).cloned();
                value.ok_or_else(|| RuntimeError::new(*span, format!("'{name}' not defined"), ctx.clone()))
            }
            other => match self.eval(other, ctx)? {
                Outcome::Value(v) => Ok(v),
                other => {
                    unreachable!("assignment target base is a non-value outcome: {:?}", matches!(other, Outcome::Value(_)))
                }
            },
        }
    }

    fn eval_binop(&mut self, left: &Node, op: BinOpKind, right: &Node, span: Span, ctx: &Rc<Context>) -> RtResult {
        let l = step!(self.eval(left, ctx));
        let r = step!(self.eval(right, ctx));
        let result = match op {
            BinOpKind::Plus => l.added_to(&r),
            BinOpKind::Minus => l.subbed_by(&r),
            BinOpKind::Mul => l.multed_by(&r),
            BinOpKind::Div => l.dived_by(&r),
            BinOpKind::Dfl => l.floor_of(&r),
            BinOpKind::Pow => l.pow_of(&r),
            BinOpKind::Mod => l.mod_by(&r),
            BinOpKind::Ee => l.comparison_eq(&r),
            BinOpKind::Ne => l.comparison_ne(&r),
            BinOpKind::Lt => l.comparison_lt(&r),
            BinOpKind::Gt => l.comparison_gt(&r),
            BinOpKind::Lte => l.comparison_lte(&r),
            BinOpKind::Gte => l.comparison_gte(&r),
            BinOpKind::And => l.anded_by(&r),
            BinOpKind::Or => l.ored_by(&r),
        }?;
        ok(result.with_span(span).with_ctx(ctx.clone()))
    }

    /// `number` is rebound to the operator's result before its position is
    /// set, so the final span is always the `UnaryOp` node's own span, not
    /// the operand's - preserved quirk rather than fixed.
    fn eval_unaryop(&mut self, op: UnaryOpKind, operand: &Node, span: Span, ctx: &Rc<Context>) -> RtResult {
        let value = step!(self.eval(operand, ctx));
        let result = match op {
            UnaryOpKind::Plus => value,
            UnaryOpKind::Minus => value.multed_by(&Value::int(-1))?,
            UnaryOpKind::Not => value.notted()?,
        };
        ok(result.with_span(span).with_ctx(ctx.clone()))
    }

    fn eval_if(
        &mut self,
        cases: &[techzen_par::CaseBranch],
        else_case: &Option<(Box<Node>, bool)>,
        span: Span,
        ctx: &Rc<Context>,
    ) -> RtResult {
        for case in cases {
            let condition = step!(self.eval(&case.condition, ctx));
            if condition.is_truthy() {
                let result = step!(self.eval(&case.body, ctx));
                let value = if case.should_return_value { result } else { Value::null() };
                return ok(value.with_span(span).with_ctx(ctx.clone()));
            }
        }
        if let Some((body, should_return_value)) = else_case {
            let result = step!(self.eval(body, ctx));
            let value = if *should_return_value { result } else { Value::null() };
            return ok(value.with_span(span).with_ctx(ctx.clone()));
        }
        ok(Value::null().with_span(span).with_ctx(ctx.clone()))
    }

    /// The loop variable is bound directly into `ctx`'s own frame rather
    /// than a nested one - a scope leak, preserved on purpose rather than
    /// fixed.
    #[allow(clippy::too_many_arguments)]
    fn eval_for(
        &mut self,
        var_name: &str,
        start: &Node,
        end: &Node,
        step_node: Option<&Node>,
        body: &Node,
        should_return_value: bool,
        span: Span,
        ctx: &Rc<Context>,
    ) -> RtResult {
        let start_val = step!(self.eval(start, ctx));
        let end_val = step!(self.eval(end, ctx));
        let step_val = match step_node {
            Some(node) => step!(self.eval(node, ctx)),
            None => Value::int(1),
        };
        let mut i = number_of(&start_val, span, ctx)?;
        let end_n = number_of(&end_val, span, ctx)?;
        let step_n = number_of(&step_val, span, ctx)?;
        let ascending = step_n.as_f64() >= 0.0;

        let mut results = Vec::new();
        loop {
            let keep_going = if ascending { i.lt(end_n) } else { i.gt(end_n) };
            if !keep_going {
                break;
            }
            ctx.symbol_table.borrow_mut().set(var_name.to_string(), Value::number(i).with_span(span).with_ctx(ctx.clone()));
            match self.eval(body, ctx)? {
                Outcome::Value(v) => results.push(v),
                Outcome::Continue => {}
                Outcome::Break => break,
                other @ (Outcome::Return(_) | Outcome::Exit(_)) => return Ok(other),
            }
            i = i.add(step_n);
        }

        let value = if should_return_value { Value::list(results) } else { Value::null() };
        ok(value.with_span(span).with_ctx(ctx.clone()))
    }

    fn eval_while(&mut self, condition: &Node, body: &Node, should_return_value: bool, span: Span, ctx: &Rc<Context>) -> RtResult {
        let mut results = Vec::new();
        loop {
            let condition_val = step!(self.eval(condition, ctx));
            if !condition_val.is_truthy() {
                break;
            }
            match self.eval(body, ctx)? {
                Outcome::Value(v) => results.push(v),
                Outcome::Continue => {}
                Outcome::Break => break,
                other @ (Outcome::Return(_) | Outcome::Exit(_)) => return Ok(other),
            }
        }
        let value = if should_return_value { Value::list(results) } else { Value::null() };
        ok(value.with_span(span).with_ctx(ctx.clone()))
    }

    fn eval_funcdef(
        &mut self,
        name: &Option<String>,
        params: &[Param],
        body: &Node,
        should_auto_return: bool,
        span: Span,
        ctx: &Rc<Context>,
    ) -> RtResult {
        let data = crate::value::FunctionData {
            name: name.clone(),
            params: params.iter().map(|p| p.name.clone()).collect(),
            body: Rc::new(body.clone()),
            should_auto_return,
            captured_ctx: ctx.clone(),
        };
        let value = Value::function(Rc::new(data)).with_span(span).with_ctx(ctx.clone());
        if let Some(n) = name {
            ctx.symbol_table.borrow_mut().set(n.clone(), value.copy());
        }
        ok(value)
    }

    fn eval_call(&mut self, callee: &Node, args: &[Node], span: Span, ctx: &Rc<Context>) -> RtResult {
        let callee_val = step!(self.eval(callee, ctx));
        let mut arg_values = Vec::with_capacity(args.len());
        for arg in args {
            arg_values.push(step!(self.eval(arg, ctx)));
        }
        let outcome = self.call_value(&callee_val, arg_values, span, ctx)?;
        match outcome {
            Outcome::Value(v) => ok(v.with_span(span).with_ctx(ctx.clone())),
            other => Ok(other),
        }
    }

    fn eval_return(&mut self, value: Option<&Node>, span: Span, ctx: &Rc<Context>) -> RtResult {
        let value = match value {
            Some(node) => step!(self.eval(node, ctx)),
            None => Value::null(),
        };
        Ok(Outcome::Return(value.with_span(span).with_ctx(ctx.clone())))
    }

    fn eval_class(&mut self, name: &str, body: &[Node], span: Span, ctx: &Rc<Context>) -> RtResult {
        let body_table = Rc::new(RefCell::new(SymbolTable::with_parent(Rc::clone(&ctx.symbol_table))));
        let body_ctx = ctx.for_member(name.to_string(), span, body_table);
        for stmt in body {
            step!(self.eval(stmt, &body_ctx));
        }
        let class_data = Rc::new(ClassData {
            name: name.to_string(),
            symbol_table: Rc::clone(&body_ctx.symbol_table),
            defining_ctx: ctx.clone(),
        });
        let value = Value::class(class_data).with_span(span).with_ctx(ctx.clone());
        ctx.symbol_table.borrow_mut().set(name.to_string(), value.copy());
        ok(value)
    }

    /// The source's `should_return()` is a single flag covering error,
    /// return, continue, break *and* exit alike, so `visit_TryNode` routes
    /// every one of them into the except block, not only genuine errors -
    /// a `break` or `exit()` left mid-try is caught exactly like a runtime
    /// error would be. Whichever branch runs, a plain value result collapses
    /// to null; only a still-interrupting outcome out of either block
    /// propagates further.
    fn eval_try(&mut self, try_block: &Node, except_block: &Node, ctx: &Rc<Context>) -> RtResult {
        match self.eval(try_block, ctx) {
            Ok(outcome) if !outcome.interrupts() => ok(Value::null()),
            Ok(_) => self.run_except(except_block, ctx),
            Err(_) => self.run_except(except_block, ctx),
        }
    }

    fn run_except(&mut self, except_block: &Node, ctx: &Rc<Context>) -> RtResult {
        match self.eval(except_block, ctx)? {
            outcome if !outcome.interrupts() => ok(Value::null()),
            outcome => Ok(outcome),
        }
    }
}

fn number_literal(value: NumberLiteral) -> Value {
    match value {
        NumberLiteral::Int(n) => Value::int(n),
        NumberLiteral::Float(f) => Value::float(f),
    }
}

fn number_of(value: &Value, span: Span, ctx: &Rc<Context>) -> Result<NumberValue, RuntimeError> {
    match &value.kind {
        ValueKind::Number(n) => Ok(*n),
        _ => Err(RuntimeError::illegal_operation(span, ctx.clone())),
    }
}

/// Class/instance member access and assignment both need "the symbol table
/// behind this value plus a name for traceback purposes" - factored out
/// since `AttrAccess`, `AttrAssign`, and instantiation all need it.
fn entity_table_and_name(value: &Value) -> Result<(Rc<RefCell<SymbolTable>>, String), RuntimeError> {
    match &value.kind {
        ValueKind::Class(data) => Ok((Rc::clone(&data.symbol_table), data.name.clone())),
        ValueKind::Instance(data) => Ok((Rc::clone(&data.symbol_table), data.parent_class.name.clone())),
        _ => Err(RuntimeError::new(
            value.span,
            "Value must be instance of class or class",
            value.ctx.clone().expect("value reaching member access always carries a context"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use techzen_lex::Lexer;
    use techzen_par::Parser;
    use techzen_util::span::FileId;

    struct NullIo;
    impl HostIo for NullIo {
        fn print_line(&mut self, _text: &str) {}
        fn read_line(&mut self, _prompt: Option<&str>) -> String {
            String::new()
        }
        fn clear_screen(&mut self) {}
    }

    struct NoLoader;
    impl SourceLoader for NoLoader {
        fn load(&self, filename: &str) -> Result<String, String> {
            Err(format!("no such file: {filename}"))
        }
    }

    fn run(src: &str) -> Result<Value, RuntimeError> {
        let source_map = RefCell::new(SourceMap::new());
        let file_id = source_map.borrow_mut().add_file("<test>", src);
        let tokens = Lexer::new(src, file_id).tokenize().expect("lex failed");
        let node = Parser::parse(tokens).expect("parse failed");
        let mut io = NullIo;
        let loader = NoLoader;
        let mut interp = Interpreter::new(&mut io, &loader, &source_map);
        let global = Rc::new(RefCell::new(SymbolTable::new()));
        let ctx = Context::program(global);
        interp.eval(&node, &ctx).map(Outcome::into_value)
    }

    fn run_one(src: &str) -> Value {
        let list = run(src).expect("eval failed");
        match &list.kind {
            ValueKind::List(handle) => handle.borrow().last().cloned().expect("at least one statement"),
            _ => list,
        }
    }

    #[test]
    fn evaluates_arithmetic() {
        assert_eq!(run_one("1 + 2 * 3").to_string(), "7");
    }

    #[test]
    fn var_assign_then_access() {
        assert_eq!(run_one("VAR x = 5\nx + 1").to_string(), "6");
    }

    #[test]
    fn var_access_missing_is_an_error() {
        let err = run("missing").unwrap_err();
        assert_eq!(err.to_string(), "Runtime Error: 'missing' is not defined");
    }

    #[test]
    fn if_expression_picks_the_true_branch() {
        assert_eq!(run_one("IF 1 == 1 THEN 10 ELSE 20").to_string(), "10");
    }

    #[test]
    fn for_loop_collects_results_when_requested() {
        let value = run_one("FOR i = 0 TO 3 THEN i");
        assert_eq!(value.to_string(), "0, 1, 2");
    }

    #[test]
    fn for_loop_leaks_its_variable_into_the_enclosing_scope() {
        assert_eq!(run_one("FOR i = 0 TO 3 THEN VAR x = i\ni").to_string(), "2");
    }

    #[test]
    fn function_call_returns_explicit_value() {
        let src = "FUN add(a, b)\nRETURN a + b\nEND\nadd(2, 3)";
        assert_eq!(run_one(src).to_string(), "5");
    }

    #[test]
    fn function_captures_its_defining_scope() {
        let src = "VAR y = 10\nFUN addY(x)\nRETURN x + y\nEND\naddY(5)";
        assert_eq!(run_one(src).to_string(), "15");
    }

    #[test]
    fn class_constructor_binds_self() {
        let src = "CLASS A\nFUN A(v)\nVAR self.x = v\nEND\nFUN get()\nRETURN self.x\nEND\nEND\nVAR a = A(9)\na.get()";
        assert_eq!(run_one(src).to_string(), "9");
    }

    #[test]
    fn wrong_arity_reports_too_few_args() {
        let src = "FUN add(a, b)\nRETURN a + b\nEND\nadd(1)";
        let err = run(src).unwrap_err();
        assert!(err.to_string().contains("too few args passed into 'add'"));
    }

    #[test]
    fn try_except_catches_a_runtime_error_but_the_try_node_itself_is_null() {
        assert_eq!(run_one("TRY\n1 / 0\nEXCEPT\nVAR r = 1\nEND").to_string(), "0");
    }

    #[test]
    fn try_except_recovers_via_a_wrapping_assignment() {
        assert_eq!(run_one("VAR r = 'fail'\nTRY\nVAR r = 1 / 0\nEXCEPT\nVAR r = 'ok'\nEND\nr").to_string(), "ok");
    }

    #[test]
    fn dotted_assignment_requires_class_or_instance() {
        let err = run("VAR x = 1\nVAR x.y = 2").unwrap_err();
        assert_eq!(err.to_string(), "Runtime Error: Value must be instance of class or class");
    }
}
