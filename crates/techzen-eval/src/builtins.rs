//! The built-in function table.
//!
//! Every `BuiltinId` dispatches here with its declared parameters already
//! arity-checked and bound into a throwaway frame, mirroring
//! `BuiltInFunction.execute`'s `check_and_populate_args` followed by a
//! `execute_<name>` method lookup - except the lookup is a `match` on
//! `BuiltinId` instead of `getattr` by string, per `spec.md` §9 "AST
//! dispatch".

use std::cell::RefCell;
use std::rc::Rc;

use techzen_lex::Lexer;
use techzen_par::Parser;
use techzen_util::span::Span;

use crate::context::Context;
use crate::control::{ok, Outcome, RtResult};
use crate::error::RuntimeError;
use crate::interpreter::call::check_arity;
use crate::interpreter::Interpreter;
use crate::symbol_table::SymbolTable;
use crate::value::{resolve_index, BuiltinId, ListHandle, NumberValue, Value, ValueKind};

pub(crate) fn call(interp: &mut Interpreter<'_>, id: BuiltinId, args: Vec<Value>, span: Span, ctx: &Rc<Context>) -> RtResult {
    check_arity(id.name(), id.param_names().len(), args.len(), span, ctx)?;
    let frame = bind_params(id, args, ctx);

    let value = match id {
        BuiltinId::Print => {
            let text = frame.get("value").unwrap().to_string();
            interp.io.print_line(&text);
            Value::null()
        }
        BuiltinId::PrintRet => Value::string(frame.get("value").unwrap().to_string()),
        BuiltinId::Input => {
            let question = frame.get("value").unwrap();
            let prompt = question.is_truthy().then(|| question.to_string());
            Value::string(interp.io.read_line(prompt.as_deref()))
        }
        BuiltinId::InputInt => {
            let question = frame.get("value").unwrap();
            let prompt = question.is_truthy().then(|| question.to_string());
            loop {
                let text = interp.io.read_line(prompt.as_deref());
                match text.trim().parse::<i64>() {
                    Ok(n) => break Value::int(n),
                    Err(_) => interp.io.print_line(&format!("'{text}' must be an integer. Try again!")),
                }
            }
        }
        BuiltinId::Clear => {
            interp.io.clear_screen();
            Value::null()
        }
        BuiltinId::IsNumber => predicate(matches!(frame.get("value").unwrap().kind, ValueKind::Number(_))),
        BuiltinId::IsString => predicate(matches!(frame.get("value").unwrap().kind, ValueKind::String(_))),
        BuiltinId::IsList => predicate(matches!(frame.get("value").unwrap().kind, ValueKind::List(_))),
        BuiltinId::IsDict => predicate(matches!(frame.get("value").unwrap().kind, ValueKind::Dict(_))),
        BuiltinId::IsFunction => predicate(matches!(
            frame.get("value").unwrap().kind,
            ValueKind::Function(_) | ValueKind::Builtin(_)
        )),
        BuiltinId::Append => {
            let list = require_list(&frame.get("list").unwrap(), span, ctx)?;
            list.borrow_mut().push(frame.get("value").unwrap());
            Value::null()
        }
        BuiltinId::Pop => {
            let list = require_list(&frame.get("list").unwrap(), span, ctx)?;
            let index = require_number(&frame.get("index").unwrap(), "Second argument must be number", span, ctx)?;
            let idx = resolve_index(list.borrow().len(), number_floor(index));
            match idx {
                Some(i) => list.borrow_mut().remove(i),
                None => {
                    return Err(RuntimeError::new(
                        span,
                        "Element at this index could not be removed from list because index is out of bounds",
                        ctx.clone(),
                    ))
                }
            }
        }
        BuiltinId::Extend => {
            let list_a = require_list(&frame.get("listA").unwrap(), span, ctx)?;
            let list_b = require_list_named(&frame.get("listB").unwrap(), "Second argument must be list", span, ctx)?;
            let extra: Vec<Value> = list_b.borrow().iter().cloned().collect();
            list_a.borrow_mut().extend(extra);
            Value::null()
        }
        BuiltinId::UpdateList => {
            let list = require_list(&frame.get("list").unwrap(), span, ctx)?;
            let index = require_number(&frame.get("index").unwrap(), "Second argument must be number", span, ctx)?;
            let replacement = frame.get("replacement").unwrap();
            let idx = resolve_index(list.borrow().len(), number_floor(index));
            match idx {
                Some(i) => list.borrow_mut()[i] = replacement,
                None => return Err(RuntimeError::new(span, "Index is out of bounds", ctx.clone())),
            }
            Value::from_kind(ValueKind::List(Rc::clone(&list)))
        }
        BuiltinId::Len => {
            let list = require_list(&frame.get("list").unwrap(), span, ctx)?;
            Value::int(list.borrow().len() as i64)
        }
        BuiltinId::Lower => Value::string(require_string(&frame.get("value").unwrap(), span, ctx)?.to_lowercase()),
        BuiltinId::Upper => Value::string(require_string(&frame.get("value").unwrap(), span, ctx)?.to_uppercase()),
        BuiltinId::StringOf => {
            let n = require_number(&frame.get("value").unwrap(), "Argument must be string", span, ctx)?;
            Value::string(n.to_string())
        }
        BuiltinId::Run => return run_script(interp, &frame.get("fn").unwrap(), span, ctx),
        BuiltinId::Exit => return Ok(Outcome::Exit(Value::null())),
    };
    ok(value.with_span(span).with_ctx(ctx.clone()))
}

/// Binds each declared parameter into a scratch frame so built-ins can read
/// them by name exactly like `exec_ctx.symbol_table.get(...)` in the
/// source, without needing a real call [`Context`].
fn bind_params(id: BuiltinId, args: Vec<Value>, ctx: &Rc<Context>) -> SymbolTable {
    let mut table = SymbolTable::new();
    for (name, value) in id.param_names().iter().zip(args) {
        table.set(*name, value.with_ctx(ctx.clone()));
    }
    table
}

fn predicate(b: bool) -> Value {
    Value::number(NumberValue::from_bool(b))
}

fn number_floor(n: NumberValue) -> i64 {
    match n {
        NumberValue::Int(i) => i,
        NumberValue::Float(f) => f.floor() as i64,
    }
}

fn require_list(value: &Value, span: Span, ctx: &Rc<Context>) -> Result<ListHandle, RuntimeError> {
    require_list_named(value, "First argument must be list", span, ctx)
}

fn require_list_named(value: &Value, message: &str, span: Span, ctx: &Rc<Context>) -> Result<ListHandle, RuntimeError> {
    match &value.kind {
        ValueKind::List(handle) => Ok(Rc::clone(handle)),
        _ => Err(RuntimeError::new(span, message, ctx.clone())),
    }
}

fn require_number(value: &Value, message: &str, span: Span, ctx: &Rc<Context>) -> Result<NumberValue, RuntimeError> {
    match &value.kind {
        ValueKind::Number(n) => Ok(*n),
        _ => Err(RuntimeError::new(span, message, ctx.clone())),
    }
}

fn require_string(value: &Value, span: Span, ctx: &Rc<Context>) -> Result<String, RuntimeError> {
    match &value.kind {
        ValueKind::String(s) => Ok(s.to_string()),
        _ => Err(RuntimeError::new(span, "Argument must be string", ctx.clone())),
    }
}

/// Re-enters the whole lex/parse/eval pipeline for an included script,
/// sharing the calling program's root symbol table - matching
/// `Runner.run`'s reuse of the process-wide `global_symbol_table`, except
/// the Rust root is walked from `ctx` instead of stored in a module-level
/// global.
fn run_script(interp: &mut Interpreter<'_>, filename: &Value, span: Span, ctx: &Rc<Context>) -> RtResult {
    let path = require_string(filename, span, ctx)?;

    let script = interp
        .loader
        .load(&path)
        .map_err(|e| RuntimeError::new(span, format!("Failed to load script \"{path}\"\n{e}"), ctx.clone()))?;

    let file_id = interp.source_map.borrow_mut().add_file(path.clone(), script.clone());
    let tokens = Lexer::new(&script, file_id)
        .tokenize()
        .map_err(|e| RuntimeError::new(span, format!("Failed to finish executing script \"{path}\"\n{e}"), ctx.clone()))?;
    let ast = Parser::parse(tokens)
        .map_err(|e| RuntimeError::new(span, format!("Failed to finish executing script \"{path}\"\n{e}"), ctx.clone()))?;

    let run_ctx = Context::program(Rc::clone(&root_table(ctx)));
    let outcome = interp
        .eval(&ast, &run_ctx)
        .map_err(|e| RuntimeError::new(span, format!("Failed to finish executing script \"{path}\"\n{}", e.detail), ctx.clone()))?;

    match outcome {
        Outcome::Exit(_) => Ok(Outcome::Exit(Value::null().with_span(span).with_ctx(ctx.clone()))),
        _ => ok(Value::null().with_span(span).with_ctx(ctx.clone())),
    }
}

fn root_table(ctx: &Rc<Context>) -> Rc<RefCell<SymbolTable>> {
    let mut current = Rc::clone(ctx);
    loop {
        match current.parent.clone() {
            Some(parent) => current = parent,
            None => return Rc::clone(&current.symbol_table),
        }
    }
}

/// Registers every global binding a fresh program starts with: `null`,
/// `true`, `false`, `math_pi`, and every named built-in - the Rust
/// equivalent of the source's module-level `global_symbol_table.set(...)`
/// calls.
pub fn global_symbol_table() -> SymbolTable {
    let mut table = SymbolTable::new();
    table.set("null", Value::null());
    table.set("true", Value::true_());
    table.set("false", Value::false_());
    table.set("math_pi", Value::float(std::f64::consts::PI));
    for id in BuiltinId::ALL {
        table.set(id.name(), Value::builtin(id));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::{HostIo, SourceLoader};
    use techzen_util::span::SourceMap;

    struct CapturingIo {
        printed: Vec<String>,
    }
    impl HostIo for CapturingIo {
        fn print_line(&mut self, text: &str) {
            self.printed.push(text.to_string());
        }
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

    fn ctx() -> Rc<Context> {
        Context::program(Rc::new(RefCell::new(global_symbol_table())))
    }

    #[test]
    fn global_table_exposes_null_true_false_and_math_pi() {
        let table = global_symbol_table();
        assert!(table.get("null").is_some());
        assert!(table.get("true").is_some());
        assert_eq!(table.get("math_pi").unwrap().to_string(), std::f64::consts::PI.to_string());
        assert!(table.get("print").is_some());
    }

    #[test]
    fn print_writes_through_host_io() {
        let mut io = CapturingIo { printed: Vec::new() };
        let source_map = RefCell::new(SourceMap::new());
        let loader = NoLoader;
        let mut interp = Interpreter::new(&mut io, &loader, &source_map);
        let c = ctx();
        let outcome = call(&mut interp, BuiltinId::Print, vec![Value::int(5)], Span::DUMMY, &c).unwrap();
        assert!(matches!(outcome, Outcome::Value(_)));
        assert_eq!(io.printed, vec!["5".to_string()]);
    }

    #[test]
    fn append_requires_a_list_first_argument() {
        let mut io = CapturingIo { printed: Vec::new() };
        let source_map = RefCell::new(SourceMap::new());
        let loader = NoLoader;
        let mut interp = Interpreter::new(&mut io, &loader, &source_map);
        let c = ctx();
        let err = call(&mut interp, BuiltinId::Append, vec![Value::int(1), Value::int(2)], Span::DUMMY, &c).unwrap_err();
        assert_eq!(err.to_string(), "Runtime Error: First argument must be list");
    }

    #[test]
    fn pop_out_of_bounds_reports_the_exact_source_wording() {
        let mut io = CapturingIo { printed: Vec::new() };
        let source_map = RefCell::new(SourceMap::new());
        let loader = NoLoader;
        let mut interp = Interpreter::new(&mut io, &loader, &source_map);
        let c = ctx();
        let list = Value::list(vec![]);
        let err = call(&mut interp, BuiltinId::Pop, vec![list, Value::int(0)], Span::DUMMY, &c).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Runtime Error: Element at this index could not be removed from list because index is out of bounds"
        );
    }

    #[test]
    fn exit_unwinds_as_an_outcome_not_an_error() {
        let mut io = CapturingIo { printed: Vec::new() };
        let source_map = RefCell::new(SourceMap::new());
        let loader = NoLoader;
        let mut interp = Interpreter::new(&mut io, &loader, &source_map);
        let c = ctx();
        let outcome = call(&mut interp, BuiltinId::Exit, vec![], Span::DUMMY, &c).unwrap();
        assert!(matches!(outcome, Outcome::Exit(_)));
    }
}
