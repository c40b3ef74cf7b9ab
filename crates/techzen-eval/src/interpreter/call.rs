//! Calling a value: functions, built-ins, and class instantiation.
//!
//! Split out of `mod.rs` because this is the one place the evaluator's
//! per-node `eval` dispatch gives way to a per-callable-kind dispatch,
//! mirroring `interpreter_.py`'s `visit_CallNode` handing off to
//! `Value.execute()`.

use std::rc::Rc;

use techzen_util::span::Span;

use super::Interpreter;
use crate::context::Context;
use crate::control::{ok, Outcome, RtResult};
use crate::error::RuntimeError;
use crate::value::{BuiltinId, ClassData, FunctionData, InstanceData, Value, ValueKind};

impl<'a> Interpreter<'a> {
    pub(super) fn call_value(&mut self, callee: &Value, args: Vec<Value>, span: Span, ctx: &Rc<Context>) -> RtResult {
        match &callee.kind {
            ValueKind::Function(data) => self.call_function(data, args, span),
            ValueKind::Builtin(id) => crate::builtins::call(self, *id, args, span, ctx),
            ValueKind::Class(data) => self.instantiate_class(callee, data, args, span),
            _ => Err(RuntimeError::illegal_operation(
                callee.span,
                callee.ctx.clone().expect("value reaching a call always carries a context"),
            )),
        }
    }

    /// Runs a user-defined function's body in a fresh frame parented on its
    /// captured context (never the call site), so free variables resolve
    /// lexically regardless of where the function happens to be invoked
    /// from.
    pub(super) fn call_function(&mut self, data: &Rc<FunctionData>, args: Vec<Value>, span: Span) -> RtResult {
        let name = data.display_name().to_string();
        check_arity(&name, data.params.len(), args.len(), span, &data.captured_ctx)?;

        let call_ctx = data.captured_ctx.child(name, span, Rc::clone(&data.captured_ctx.symbol_table));
        for (param, arg) in data.params.iter().zip(args) {
            call_ctx.symbol_table.borrow_mut().set(param.clone(), arg.with_ctx(Rc::clone(&call_ctx)));
        }

        let outcome = self.eval(&data.body, &call_ctx)?;
        let value = match outcome {
            Outcome::Return(v) => v,
            Outcome::Value(v) => {
                if data.should_auto_return {
                    v
                } else {
                    Value::null()
                }
            }
            Outcome::Continue | Outcome::Break => Value::null(),
            Outcome::Exit(v) => return Ok(Outcome::Exit(v)),
        };
        ok(value)
    }

    /// Instantiates a class: a fresh context/frame parented on the class's
    /// own table, every binding deep-copied into it, `this`/`self` bound to
    /// the new instance, and the constructor (the method whose name equals
    /// the class's own name) invoked for effect - the return value is the
    /// instance, not whatever the constructor returns. See
    /// `types/class_.py`'s `Class.execute`.
    fn instantiate_class(&mut self, class_value: &Value, class_data: &Rc<ClassData>, args: Vec<Value>, span: Span) -> RtResult {
        let caller_ctx = class_value.ctx.clone().unwrap_or_else(|| Rc::clone(&class_data.defining_ctx));
        let exec_ctx = caller_ctx.child(class_data.name.clone(), span, Rc::clone(&class_data.symbol_table));

        let entries: Vec<(String, Value)> = class_data
            .symbol_table
            .borrow()
            .symbols
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        for (key, val) in entries {
            let rebound = match &val.kind {
                // Methods are rebuilt rather than cloned: each instance
                // gets its own closure pointing at its own context, so
                // `self`/`this` resolve inside the method body.
                ValueKind::Function(data) => {
                    let new_data = FunctionData {
                        name: data.name.clone(),
                        params: data.params.clone(),
                        body: Rc::clone(&data.body),
                        should_auto_return: data.should_auto_return,
                        captured_ctx: Rc::clone(&exec_ctx),
                    };
                    Value::function(Rc::new(new_data)).with_span(val.span).with_ctx(Rc::clone(&exec_ctx))
                }
                _ => val.copy().with_ctx(Rc::clone(&exec_ctx)),
            };
            exec_ctx.symbol_table.borrow_mut().set(key, rebound);
        }

        let instance_data = Rc::new(InstanceData {
            parent_class: Rc::clone(class_data),
            symbol_table: Rc::clone(&exec_ctx.symbol_table),
        });
        let instance_value = Value::instance(Rc::clone(&instance_data)).with_span(span).with_ctx(caller_ctx.clone());
        exec_ctx.symbol_table.borrow_mut().set("this", instance_value.copy());
        exec_ctx.symbol_table.borrow_mut().set("self", instance_value.copy());

        let ctor = exec_ctx.symbol_table.borrow().symbols.get(&class_data.name).cloned();
        let ctor_data = match ctor.as_ref().map(|v| &v.kind) {
            Some(ValueKind::Function(data)) => Rc::clone(data),
            _ => {
                return Err(RuntimeError::new(
                    span,
                    format!("Function '{}' not defined", class_data.name),
                    Rc::clone(&exec_ctx),
                ))
            }
        };

        if let Outcome::Exit(v) = self.call_function(&ctor_data, args, span)? {
            return Ok(Outcome::Exit(v));
        }

        ok(instance_value)
    }
}

/// Matches `BaseFunction.check_args`'s exact wording: "N too many/few args
/// passed into 'name'".
pub(crate) fn check_arity(name: &str, expected: usize, got: usize, span: Span, ctx: &Rc<Context>) -> Result<(), RuntimeError> {
    if got > expected {
        return Err(RuntimeError::new(span, format!("{} too many args passed into '{name}'", got - expected), ctx.clone()));
    }
    if got < expected {
        return Err(RuntimeError::new(span, format!("{} too few args passed into '{name}'", expected - got), ctx.clone()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_reports_the_exact_shortfall() {
        let table = std::rc::Rc::new(std::cell::RefCell::new(crate::symbol_table::SymbolTable::new()));
        let ctx = Context::program(table);
        let err = check_arity("f", 3, 1, techzen_util::span::Span::DUMMY, &ctx).unwrap_err();
        assert_eq!(err.to_string(), "Runtime Error: 2 too few args passed into 'f'");
    }
}
