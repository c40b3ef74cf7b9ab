//! The runtime value system.
//!
//! `Value` is one closed sum type rather than a class hierarchy (see
//! `spec.md` §9 "Polymorphic values"): every operator is a `match` here
//! instead of a virtual method resolved per-subclass, with "Illegal
//! operation" as the default arm, grounded directly on `types/value_.py`'s
//! base-class fallbacks and each concrete `types/*_.py` override.

mod class;
mod dict;
mod function;
mod list;
mod number;

pub use class::{ClassData, InstanceData};
pub use dict::DictHandle;
pub use function::{BuiltinId, FunctionData};
pub use list::{resolve_index, ListHandle};
pub use number::NumberValue;

use std::fmt;
use std::rc::Rc;

use techzen_util::span::Span;

use crate::context::Context;
use crate::error::RuntimeError;

#[derive(Clone)]
pub struct Value {
    pub kind: ValueKind,
    pub span: Span,
    pub ctx: Option<Rc<Context>>,
}

#[derive(Clone)]
pub enum ValueKind {
    Number(NumberValue),
    String(Rc<str>),
    List(ListHandle),
    Dict(DictHandle),
    Function(Rc<FunctionData>),
    Builtin(BuiltinId),
    Class(Rc<ClassData>),
    Instance(Rc<InstanceData>),
}

impl Value {
    pub fn from_kind(kind: ValueKind) -> Self {
        Value {
            kind,
            span: Span::DUMMY,
            ctx: None,
        }
    }

    pub fn int(n: i64) -> Self {
        Self::from_kind(ValueKind::Number(NumberValue::Int(n)))
    }

    pub fn float(f: f64) -> Self {
        Self::from_kind(ValueKind::Number(NumberValue::Float(f)))
    }

    pub fn number(n: NumberValue) -> Self {
        Self::from_kind(ValueKind::Number(n))
    }

    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Self::from_kind(ValueKind::String(s.into()))
    }

    pub fn list(elements: Vec<Value>) -> Self {
        Self::from_kind(ValueKind::List(list::new_handle(elements)))
    }

    pub fn dict(pairs: Vec<(Value, Value)>) -> Self {
        Self::from_kind(ValueKind::Dict(dict::new_handle(pairs)))
    }

    pub fn function(data: Rc<FunctionData>) -> Self {
        Self::from_kind(ValueKind::Function(data))
    }

    pub fn builtin(id: BuiltinId) -> Self {
        Self::from_kind(ValueKind::Builtin(id))
    }

    pub fn class(data: Rc<ClassData>) -> Self {
        Self::from_kind(ValueKind::Class(data))
    }

    pub fn instance(data: Rc<InstanceData>) -> Self {
        Self::from_kind(ValueKind::Instance(data))
    }

    /// The canonical `null`/`false` constant: `Number(0)`. A fresh value is
    /// built per use rather than shared, per `spec.md` §9 "Global
    /// singletons" — cheap, and values are copied by content anyway.
    pub fn null() -> Self {
        Self::int(0)
    }

    pub fn true_() -> Self {
        Self::int(1)
    }

    pub fn false_() -> Self {
        Self::int(0)
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn with_ctx(mut self, ctx: Rc<Context>) -> Self {
        self.ctx = Some(ctx);
        self
    }

    /// Hand out another reference to this value: a fresh `Value` wrapper
    /// (its own span/context to be set by the caller) but, for the
    /// reference-typed kinds, the *same* backing storage — see
    /// `value/list.rs`'s module doc for why that sharing is necessary.
    pub fn copy(&self) -> Value {
        self.clone()
    }

    pub fn is_truthy(&self) -> bool {
        match &self.kind {
            ValueKind::Number(n) => n.is_truthy(),
            ValueKind::String(s) => !s.is_empty(),
            ValueKind::List(l) => !l.borrow().is_empty(),
            ValueKind::Dict(d) => !d.borrow().is_empty(),
            ValueKind::Function(_)
            | ValueKind::Builtin(_)
            | ValueKind::Class(_)
            | ValueKind::Instance(_) => true,
        }
    }

    /// Equality by content for `Number`/`String`, by identity for every
    /// reference-typed kind — see `value/dict.rs`'s module doc.
    pub fn structural_eq(&self, other: &Value) -> bool {
        match (&self.kind, &other.kind) {
            (ValueKind::Number(a), ValueKind::Number(b)) => a.eq(*b),
            (ValueKind::String(a), ValueKind::String(b)) => a == b,
            (ValueKind::List(a), ValueKind::List(b)) => Rc::ptr_eq(a, b),
            (ValueKind::Dict(a), ValueKind::Dict(b)) => Rc::ptr_eq(a, b),
            (ValueKind::Function(a), ValueKind::Function(b)) => Rc::ptr_eq(a, b),
            (ValueKind::Builtin(a), ValueKind::Builtin(b)) => a == b,
            (ValueKind::Class(a), ValueKind::Class(b)) => Rc::ptr_eq(a, b),
            (ValueKind::Instance(a), ValueKind::Instance(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            ValueKind::Number(_) => "number",
            ValueKind::String(_) => "string",
            ValueKind::List(_) => "list",
            ValueKind::Dict(_) => "dict",
            ValueKind::Function(_) => "function",
            ValueKind::Builtin(_) => "built-in function",
            ValueKind::Class(_) => "class",
            ValueKind::Instance(_) => "instance",
        }
    }

    fn ctx_or_dummy(&self, ctx: Option<Rc<Context>>) -> Rc<Context> {
        ctx.or_else(|| self.ctx.clone())
            .expect("a value reaching an operator always carries a context from evaluation")
    }

    fn illegal_operation(&self, other: &Value) -> RuntimeError {
        RuntimeError::illegal_operation(self.span.to(other.span), self.ctx_or_dummy(None))
    }

    fn illegal_operation_unary(&self) -> RuntimeError {
        RuntimeError::illegal_operation(self.span, self.ctx_or_dummy(None))
    }

    pub fn added_to(&self, other: &Value) -> Result<Value, RuntimeError> {
        match (&self.kind, &other.kind) {
            (ValueKind::Number(a), ValueKind::Number(b)) => Ok(Value::number(a.add(*b))),
            (ValueKind::String(a), ValueKind::String(b)) => {
                Ok(Value::string(format!("{a}{b}")))
            }
            (ValueKind::List(a), _) => {
                a.borrow_mut().push(other.copy());
                Ok(Value::from_kind(ValueKind::List(Rc::clone(a))))
            }
            (ValueKind::Dict(a), ValueKind::Dict(b)) => {
                let mut merged = a.borrow().clone();
                for (k, v) in b.borrow().iter() {
                    match dict::find(&merged, k) {
                        Some(idx) => merged[idx].1 = v.copy(),
                        None => merged.push((k.copy(), v.copy())),
                    }
                }
                Ok(Value::dict(merged))
            }
            _ => Err(self.illegal_operation(other)),
        }
    }

    pub fn subbed_by(&self, other: &Value) -> Result<Value, RuntimeError> {
        match (&self.kind, &other.kind) {
            (ValueKind::Number(a), ValueKind::Number(b)) => Ok(Value::number(a.sub(*b))),
            (ValueKind::List(a), ValueKind::Number(n)) => {
                let idx = number_floor(*n);
                let len = a.borrow().len();
                match list::resolve_index(len, idx) {
                    Some(i) => {
                        a.borrow_mut().remove(i);
                        Ok(Value::from_kind(ValueKind::List(Rc::clone(a))))
                    }
                    None => Err(RuntimeError::new(
                        other.span,
                        "Element at this index could not be removed from list, because index is out of bounds",
                        self.ctx_or_dummy(None),
                    )),
                }
            }
            (ValueKind::Dict(a), _) => {
                let removed = {
                    let mut pairs = a.borrow_mut();
                    dict::find(&pairs, other).map(|idx| pairs.remove(idx))
                };
                match removed {
                    Some(_) => Ok(Value::from_kind(ValueKind::Dict(Rc::clone(a)))),
                    None => Err(RuntimeError::new(
                        other.span,
                        "Key does not exist",
                        self.ctx_or_dummy(None),
                    )),
                }
            }
            _ => Err(self.illegal_operation(other)),
        }
    }

    pub fn multed_by(&self, other: &Value) -> Result<Value, RuntimeError> {
        match (&self.kind, &other.kind) {
            (ValueKind::Number(a), ValueKind::Number(b)) => Ok(Value::number(a.mul(*b))),
            (ValueKind::String(s), ValueKind::Number(n)) => {
                let count = number_floor(*n);
                if count < 0 {
                    return Err(self.illegal_operation(other));
                }
                Ok(Value::string(s.repeat(count as usize)))
            }
            (ValueKind::List(a), ValueKind::List(b)) => {
                a.borrow_mut().extend(b.borrow().iter().map(Value::copy));
                Ok(Value::from_kind(ValueKind::List(Rc::clone(a))))
            }
            _ => Err(self.illegal_operation(other)),
        }
    }

    pub fn dived_by(&self, other: &Value) -> Result<Value, RuntimeError> {
        match (&self.kind, &other.kind) {
            (ValueKind::Number(a), ValueKind::Number(b)) => {
                if b.is_zero() {
                    return Err(RuntimeError::new(
                        other.span,
                        "Division by zero",
                        self.ctx_or_dummy(None),
                    ));
                }
                Ok(Value::number(a.div(*b)))
            }
            (ValueKind::List(a), ValueKind::Number(n)) => {
                let idx = number_floor(*n);
                let elements = a.borrow();
                match list::resolve_index(elements.len(), idx) {
                    Some(i) => Ok(elements[i].copy()),
                    None => Err(RuntimeError::new(
                        other.span,
                        "Element at this index could not be retrieved from list, because index is out of bounds",
                        self.ctx_or_dummy(None),
                    )),
                }
            }
            (ValueKind::Dict(a), _) => {
                let pairs = a.borrow();
                match dict::find(&pairs, other) {
                    Some(idx) => Ok(pairs[idx].1.copy()),
                    None => Err(RuntimeError::new(
                        other.span,
                        "Key does not exist",
                        self.ctx_or_dummy(None),
                    )),
                }
            }
            _ => Err(self.illegal_operation(other)),
        }
    }

    pub fn floor_of(&self, other: &Value) -> Result<Value, RuntimeError> {
        match (&self.kind, &other.kind) {
            (ValueKind::Number(a), ValueKind::Number(b)) => {
                if b.is_zero() {
                    return Err(RuntimeError::new(
                        other.span,
                        "Division by zero",
                        self.ctx_or_dummy(None),
                    ));
                }
                Ok(Value::number(a.floor_div(*b)))
            }
            _ => Err(self.illegal_operation(other)),
        }
    }

    pub fn pow_of(&self, other: &Value) -> Result<Value, RuntimeError> {
        match (&self.kind, &other.kind) {
            (ValueKind::Number(a), ValueKind::Number(b)) => Ok(Value::number(a.pow(*b))),
            _ => Err(self.illegal_operation(other)),
        }
    }

    pub fn mod_by(&self, other: &Value) -> Result<Value, RuntimeError> {
        match (&self.kind, &other.kind) {
            (ValueKind::Number(a), ValueKind::Number(b)) => {
                if b.is_zero() {
                    return Err(RuntimeError::new(
                        other.span,
                        "Division by zero",
                        self.ctx_or_dummy(None),
                    ));
                }
                Ok(Value::number(a.modulo(*b)))
            }
            _ => Err(self.illegal_operation(other)),
        }
    }

    pub fn comparison_eq(&self, other: &Value) -> Result<Value, RuntimeError> {
        match (&self.kind, &other.kind) {
            (ValueKind::Number(a), ValueKind::Number(b)) => Ok(Value::number(NumberValue::from_bool(a.eq(*b)))),
            (ValueKind::String(a), ValueKind::String(b)) => {
                Ok(Value::number(NumberValue::from_bool(a == b)))
            }
            _ => Err(self.illegal_operation(other)),
        }
    }

    pub fn comparison_ne(&self, other: &Value) -> Result<Value, RuntimeError> {
        match (&self.kind, &other.kind) {
            (ValueKind::Number(a), ValueKind::Number(b)) => Ok(Value::number(NumberValue::from_bool(!a.eq(*b)))),
            (ValueKind::String(a), ValueKind::String(b)) => {
                Ok(Value::number(NumberValue::from_bool(a != b)))
            }
            _ => Err(self.illegal_operation(other)),
        }
    }

    pub fn comparison_lt(&self, other: &Value) -> Result<Value, RuntimeError> {
        self.numeric_comparison(other, NumberValue::lt)
    }

    pub fn comparison_gt(&self, other: &Value) -> Result<Value, RuntimeError> {
        self.numeric_comparison(other, NumberValue::gt)
    }

    pub fn comparison_lte(&self, other: &Value) -> Result<Value, RuntimeError> {
        self.numeric_comparison(other, NumberValue::lte)
    }

    pub fn comparison_gte(&self, other: &Value) -> Result<Value, RuntimeError> {
        self.numeric_comparison(other, NumberValue::gte)
    }

    fn numeric_comparison(
        &self,
        other: &Value,
        op: impl Fn(NumberValue, NumberValue) -> bool,
    ) -> Result<Value, RuntimeError> {
        match (&self.kind, &other.kind) {
            (ValueKind::Number(a), ValueKind::Number(b)) => {
                Ok(Value::number(NumberValue::from_bool(op(*a, *b))))
            }
            _ => Err(self.illegal_operation(other)),
        }
    }

    /// Non-short-circuiting: both operands are already evaluated by the
    /// time this runs (see `spec.md` §4.3 "Logical AND/OR").
    pub fn anded_by(&self, other: &Value) -> Result<Value, RuntimeError> {
        match (&self.kind, &other.kind) {
            (ValueKind::Number(a), ValueKind::Number(b)) => {
                Ok(Value::number(NumberValue::from_bool(a.is_truthy() && b.is_truthy())))
            }
            _ => Err(self.illegal_operation(other)),
        }
    }

    pub fn ored_by(&self, other: &Value) -> Result<Value, RuntimeError> {
        match (&self.kind, &other.kind) {
            (ValueKind::Number(a), ValueKind::Number(b)) => {
                Ok(Value::number(NumberValue::from_bool(a.is_truthy() || b.is_truthy())))
            }
            _ => Err(self.illegal_operation(other)),
        }
    }

    pub fn notted(&self) -> Result<Value, RuntimeError> {
        match &self.kind {
            ValueKind::Number(n) => Ok(Value::number(NumberValue::from_bool(!n.is_truthy()))),
            _ => Err(self.illegal_operation_unary()),
        }
    }
}

/// Floors a `Number` to an `i64` index, matching the source's reliance on
/// Python's implicit int conversion at list-subscript sites.
fn number_floor(n: NumberValue) -> i64 {
    match n {
        NumberValue::Int(i) => i,
        NumberValue::Float(f) => f.floor() as i64,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValueKind::Number(n) => write!(f, "{n}"),
            ValueKind::String(s) => write!(f, "{s}"),
            ValueKind::List(l) => {
                let elements = l.borrow();
                let parts: Vec<String> = elements.iter().map(|v| v.to_string()).collect();
                write!(f, "{}", parts.join(", "))
            }
            ValueKind::Dict(d) => {
                let pairs = d.borrow();
                let parts: Vec<String> = pairs.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
            ValueKind::Function(data) => write!(f, "<function {}>", data.display_name()),
            ValueKind::Builtin(id) => write!(f, "<built-in function {}>", id.name()),
            ValueKind::Class(data) => write!(f, "<class {}>", data.name),
            ValueKind::Instance(data) => write!(f, "<instance of class {}>", data.parent_class.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_addition_promotes_on_float() {
        let a = Value::int(1);
        let b = Value::float(0.5);
        let sum = a.added_to(&b).unwrap();
        assert_eq!(sum.to_string(), "1.5");
    }

    #[test]
    fn string_concat() {
        let a = Value::string("foo");
        let b = Value::string("bar");
        assert_eq!(a.added_to(&b).unwrap().to_string(), "foobar");
    }

    #[test]
    fn string_times_negative_count_is_illegal() {
        let a = Value::string("x");
        let b = Value::int(-1);
        assert!(a.multed_by(&b).is_err());
    }

    #[test]
    fn division_by_zero_is_an_error() {
        let a = Value::int(1);
        let b = Value::int(0);
        assert!(a.dived_by(&b).is_err());
    }

    #[test]
    fn append_mutates_the_shared_backing_list() {
        let list = Value::list(vec![Value::int(1)]);
        let appended = list.added_to(&Value::int(2)).unwrap();
        assert_eq!(appended.to_string(), "1, 2");
        // Reading the original handle again reflects the mutation too,
        // because added_to shares the same backing Vec.
        assert_eq!(list.to_string(), "1, 2");
    }

    #[test]
    fn dict_miss_is_a_runtime_error_not_none() {
        let dict = Value::dict(vec![(Value::string("a"), Value::int(1))]);
        assert!(dict.dived_by(&Value::string("missing")).is_err());
    }

    #[test]
    fn illegal_operation_is_the_default_arm() {
        let a = Value::int(1);
        let b = Value::string("x");
        let err = a.added_to(&b).unwrap_err();
        assert_eq!(err.to_string(), "Runtime Error: Illegal operation");
    }

    #[test]
    fn truthiness_matches_glossary() {
        assert!(!Value::int(0).is_truthy());
        assert!(Value::int(1).is_truthy());
        assert!(!Value::string("").is_truthy());
        assert!(Value::string("x").is_truthy());
        assert!(!Value::list(vec![]).is_truthy());
        assert!(Value::list(vec![Value::int(1)]).is_truthy());
    }
}
