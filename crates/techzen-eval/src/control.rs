//! Non-value control flow threaded through every evaluation step.
//!
//! The source's `RTResult` bundles a value together with four independent
//! boolean flags (return/continue/break/exit) plus an optional error, and
//! `should_return()` is true if *any* of them is set. Rust's enums make the
//! "exactly one of these is active" shape explicit, so `Outcome` is a sum
//! type instead — but every call site that matched the original's flag
//! checks has a direct match-arm equivalent here.

use crate::error::RuntimeError;
use crate::value::Value;

/// What an evaluation step produced, beyond a plain value.
pub enum Outcome {
    /// Ordinary expression result.
    Value(Value),
    /// `RETURN` inside a function body.
    Return(Value),
    /// `CONTINUE` inside a loop body.
    Continue,
    /// `BREAK` inside a loop body.
    Break,
    /// `exit()` was called; carries the process's final value.
    Exit(Value),
}

impl Outcome {
    pub fn is_value(&self) -> bool {
        matches!(self, Outcome::Value(_))
    }

    /// Mirrors `RTResult.should_return()` restricted to the non-error
    /// flags: true for anything other than a plain value.
    pub fn interrupts(&self) -> bool {
        !self.is_value()
    }

    pub fn into_value(self) -> Value {
        match self {
            Outcome::Value(v) | Outcome::Return(v) | Outcome::Exit(v) => v,
            Outcome::Continue | Outcome::Break => unreachable!(
                "into_value called on a flag with no carried value; callers must check interrupts() first"
            ),
        }
    }
}

/// The result of evaluating one AST node: either an `Outcome` or a
/// `RuntimeError`, exactly the two branches `RTResult.error`/`.value` (plus
/// flags) collapse to once you stop tracking "is there an error" as a
/// separate boolean from "what happened".
pub type RtResult = Result<Outcome, RuntimeError>;

/// Helper for evaluation steps that only ever succeed with a plain value
/// and have no way to produce `return`/`continue`/`break`/`exit` (literals,
/// binary ops on already-evaluated operands, etc).
pub fn ok(value: Value) -> RtResult {
    Ok(Outcome::Value(value))
}

/// Evaluate a sub-expression and unwrap its plain value, propagating a
/// `RuntimeError` or a non-`Value` `Outcome` (return/continue/break/exit)
/// straight out of the enclosing function. The direct equivalent of
/// `value = res.register(visit(...)); if res.should_return(): return res`.
macro_rules! step {
    ($outcome:expr) => {
        match $outcome? {
            $crate::control::Outcome::Value(v) => v,
            other => return Ok(other),
        }
    };
}

pub(crate) use step;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_value_does_not_interrupt() {
        let outcome = Outcome::Value(Value::null());
        assert!(!outcome.interrupts());
    }

    #[test]
    fn control_flags_interrupt() {
        assert!(Outcome::Continue.interrupts());
        assert!(Outcome::Break.interrupts());
        assert!(Outcome::Return(Value::null()).interrupts());
        assert!(Outcome::Exit(Value::null()).interrupts());
    }
}
