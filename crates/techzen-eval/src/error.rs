//! Runtime errors and traceback rendering.
//!
//! Grounded in `errors_.py`'s `RTError`: a runtime error is a span plus a
//! message plus the `Context` active when it was raised, and printing one
//! means walking that context's parent chain to build a traceback before
//! the message itself.

use std::fmt;
use std::rc::Rc;

use techzen_util::span::{SourceMap, Span};
use thiserror::Error;

use crate::context::Context;

#[derive(Error)]
#[error("Runtime Error: {detail}")]
pub struct RuntimeError {
    pub span: Span,
    pub detail: String,
    pub ctx: Rc<Context>,
}

impl fmt::Debug for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeError")
            .field("span", &self.span)
            .field("detail", &self.detail)
            .finish()
    }
}

impl RuntimeError {
    pub fn new(span: Span, detail: impl Into<String>, ctx: Rc<Context>) -> Self {
        Self {
            span,
            detail: detail.into(),
            ctx,
        }
    }

    /// `Illegal operation`, blamed on the span running from `self`'s start
    /// to `other`'s end (or just `self`'s own span when there is no
    /// right-hand operand, e.g. `NOT` or a bare call), matching
    /// `Value.illegal_operation`.
    pub fn illegal_operation(span: Span, ctx: Rc<Context>) -> Self {
        Self::new(span, "Illegal operation", ctx)
    }

    /// Traceback + message + arrow-annotated excerpt, matching
    /// `RTError.as_string`/`generate_traceback`.
    pub fn render(&self, source_map: &SourceMap) -> String {
        let mut out = self.traceback(source_map);
        out.push_str(&self.to_string());
        if let Some(line) = source_map.line_text(self.span) {
            let col = self.span.column.saturating_sub(1) as usize;
            out.push_str("\n\n");
            out.push_str(line);
            out.push('\n');
            out.push_str(&" ".repeat(col));
            out.push('^');
        }
        out
    }

    fn traceback(&self, source_map: &SourceMap) -> String {
        let mut lines = Vec::new();
        let mut pos = self.span;
        let mut ctx = Some(Rc::clone(&self.ctx));

        while let Some(c) = ctx {
            let fname = source_map
                .get(pos.file_id)
                .map(|f| f.name())
                .unwrap_or("?");
            lines.push(format!(
                "  File {}, line {}, in {}\n",
                fname, pos.line, c.display_name
            ));
            match (c.parent_entry_pos, c.parent.as_ref()) {
                (Some(p), Some(parent)) => {
                    pos = p;
                    ctx = Some(Rc::clone(parent));
                }
                _ => break,
            }
        }

        lines.reverse();
        let mut result = "Traceback (most recent call last):\n".to_string();
        for line in lines {
            result.push_str(&line);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol_table::SymbolTable;
    use std::cell::RefCell;
    use techzen_util::span::SourceMap;

    fn ctx() -> Rc<Context> {
        Context::program(Rc::new(RefCell::new(SymbolTable::new())))
    }

    #[test]
    fn display_is_the_bare_message() {
        let err = RuntimeError::new(Span::DUMMY, "Division by zero", ctx());
        assert_eq!(err.to_string(), "Runtime Error: Division by zero");
    }

    #[test]
    fn traceback_mentions_the_context_name() {
        let err = RuntimeError::new(Span::DUMMY, "boom", ctx());
        let rendered = err.traceback(&SourceMap::new());
        assert!(rendered.contains("<program>"));
        assert!(rendered.starts_with("Traceback (most recent call last):"));
    }
}
