//! Shared lex/parse error types.
//!
//! Runtime errors additionally carry the failing evaluator `Context` (for
//! traceback construction) and so are defined in `techzen-eval` instead of
//! here; everything that can be described purely by "a span plus a
//! message" lives in this crate so the lexer and parser can share one
//! error shape.

use std::fmt;

use thiserror::Error;

use crate::span::{SourceMap, Span};

/// The four lex/parse error kinds named in the language's error-handling
/// design. `Runtime` is listed for completeness of the kind enum even
/// though runtime errors carry extra context and are represented by
/// `techzen_eval::RuntimeError` instead of this type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    IllegalChar,
    ExpectedChar,
    InvalidSyntax,
}

impl ErrorKind {
    pub const fn name(&self) -> &'static str {
        match self {
            ErrorKind::IllegalChar => "IllegalCharError",
            ErrorKind::ExpectedChar => "ExpectedCharError",
            ErrorKind::InvalidSyntax => "InvalidSyntaxError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A lex or parse error: a kind, a human-readable detail, and the span it
/// occurred at.
#[derive(Clone, Debug, Error)]
#[error("{kind}: {detail}")]
pub struct SourceError {
    pub kind: ErrorKind,
    pub detail: String,
    pub span: Span,
}

impl SourceError {
    pub fn new(kind: ErrorKind, detail: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            detail: detail.into(),
            span,
        }
    }

    pub fn illegal_char(detail: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::IllegalChar, detail, span)
    }

    pub fn expected_char(detail: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::ExpectedChar, detail, span)
    }

    pub fn invalid_syntax(detail: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::InvalidSyntax, detail, span)
    }

    /// Renders the full error layout:
    /// `<ErrorName>: <details>\nFile <fn>, line <ln>\n\n<arrow-annotated source excerpt>`.
    ///
    /// When the file/line can't be resolved from `source_map` the excerpt
    /// is simply omitted.
    pub fn render(&self, filename: &str, source_map: &SourceMap) -> String {
        let mut out = format!("{}\nFile {}, line {}", self, filename, self.span.line);
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_layout() {
        let err = SourceError::illegal_char("illegal character '$'", Span::new(0, 1, 1, 1));
        assert_eq!(err.to_string(), "IllegalCharError: illegal character '$'");
    }

    #[test]
    fn render_includes_filename_and_line() {
        let mut map = SourceMap::new();
        map.add_file("<stdin>", "1 $ 2");
        let err = SourceError::illegal_char("illegal character '$'", Span::new(2, 3, 1, 3));
        let rendered = err.render("<stdin>", &map);
        assert!(rendered.contains("File <stdin>, line 1"));
        assert!(rendered.contains("1 $ 2"));
        assert!(rendered.contains('^'));
    }
}
