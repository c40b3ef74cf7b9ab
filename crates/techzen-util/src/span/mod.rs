//! Span module - source location tracking.
//!
//! Every token, AST node and runtime value in TechZen carries a `(start,
//! end)` pair of [`Span`]s so that lexical, syntactic and runtime errors
//! can all point at the same kind of location.
//!
//! # Examples
//!
//! ```
//! use techzen_util::span::{Span, FileId};
//!
//! let span = Span::new(10, 20, 1, 5);
//! let file_id = FileId(0);
//! let span = Span::with_file(10, 20, file_id, 1, 5);
//! ```

mod source_map;

pub use source_map::{SourceFile, SourceMap};

/// A unique identifier for a loaded source file.
///
/// `FileId`s are assigned sequentially as files are registered with a
/// [`SourceMap`] — one per top-level `run`/`include` invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub usize);

impl FileId {
    #[inline]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }

    /// A dummy FileId for standalone testing, before any file is registered.
    pub const DUMMY: FileId = FileId(0);
}

impl Default for FileId {
    #[inline]
    fn default() -> Self {
        Self::DUMMY
    }
}

/// A position within a source file.
///
/// `Span` is the Rust realization of the language's Position value:
/// byte offset, line/column, and file identifier. Positions are value
/// semantics — copied freely, never shared mutably, matching the
/// language's own Position invariant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset in source.
    pub start: usize,
    /// End byte offset in source (exclusive).
    pub end: usize,
    /// Line number (1-based) at `start`.
    pub line: u32,
    /// Column number (1-based) at `start`.
    pub column: u32,
    /// File this span belongs to.
    pub file_id: FileId,
}

impl Span {
    /// Dummy span for synthetic nodes and default-initialized values.
    pub const DUMMY: Span = Span {
        start: 0,
        end: 0,
        line: 1,
        column: 1,
        file_id: FileId::DUMMY,
    };

    /// Create a span in the default (first) file.
    pub const fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
            file_id: FileId::DUMMY,
        }
    }

    /// Create a span associated with a specific file.
    pub const fn with_file(start: usize, end: usize, file_id: FileId, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
            file_id,
        }
    }

    /// Create a zero-width span at a single point (e.g. EOF).
    pub const fn point(line: u32, column: u32) -> Self {
        Self::new(0, 0, line, column)
    }

    /// Merge two spans into the range covering both.
    ///
    /// Used when an AST node's `pos_start`/`pos_end` is derived from a
    /// child token's start and another child node's end.
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line: self.line,
            column: self.column,
            file_id: self.file_id,
        }
    }

    /// Returns true if this span covers zero bytes.
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_id_default_is_dummy() {
        assert_eq!(FileId::default(), FileId::DUMMY);
    }

    #[test]
    fn span_to_merges_bounds() {
        let a = Span::new(5, 10, 1, 6);
        let b = Span::new(10, 20, 1, 11);
        let merged = a.to(b);
        assert_eq!(merged.start, 5);
        assert_eq!(merged.end, 20);
    }

    #[test]
    fn span_is_empty() {
        assert!(Span::point(1, 1).is_empty());
        assert!(!Span::new(0, 1, 1, 1).is_empty());
    }
}
