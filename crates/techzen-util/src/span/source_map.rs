//! Source map for registering loaded scripts and rendering excerpts.
//!
//! TechZen's `run` builtin re-enters the pipeline for an included script,
//! so more than one source file can be live in a single process. The
//! `SourceMap` gives every loaded file a stable [`FileId`] and lets error
//! formatting recover the filename and source text a [`Span`] belongs to.

use std::sync::Arc;

use super::{FileId, Span};

/// A single loaded source file.
#[derive(Clone)]
pub struct SourceFile {
    id: FileId,
    name: String,
    content: Arc<str>,
    line_starts: Arc<[usize]>,
}

impl SourceFile {
    pub fn new(id: usize, name: impl Into<String>, content: impl Into<Arc<str>>) -> Self {
        let content = content.into();
        let line_starts = Self::compute_line_starts(&content);
        Self {
            id: FileId(id),
            name: name.into(),
            content,
            line_starts,
        }
    }

    fn compute_line_starts(content: &str) -> Arc<[usize]> {
        let mut line_starts = vec![0];
        for (i, ch) in content.char_indices() {
            if ch == '\n' {
                line_starts.push(i + 1);
            }
        }
        line_starts.into()
    }

    #[inline]
    pub fn id(&self) -> FileId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the 1-based line number containing `offset`.
    pub fn line_at(&self, offset: usize) -> u32 {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => (line + 1) as u32,
            Err(insert_at) => insert_at as u32,
        }
    }

    /// Returns the source text of a single line (1-based), without the
    /// trailing newline.
    pub fn line_text(&self, line: u32) -> &str {
        let idx = (line.max(1) - 1) as usize;
        let start = self.line_starts.get(idx).copied().unwrap_or(self.content.len());
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&s| s.saturating_sub(1))
            .unwrap_or(self.content.len());
        self.content.get(start..end.max(start)).unwrap_or("")
    }
}

/// Registry of all source files loaded during one interpreter session.
#[derive(Clone, Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Register a new source file, returning its [`FileId`].
    pub fn add_file(&mut self, name: impl Into<String>, content: impl Into<Arc<str>>) -> FileId {
        let id = self.files.len();
        let file = SourceFile::new(id, name, content);
        let file_id = file.id();
        self.files.push(file);
        file_id
    }

    pub fn get(&self, file_id: FileId) -> Option<&SourceFile> {
        self.files.get(file_id.index())
    }

    /// Returns the source line a span starts on, if its file is registered.
    pub fn line_text(&self, span: Span) -> Option<&str> {
        self.get(span.file_id).map(|f| f.line_text(span.line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_file_assigns_sequential_ids() {
        let mut map = SourceMap::new();
        let a = map.add_file("a.tz", "1 + 1");
        let b = map.add_file("b.tz", "2 + 2");
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
    }

    #[test]
    fn line_text_recovers_source_line() {
        let mut map = SourceMap::new();
        let id = map.add_file("a.tz", "VAR a = 1\nVAR b = 2\n");
        let file = map.get(id).unwrap();
        assert_eq!(file.line_text(1), "VAR a = 1");
        assert_eq!(file.line_text(2), "VAR b = 2");
    }
}
