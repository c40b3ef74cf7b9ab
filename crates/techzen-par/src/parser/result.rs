use techzen_util::error::SourceError;

use crate::ast::Node;

/// Wraps a parse outcome together with how many tokens were consumed
/// reaching it, so a caller trying several alternatives in sequence can
/// roll the cursor back exactly that many places on failure.
///
/// This is the backtracking machinery a hand-written recursive-descent
/// parser needs once the grammar has any ambiguity resolved by "try this,
/// and if it fails without consuming anything, try that instead" — the
/// `error` branch has to distinguish a failure that consumed zero tokens
/// (cheap to retry) from one that consumed several (that error should
/// usually win, since it got further into a more specific rule).
pub struct ParseResult {
    pub error: Option<SourceError>,
    pub node: Option<Node>,
    pub advance_count: usize,
    pub to_reverse_count: usize,
}

impl ParseResult {
    pub fn new() -> Self {
        Self {
            error: None,
            node: None,
            advance_count: 0,
            to_reverse_count: 0,
        }
    }

    /// Record one token having been consumed by the in-progress rule.
    pub fn register_advancement(&mut self) {
        self.advance_count += 1;
    }

    /// Fold a sub-result into this one: its advancement is added to ours,
    /// and if it failed, its error becomes ours (propagated unconditionally
    /// — the caller is committing to this alternative).
    pub fn register(&mut self, other: ParseResult) -> Option<Node> {
        self.advance_count += other.advance_count;
        if other.error.is_some() {
            self.error = other.error;
        }
        other.node
    }

    /// Fold a sub-result in as a *speculative* attempt: if it failed
    /// without consuming any tokens, the failure is swallowed (nothing
    /// was committed, the caller can try another alternative) and the
    /// consumed-but-failed count is stashed in `to_reverse_count` for the
    /// caller to use when rewinding the token cursor. If it failed after
    /// consuming tokens, the error is kept — a partially-matched
    /// alternative that goes on to fail is treated as the real error,
    /// not silently discarded in favor of a later alternative (the later
    /// error only overwrites the earlier one if it also consumed at
    /// least one token; see `parser::core::Parser::either`).
    pub fn try_register(&mut self, other: ParseResult) -> Option<Node> {
        if other.error.is_some() && other.advance_count == 0 {
            self.to_reverse_count = other.advance_count;
            return None;
        }
        self.advance_count += other.advance_count;
        if other.error.is_some() {
            self.error = other.error;
        }
        other.node
    }

    pub fn success(mut self, node: Node) -> Self {
        self.node = Some(node);
        self
    }

    pub fn failure(mut self, error: SourceError) -> Self {
        // Only overwrite a prior error if this one got further, matching
        // the rule above at the top level too.
        if self.error.is_none() || self.advance_count == 0 {
            self.error = Some(error);
        }
        self
    }
}

impl Default for ParseResult {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use techzen_util::span::Span;

    fn dummy_node() -> Node {
        Node::Number {
            value: crate::ast::NumberLiteral::Int(0),
            span: Span::DUMMY,
        }
    }

    #[test]
    fn register_propagates_advancement_and_error() {
        let mut outer = ParseResult::new();
        let mut inner = ParseResult::new();
        inner.register_advancement();
        inner.register_advancement();
        let inner = inner.failure(SourceError::invalid_syntax("bad", Span::DUMMY));
        outer.register(inner);
        assert_eq!(outer.advance_count, 2);
        assert!(outer.error.is_some());
    }

    #[test]
    fn try_register_swallows_zero_advance_failure() {
        let mut outer = ParseResult::new();
        let inner = ParseResult::new().failure(SourceError::invalid_syntax("bad", Span::DUMMY));
        let result = outer.try_register(inner);
        assert!(result.is_none());
        assert!(outer.error.is_none());
    }

    #[test]
    fn try_register_keeps_failure_that_consumed_tokens() {
        let mut outer = ParseResult::new();
        let mut inner = ParseResult::new();
        inner.register_advancement();
        let inner = inner.failure(SourceError::invalid_syntax("bad", Span::DUMMY));
        outer.try_register(inner);
        assert!(outer.error.is_some());
    }

    #[test]
    fn success_carries_the_node() {
        let result = ParseResult::new().success(dummy_node());
        assert!(result.node.is_some());
        assert!(result.error.is_none());
    }
}
