//! Dict storage.
//!
//! `dict_.py` backs `Dict` with a plain Python `dict` keyed by `Value`
//! objects that have no `__eq__`/`__hash__` override, so real lookups by
//! *content* (`obj / key`, `obj - key`) fall back to a linear scan
//! comparing `.value` while insertion/merge (`obj + other`) uses identity
//! hashing. Rather than carry that split personality forward, every
//! operation here is a linear scan by structural equality — the simpler,
//! single behavior the source was visibly trying to approximate.
//!
//! Like `List`, `Dict` is reference-typed: `copy()` shares the backing
//! `Rc<RefCell<Vec<(Value, Value)>>>` so in-place builtins stay visible
//! after the value has been re-read from a variable.

use std::cell::RefCell;
use std::rc::Rc;

use crate::value::Value;

pub type DictHandle = Rc<RefCell<Vec<(Value, Value)>>>;

pub fn new_handle(pairs: Vec<(Value, Value)>) -> DictHandle {
    Rc::new(RefCell::new(pairs))
}

/// Find the index of `key` by structural equality, matching
/// `dived_by`'s/`subbed_by`'s `.value ==` comparison loop.
pub fn find(pairs: &[(Value, Value)], key: &Value) -> Option<usize> {
    pairs.iter().position(|(k, _)| k.structural_eq(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn find_matches_by_value_not_identity() {
        let pairs = vec![(Value::string("a"), Value::int(1))];
        assert_eq!(find(&pairs, &Value::string("a")), Some(0));
        assert_eq!(find(&pairs, &Value::string("b")), None);
    }
}
