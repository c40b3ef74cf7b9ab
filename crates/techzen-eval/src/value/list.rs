//! List storage.
//!
//! Lists are reference types: `copy()` hands out a new `Value` wrapper
//! around the *same* backing `Rc<RefCell<Vec<Value>>>`, not a fresh
//! vector. That matches what `list_.py`'s own `copy()` actually does
//! (`List(self.elements)` aliases the same Python list object despite the
//! name) and is load-bearing — `append`/`extend`/`update_list` mutate a
//! list in place and the mutation must be visible the next time the
//! variable is read.

use std::cell::RefCell;
use std::rc::Rc;

use crate::value::Value;

pub type ListHandle = Rc<RefCell<Vec<Value>>>;

pub fn new_handle(elements: Vec<Value>) -> ListHandle {
    Rc::new(RefCell::new(elements))
}

/// Resolve a TechZen index (as stored in a `Number`) to a `usize`,
/// matching the source's reliance on Python's int-indexed list access:
/// negative indices count from the end.
pub fn resolve_index(elements_len: usize, index: i64) -> Option<usize> {
    if index >= 0 {
        let idx = index as usize;
        (idx < elements_len).then_some(idx)
    } else {
        let from_end = (-index) as usize;
        (from_end <= elements_len).then(|| elements_len - from_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_index_handles_negative() {
        assert_eq!(resolve_index(3, -1), Some(2));
        assert_eq!(resolve_index(3, 0), Some(0));
    }

    #[test]
    fn resolve_index_out_of_bounds_is_none() {
        assert_eq!(resolve_index(3, 3), None);
        assert_eq!(resolve_index(3, -4), None);
    }
}
