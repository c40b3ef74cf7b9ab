//! Insertion-ordered variable bindings, chained by parent.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::value::Value;

/// A single binding frame. `get` walks up `parent` on a miss; `set` and
/// `remove` only ever touch the current frame, matching the source's own
/// `SymbolTable` (no implicit write-through to an enclosing scope).
#[derive(Default)]
pub struct SymbolTable {
    pub symbols: IndexMap<String, Value>,
    pub parent: Option<Rc<RefCell<SymbolTable>>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            symbols: IndexMap::new(),
            parent: None,
        }
    }

    pub fn with_parent(parent: Rc<RefCell<SymbolTable>>) -> Self {
        Self {
            symbols: IndexMap::new(),
            parent: Some(parent),
        }
    }

    /// Look up `name` in this frame, falling back to `parent` on a miss.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.symbols.get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|p| p.borrow().get(name))
    }

    /// Write `name` into the current frame only.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.symbols.insert(name.into(), value);
    }

    /// Remove `name` from the current frame only.
    pub fn remove(&mut self, name: &str) {
        self.symbols.shift_remove(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: i64) -> Value {
        Value::int(n)
    }

    #[test]
    fn get_falls_back_to_parent() {
        let parent = Rc::new(RefCell::new(SymbolTable::new()));
        parent.borrow_mut().set("x", num(1));
        let child = SymbolTable::with_parent(Rc::clone(&parent));
        assert!(child.get("x").is_some());
        assert!(child.get("y").is_none());
    }

    #[test]
    fn set_only_touches_current_frame() {
        let parent = Rc::new(RefCell::new(SymbolTable::new()));
        let child = Rc::new(RefCell::new(SymbolTable::with_parent(Rc::clone(&parent))));
        child.borrow_mut().set("x", num(1));
        assert!(parent.borrow().get("x").is_none());
        assert!(child.borrow().get("x").is_some());
    }

    #[test]
    fn remove_forgets_a_binding() {
        let table = Rc::new(RefCell::new(SymbolTable::new()));
        table.borrow_mut().set("x", num(1));
        table.borrow_mut().remove("x");
        assert!(table.borrow().get("x").is_none());
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut table = SymbolTable::new();
        table.set("b", num(2));
        table.set("a", num(1));
        let names: Vec<&str> = table.symbols.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
