//! Lexical/call context chain.
//!
//! A `Context` names the frame a value or error belongs to: the program
//! itself, a function call, or a class body/instance. Chaining contexts by
//! `parent` plus `parent_entry_pos` is what lets a runtime error walk back
//! to a full traceback instead of a single location.

use std::cell::RefCell;
use std::rc::Rc;

use techzen_util::span::Span;

use crate::symbol_table::SymbolTable;

/// One frame of lexical scope / call history.
pub struct Context {
    pub display_name: String,
    pub parent: Option<Rc<Context>>,
    pub parent_entry_pos: Option<Span>,
    pub symbol_table: Rc<RefCell<SymbolTable>>,
}

impl Context {
    /// The root context a program runs in, named `<program>` per the
    /// runner's convention.
    pub fn program(symbol_table: Rc<RefCell<SymbolTable>>) -> Rc<Context> {
        Rc::new(Context {
            display_name: "<program>".to_string(),
            parent: None,
            parent_entry_pos: None,
            symbol_table,
        })
    }

    /// A fresh child frame named after a callable, parented on `self` at
    /// `entry_pos`, with a symbol table parented on `parent_table`.
    pub fn child(
        self: &Rc<Self>,
        display_name: impl Into<String>,
        entry_pos: Span,
        parent_table: Rc<RefCell<SymbolTable>>,
    ) -> Rc<Context> {
        Rc::new(Context {
            display_name: display_name.into(),
            parent: Some(Rc::clone(self)),
            parent_entry_pos: Some(entry_pos),
            symbol_table: Rc::new(RefCell::new(SymbolTable::with_parent(parent_table))),
        })
    }

    /// A frame that reuses `table` directly instead of wrapping it in a new
    /// child table. Used for member access on a class/instance, where the
    /// original walks into `value.symbol_table` itself rather than opening a
    /// fresh scope in front of it.
    pub fn for_member(self: &Rc<Self>, display_name: impl Into<String>, entry_pos: Span, table: Rc<RefCell<SymbolTable>>) -> Rc<Context> {
        Rc::new(Context {
            display_name: display_name.into(),
            parent: Some(Rc::clone(self)),
            parent_entry_pos: Some(entry_pos),
            symbol_table: table,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_context_has_no_parent() {
        let table = Rc::new(RefCell::new(SymbolTable::new()));
        let ctx = Context::program(table);
        assert_eq!(ctx.display_name, "<program>");
        assert!(ctx.parent.is_none());
        assert!(ctx.parent_entry_pos.is_none());
    }

    #[test]
    fn child_context_chains_to_parent() {
        let table = Rc::new(RefCell::new(SymbolTable::new()));
        let program = Context::program(table);
        let child_table = Rc::clone(&program.symbol_table);
        let child = program.child("doit", Span::DUMMY, child_table);
        assert_eq!(child.display_name, "doit");
        assert!(child.parent.is_some());
        assert_eq!(child.parent.as_ref().unwrap().display_name, "<program>");
    }

    #[test]
    fn for_member_reuses_the_given_table_instead_of_wrapping_it() {
        let table = Rc::new(RefCell::new(SymbolTable::new()));
        let program = Context::program(Rc::new(RefCell::new(SymbolTable::new())));
        let member_table = Rc::clone(&table);
        let member = program.for_member("A", Span::DUMMY, member_table);
        assert!(Rc::ptr_eq(&member.symbol_table, &table));
    }
}
