//! Class and instance value data.
//!
//! Both hand out the *same* handle on `copy()` rather than a duplicate —
//! unlike every other value kind — because instantiation hands out a
//! single shared `this`/`self` binding that the constructor body mutates
//! in place. `Rc` sharing is what makes that legal without an explicit
//! `copy()` special case: cloning a `Value::Class`/`Value::Instance` just
//! clones the `Rc`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::context::Context;
use crate::symbol_table::SymbolTable;

pub struct ClassData {
    pub name: String,
    pub symbol_table: Rc<RefCell<SymbolTable>>,
    /// The context the class body was defined in, recorded at `Class` node
    /// evaluation time and reused as the parent of every instance's
    /// execution context.
    pub defining_ctx: Rc<Context>,
}

pub struct InstanceData {
    pub parent_class: Rc<ClassData>,
    pub symbol_table: Rc<RefCell<SymbolTable>>,
}
