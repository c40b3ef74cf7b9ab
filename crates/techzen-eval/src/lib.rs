//! techzen-eval - tree-walking evaluation of a TechZen AST.
//!
//! [`Interpreter::eval`] is the entry point: it takes a parsed [`Node`]
//! and a [`Context`] to run it in and produces either a final [`Outcome`]
//! or a [`RuntimeError`] ready to be rendered against a `SourceMap`.
//! Everything else in this crate exists to support that one call:
//! the [`Value`] system and its operator table, the [`Context`]/
//! [`SymbolTable`] scope chain, [`Outcome`]-based control flow, and the
//! fixed table of built-in functions in [`builtins`].

pub mod builtins;
pub mod context;
pub mod control;
pub mod error;
pub mod interpreter;
pub mod symbol_table;
pub mod value;

pub use builtins::global_symbol_table;
pub use context::Context;
pub use control::{Outcome, RtResult};
pub use error::RuntimeError;
pub use interpreter::{HostIo, Interpreter, SourceLoader};
pub use symbol_table::SymbolTable;
pub use techzen_par::Node;
pub use value::{Value, ValueKind};
