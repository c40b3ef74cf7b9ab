//! Command modules for the techzen CLI.

pub mod common;
pub mod repl;
pub mod run;

pub use repl::{run_repl, ReplArgs};
pub use run::{run_run, RunArgs};
