//! The `run` subcommand: execute a script file through the full pipeline.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use techzen_eval::{global_symbol_table, Context, Interpreter, Outcome};
use techzen_lex::Lexer;
use techzen_par::Parser;
use techzen_util::span::SourceMap;

use crate::commands::common::render_top_level;
use crate::error::{Result, TechZenError};
use crate::io::{ConsoleIo, FsLoader};

pub struct RunArgs {
    pub path: PathBuf,
    pub verbose: bool,
}

pub fn run_run(args: RunArgs) -> Result<()> {
    let filename = args.path.to_string_lossy().to_string();
    tracing::debug!(file = %filename, "loading script");

    let source = std::fs::read_to_string(&args.path)?;
    let source_map = RefCell::new(SourceMap::new());
    let file_id = source_map.borrow_mut().add_file(filename.clone(), source.clone());

    let tokens = Lexer::new(&source, file_id)
        .tokenize()
        .map_err(|e| TechZenError::Source(e.render(&filename, &source_map.borrow())))?;
    let ast = Parser::parse(tokens).map_err(|e| TechZenError::Source(e.render(&filename, &source_map.borrow())))?;

    let mut io = ConsoleIo;
    let loader = FsLoader;
    let mut interp = Interpreter::new(&mut io, &loader, &source_map);
    let ctx = Context::program(Rc::new(RefCell::new(global_symbol_table())));

    tracing::debug!("starting evaluation");
    let outcome = interp
        .eval(&ast, &ctx)
        .map_err(|e| TechZenError::Runtime(e.render(&source_map.borrow())))?;

    match outcome {
        Outcome::Exit(_) => {}
        Outcome::Value(v) => println!("{}", render_top_level(&v)),
        _ => unreachable!("a top-level program never yields continue/break/return"),
    }

    if args.verbose {
        tracing::debug!("finished evaluation");
    }
    Ok(())
}
