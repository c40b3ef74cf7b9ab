//! The `repl` subcommand: the host side of the REPL contract described
//! alongside the language's external interfaces - read a line, run it
//! against the shared global symbol table with filename `<stdin>`, print
//! the result or error, and stop once the program signals `exit` or the
//! input stream ends.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use techzen_eval::{global_symbol_table, Context, Interpreter, Outcome};
use techzen_lex::Lexer;
use techzen_par::Parser;
use techzen_util::span::SourceMap;

use crate::commands::common::render_top_level;
use crate::error::Result;
use crate::io::{ConsoleIo, FsLoader};

pub struct ReplArgs {
    pub verbose: bool,
}

const STDIN_FILENAME: &str = "<stdin>";

pub fn run_repl(args: ReplArgs) -> Result<()> {
    let source_map = RefCell::new(SourceMap::new());
    let global = Rc::new(RefCell::new(global_symbol_table()));
    let ctx = Context::program(Rc::clone(&global));
    let mut host_io = ConsoleIo;
    let loader = FsLoader;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("techzen> ");
        io::stdout().flush().ok();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(_)) | None => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let file_id = source_map.borrow_mut().add_file(STDIN_FILENAME, line.clone());

        let tokens = match Lexer::new(&line, file_id).tokenize() {
            Ok(t) => t,
            Err(e) => {
                println!("{}", e.render(STDIN_FILENAME, &source_map.borrow()));
                continue;
            }
        };
        let ast = match Parser::parse(tokens) {
            Ok(ast) => ast,
            Err(e) => {
                println!("{}", e.render(STDIN_FILENAME, &source_map.borrow()));
                continue;
            }
        };

        let mut interp = Interpreter::new(&mut host_io, &loader, &source_map);
        match interp.eval(&ast, &ctx) {
            Ok(Outcome::Exit(_)) => break,
            Ok(Outcome::Value(v)) => println!("{}", render_top_level(&v)),
            Ok(_) => unreachable!("a top-level line never yields continue/break/return"),
            Err(e) => println!("{}", e.render(&source_map.borrow())),
        }

        if args.verbose {
            tracing::debug!("processed one REPL line");
        }
    }

    Ok(())
}
