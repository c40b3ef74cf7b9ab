//! Default host collaborators: a console [`HostIo`] and a filesystem
//! [`SourceLoader`], the concrete implementations `techzen-eval` keeps
//! abstract so the evaluator crate stays free of direct I/O.

use std::io::Write;

use techzen_eval::{HostIo, SourceLoader};

pub struct ConsoleIo;

impl HostIo for ConsoleIo {
    fn print_line(&mut self, text: &str) {
        println!("{text}");
    }

    fn read_line(&mut self, prompt: Option<&str>) -> String {
        if let Some(p) = prompt {
            print!("{p}");
            let _ = std::io::stdout().flush();
        }
        let mut line = String::new();
        std::io::stdin().read_line(&mut line).ok();
        line.trim_end_matches(['\n', '\r']).to_string()
    }

    fn clear_screen(&mut self) {
        print!("\x1B[2J\x1B[1;1H");
        let _ = std::io::stdout().flush();
    }
}

pub struct FsLoader;

impl SourceLoader for FsLoader {
    fn load(&self, filename: &str) -> Result<String, String> {
        std::fs::read_to_string(filename).map_err(|e| e.to_string())
    }
}
