use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use crossterm::style::Stylize;
use fancylogin_core::Prompter;

/// Questions on stdout, answers from the controlling terminal so prompts
/// still work when stdin is redirected. Falls back to stdin without a tty.
pub struct TerminalPrompter {
    input: Box<dyn BufRead + Send>,
}

impl TerminalPrompter {
    pub fn open() -> Self {
        let input: Box<dyn BufRead + Send> = match File::open(tty_path()) {
            Ok(tty) => Box::new(BufReader::new(tty)),
            Err(e) => {
                tracing::debug!("no controlling terminal, reading stdin: {e}");
                Box::new(BufReader::new(io::stdin()))
            }
        };
        Self { input }
    }

    #[cfg(test)]
    fn from_reader(input: impl BufRead + Send + 'static) -> Self {
        Self { input: Box::new(input) }
    }
}

fn tty_path() -> &'static str {
    if cfg!(windows) {
        "CONIN$"
    } else {
        "/dev/tty"
    }
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", question.cyan())?;
        stdout.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed while waiting for an answer"));
        }
        Ok(line.trim().to_string())
    }

    fn say(&mut self, line: &str) {
        println!("{line}");
    }
}
