//! Operator-facing status lines. These are the tool's user interface and go
//! to stdout; diagnostics go through `tracing` to stderr instead.

use std::io;

use crossterm::execute;
use crossterm::style::{Color, Stylize};
use crossterm::terminal::SetTitle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Progress chatter, shown only when verbose.
    Trace,
    Info,
    /// Shown only when verbose.
    Success,
    Warning,
    Error,
    /// Shown only when verbose.
    Completion,
}

#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    verbose: bool,
}

impl Reporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// `None` when the level is hidden at the current verbosity.
    pub fn render(&self, level: Level, message: &str) -> Option<String> {
        let line = match level {
            Level::Trace => format!("[fancy-login] {message}"),
            Level::Info => format!("🔹 {message}").with(Color::Cyan).to_string(),
            Level::Success => format!("✅ {message}").with(Color::Green).to_string(),
            Level::Warning => format!("⚠️ {message}").with(Color::Yellow).to_string(),
            Level::Error => format!("❌ {message}").with(Color::Red).to_string(),
            Level::Completion => format!("\n🎉 {message}").with(Color::Cyan).to_string(),
        };
        let always = matches!(level, Level::Info | Level::Warning | Level::Error);
        (always || self.verbose).then_some(line)
    }

    fn emit(&self, level: Level, message: &str) {
        if let Some(line) = self.render(level, message) {
            println!("{line}");
        }
    }

    pub fn trace(&self, message: &str) {
        self.emit(Level::Trace, message);
    }

    pub fn info(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    pub fn success(&self, message: &str) {
        self.emit(Level::Success, message);
    }

    pub fn warning(&self, message: &str) {
        self.emit(Level::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.emit(Level::Error, message);
    }

    pub fn completion(&self, message: &str) {
        self.emit(Level::Completion, message);
    }

    /// Puts the namespace in the terminal tab title.
    pub fn namespace_title(&self, namespace: &str) {
        if let Err(e) = execute!(io::stdout(), SetTitle(format!("ns:{namespace}"))) {
            tracing::debug!("could not set terminal title: {e}");
        }
    }
}
