//! Progress reporting for the CLI: a line on stderr redrawn in place, or
//! tracing records when stderr is not a terminal.

use relswap_core::progress::{LogProgress, ProgressSink};
use std::io::{self, IsTerminal, Write};

pub struct TerminalProgress {
    title: String,
    drawn: bool,
}

impl TerminalProgress {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            drawn: false,
        }
    }

    /// End the progress line so later output starts on a fresh line.
    pub fn finish(&mut self) {
        if self.drawn {
            eprintln!();
            self.drawn = false;
        }
    }
}

impl ProgressSink for TerminalProgress {
    fn report(&mut self, _percentage: u8, _delta: u8, label: &str) {
        let mut err = io::stderr().lock();
        let _ = write!(err, "\r{}: {:>4}", self.title, label);
        let _ = err.flush();
        self.drawn = true;
    }
}

pub enum CliProgress {
    Terminal(TerminalProgress),
    Log(LogProgress),
}

impl CliProgress {
    /// Redrawn line when stderr is a terminal; otherwise log records (e.g. under cron or CI).
    pub fn for_stderr(title: &str) -> Self {
        if io::stderr().is_terminal() {
            CliProgress::Terminal(TerminalProgress::new(title))
        } else {
            CliProgress::Log(LogProgress {
                title: title.to_string(),
            })
        }
    }

    pub fn finish(&mut self) {
        if let CliProgress::Terminal(t) = self {
            t.finish();
        }
    }
}

impl ProgressSink for CliProgress {
    fn report(&mut self, percentage: u8, delta: u8, label: &str) {
        match self {
            CliProgress::Terminal(t) => t.report(percentage, delta, label),
            CliProgress::Log(l) => l.report(percentage, delta, label),
        }
    }
}
