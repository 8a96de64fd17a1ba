//! ANSI terminal renderer for the output log.

use std::io::{self, Write};

use crate::output::{LogRenderer, OutputEntry, OutputKind};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const CLEARED_MARKER: &str = "-- output cleared --";

/// Writes each log entry as one line; the newest entry is always at the bottom.
pub struct AnsiRenderer<W: Write + Send> {
    out: W,
    color: bool,
}

impl AnsiRenderer<io::Stdout> {
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }
}

impl<W: Write + Send> AnsiRenderer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_entry(&mut self, entry: &OutputEntry) -> io::Result<()> {
        if self.color {
            let color = match entry.kind {
                OutputKind::Success => GREEN,
                OutputKind::Error => RED,
            };
            writeln!(self.out, "{color}{}{RESET}", entry.text)?;
        } else {
            writeln!(self.out, "{}", entry.text)?;
        }
        self.out.flush()
    }

    fn write_clear(&mut self) -> io::Result<()> {
        if self.color {
            self.out.write_all(CLEAR_SCREEN.as_bytes())?;
        } else {
            writeln!(self.out, "{CLEARED_MARKER}")?;
        }
        self.out.flush()
    }
}

impl<W: Write + Send> LogRenderer for AnsiRenderer<W> {
    fn append(&mut self, entry: &OutputEntry) {
        if let Err(error) = self.write_entry(entry) {
            tracing::warn!(%error, "failed to draw output entry");
        }
    }

    fn clear(&mut self) {
        if let Err(error) = self.write_clear() {
            tracing::warn!(%error, "failed to clear output");
        }
    }
}
