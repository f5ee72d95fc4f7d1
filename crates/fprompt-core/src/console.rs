//! The line-oriented text stream the prompt talks through.
//!
//! Everything interactive goes through the [`Console`] trait so the menus and
//! input readers can be driven from a script in tests. [`StdConsole`] is the
//! real terminal; [`ScriptedConsole`] replays canned lines and captures output.

use std::collections::VecDeque;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::error::{PromptError, Result};

/// Marker printed before every line the user is asked to type.
pub const ENTRY_MARKER: &str = ">>> ";

/// A bidirectional, line-oriented text stream.
pub trait Console {
    /// Reads one line, without its terminator.
    ///
    /// Returns [`PromptError::EndOfInput`] once the stream is exhausted.
    fn read_line(&mut self) -> Result<String>;

    /// Writes `text` as-is and flushes.
    fn write_str(&mut self, text: &str) -> Result<()>;

    /// Writes `text` followed by a newline.
    fn write_line(&mut self, text: &str) -> Result<()> {
        self.write_str(text)?;
        self.write_str("\n")
    }

    /// Prints the entry marker and reads the user's answer.
    fn read_entry(&mut self) -> Result<String> {
        self.write_str(ENTRY_MARKER)?;
        self.read_line()
    }
}

// ---------------------------------------------------------------------------
// StdConsole
// ---------------------------------------------------------------------------

/// Console bound to the process's stdin and stdout.
///
/// Both handles are locked once at construction and held for the session.
pub struct StdConsole {
    input: StdinLock<'static>,
    output: Stdout,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            input: io::stdin().lock(),
            output: io::stdout(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::EndOfInput);
        }
        trim_terminator(&mut line);
        Ok(line)
    }

    fn write_str(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }
}

fn trim_terminator(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}

// ---------------------------------------------------------------------------
// ScriptedConsole
// ---------------------------------------------------------------------------

/// Console that replays a fixed list of lines and records everything written.
#[derive(Debug, Default, Clone)]
pub struct ScriptedConsole {
    lines: VecDeque<String>,
    transcript: String,
}

impl ScriptedConsole {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            transcript: String::new(),
        }
    }

    /// Everything written so far.
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Number of scripted lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self) -> Result<String> {
        self.lines.pop_front().ok_or(PromptError::EndOfInput)
    }

    fn write_str(&mut self, text: &str) -> Result<()> {
        self.transcript.push_str(text);
        Ok(())
    }
}
