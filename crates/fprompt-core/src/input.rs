//! Typed, validating readers for formula arguments.
//!
//! An [`Input`] prints `Input <name>:` and then reads entries from the console
//! until it can produce a value of its kind. Every entry is first offered to
//! the [`InputPipeline`] preprocessors; only if none of them claims it does the
//! kind's own parser run.
//!
//! Retry rules:
//! - number, integer and percent inputs get `max_attempts` tries in total;
//! - a list input keeps accepting numbers until a blank line, and is only
//!   abandoned after `max_attempts` *consecutive* invalid entries;
//! - an optional input returns `None` as soon as a blank line is entered.

use tracing::debug;

use crate::console::Console;
use crate::error::{PromptError, Result};
use crate::pipeline::InputPipeline;
use crate::value::Value;

const INVALID_NUMBER: &str = "Invalid number. Try again.";
const INVALID_PERCENT: &str = "Invalid percent. Try again.";

/// The parse rule of an [`Input`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// A floating-point literal.
    Number,
    /// An integer literal.
    Integer,
    /// A fraction in `[0, 1]` or a percentage in `(1, 100]`.
    Percent,
    /// Floating-point literals, one per line, ended by a blank line.
    List,
}

impl InputKind {
    /// Every kind, in menu order.
    pub const ALL: [InputKind; 4] = [Self::List, Self::Number, Self::Integer, Self::Percent];

    /// Short lowercase name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Percent => "percent",
            Self::List => "list",
        }
    }

    /// The name shown when an input of this kind is created without one.
    pub fn default_name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Percent => "number (percent)",
            Self::List => "list",
        }
    }
}

/// One declared argument of a formula.
#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    name: String,
    kind: InputKind,
    optional: bool,
}

/// Result of fetching one line through the pipeline.
enum Entry {
    /// Optional input left blank.
    Blank,
    /// A preprocessor supplied the value.
    Resolved(Value),
    /// Trimmed text for the kind's own parser.
    Text(String),
}

impl Input {
    pub fn new(kind: InputKind, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            optional: false,
        }
    }

    /// An input of `kind` with its default display name.
    pub fn of_kind(kind: InputKind) -> Self {
        Self::new(kind, kind.default_name())
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(InputKind::Number, name)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(InputKind::Integer, name)
    }

    pub fn percent(name: impl Into<String>) -> Self {
        Self::new(InputKind::Percent, name)
    }

    pub fn list(name: impl Into<String>) -> Self {
        Self::new(InputKind::List, name)
    }

    /// Marks the input optional: a blank entry yields `None`.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> InputKind {
        self.kind
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Prompts for and reads this input.
    ///
    /// Returns `Ok(None)` only for an optional input left blank, and
    /// [`PromptError::Abandoned`] once the retry budget is spent.
    pub fn read(&self, console: &mut dyn Console, pipeline: &InputPipeline) -> Result<Option<Value>> {
        console.write_line(&format!("Input {}:", self.name))?;
        let result = match self.kind {
            InputKind::Number | InputKind::Integer | InputKind::Percent => {
                self.read_scalar(console, pipeline)
            }
            InputKind::List => self.read_list(console, pipeline),
        };
        if let Err(PromptError::Abandoned) = &result {
            debug!(input = %self.name, "input abandoned");
        }
        result
    }

    fn next_entry(&self, console: &mut dyn Console, pipeline: &InputPipeline) -> Result<Entry> {
        let line = console.read_entry()?;
        let text = line.trim();
        if self.optional && text.is_empty() {
            return Ok(Entry::Blank);
        }
        if let Some(value) = pipeline.resolve(text) {
            return Ok(Entry::Resolved(value));
        }
        Ok(Entry::Text(text.to_string()))
    }

    fn read_scalar(&self, console: &mut dyn Console, pipeline: &InputPipeline) -> Result<Option<Value>> {
        for _ in 0..pipeline.max_attempts() {
            let text = match self.next_entry(console, pipeline)? {
                Entry::Blank => return Ok(None),
                Entry::Resolved(value) => return Ok(Some(value)),
                Entry::Text(text) => text,
            };
            match self.parse_scalar(&text) {
                Ok(value) => return Ok(Some(value)),
                Err(message) => console.write_line(message)?,
            }
        }
        Err(PromptError::Abandoned)
    }

    fn parse_scalar(&self, text: &str) -> std::result::Result<Value, &'static str> {
        match self.kind {
            InputKind::Integer => text.parse().map(Value::Int).map_err(|_| INVALID_NUMBER),
            InputKind::Percent => {
                let x: f64 = text.parse().map_err(|_| INVALID_NUMBER)?;
                normalize_percent(x).map(Value::Float).ok_or(INVALID_PERCENT)
            }
            _ => text.parse().map(Value::Float).map_err(|_| INVALID_NUMBER),
        }
    }

    fn read_list(&self, console: &mut dyn Console, pipeline: &InputPipeline) -> Result<Option<Value>> {
        let mut items: Vec<f64> = Vec::new();
        let mut failures = 0;
        loop {
            let text = match self.next_entry(console, pipeline)? {
                Entry::Blank if items.is_empty() => return Ok(None),
                Entry::Blank => return Ok(Some(Value::List(items))),
                Entry::Resolved(value) => return Ok(Some(value)),
                Entry::Text(text) => text,
            };
            if let Ok(x) = text.parse::<f64>() {
                items.push(x);
                failures = 0;
                continue;
            }
            if text.is_empty() && !items.is_empty() {
                return Ok(Some(Value::List(items)));
            }
            failures += 1;
            console.write_line(INVALID_NUMBER)?;
            if failures >= pipeline.max_attempts() {
                return Err(PromptError::Abandoned);
            }
        }
    }
}

/// Maps a percent entry to a fraction.
///
/// `[0, 1]` is taken as already normalized (so `1` means 100%), `(1, 100]`
/// is divided by 100, anything else is rejected.
pub fn normalize_percent(x: f64) -> Option<f64> {
    if (0.0..=1.0).contains(&x) {
        Some(x)
    } else if x > 1.0 && x <= 100.0 {
        Some(x / 100.0)
    } else {
        None
    }
}
