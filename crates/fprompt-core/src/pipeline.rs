//! Preprocessing stage consulted before an input's own parser.

use std::fmt;

use tracing::debug;

use crate::MAX_ENTRY_ATTEMPTS;
use crate::value::Value;

/// A hook offered the raw text of every entry before it is parsed.
///
/// Returning `Some` short-circuits parsing: the value becomes the input's
/// result as-is, whatever the input's declared kind.
pub trait Preprocessor {
    /// Name used in debug logs.
    fn name(&self) -> &str {
        "preprocessor"
    }

    fn preprocess(&self, raw: &str) -> Option<Value>;
}

impl<F> Preprocessor for F
where
    F: Fn(&str) -> Option<Value>,
{
    fn preprocess(&self, raw: &str) -> Option<Value> {
        self(raw)
    }
}

/// Shared settings for every input read: the ordered preprocessors and the
/// retry budget.
pub struct InputPipeline {
    preprocessors: Vec<Box<dyn Preprocessor>>,
    max_attempts: u32,
}

impl InputPipeline {
    pub fn new() -> Self {
        Self {
            preprocessors: Vec::new(),
            max_attempts: MAX_ENTRY_ATTEMPTS,
        }
    }

    /// Sets the number of consecutive invalid entries tolerated. Clamped to at least 1.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Appends a preprocessor. Earlier ones take precedence.
    pub fn push(&mut self, preprocessor: Box<dyn Preprocessor>) {
        self.preprocessors.push(preprocessor);
    }

    pub fn len(&self) -> usize {
        self.preprocessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.preprocessors.is_empty()
    }

    /// Offers `raw` to each preprocessor in order; the first answer wins.
    pub fn resolve(&self, raw: &str) -> Option<Value> {
        self.preprocessors.iter().find_map(|p| {
            let value = p.preprocess(raw)?;
            debug!(preprocessor = p.name(), raw, "entry substituted");
            Some(value)
        })
    }
}

impl Default for InputPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InputPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputPipeline")
            .field("preprocessors", &self.preprocessors.len())
            .field("max_attempts", &self.max_attempts)
            .finish()
    }
}
