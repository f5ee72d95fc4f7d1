//! Error taxonomy for interactive input and formula evaluation.

/// Errors raised while driving the interactive prompt.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// The user exhausted the retry budget for the current entry.
    ///
    /// Input collection treats this as "cancel the formula run"; a menu
    /// treats it as "go back one level".
    #[error("too many invalid entries, operation abandoned")]
    Abandoned,

    /// The line source closed while a read was pending.
    #[error("input stream closed")]
    EndOfInput,

    /// Reading from or writing to the console failed.
    #[error("console I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A formula body failed. These are never caught by the prompt.
    #[error("formula failed: {0}")]
    Formula(#[from] FormulaError),
}

impl PromptError {
    /// Returns `true` if this is [`PromptError::Abandoned`].
    pub fn is_abandoned(&self) -> bool {
        matches!(self, Self::Abandoned)
    }
}

/// Convenience alias used throughout the prompt crates.
pub type Result<T> = std::result::Result<T, PromptError>;

/// Errors raised by formula bodies or while unpacking their arguments.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormulaError {
    /// The formula asked for an argument that was not supplied.
    #[error("argument {index} is missing")]
    MissingArgument {
        /// Zero-based position of the argument.
        index: usize,
    },

    /// The argument at `index` holds a different kind of value.
    #[error("argument {index} should be {expected}, got {found}")]
    ArgumentType {
        /// Zero-based position of the argument.
        index: usize,
        /// What the formula asked for.
        expected: &'static str,
        /// What the user supplied.
        found: &'static str,
    },

    /// The inputs are outside the formula's domain.
    #[error("{0}")]
    Domain(String),
}

impl FormulaError {
    /// Creates a [`FormulaError::Domain`] with the given message.
    pub fn domain(message: impl Into<String>) -> Self {
        Self::Domain(message.into())
    }
}
