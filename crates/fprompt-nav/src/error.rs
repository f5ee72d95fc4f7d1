//! Registration errors.

/// Errors raised while registering formulas.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The dotted name is empty or has an empty segment.
    #[error("invalid formula name '{name}': {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Another formula or group already occupies this path.
    #[error("'{name}' is already registered")]
    DuplicateName {
        /// The full dotted path that collided.
        name: String,
    },

    /// No name was given and none can be derived from the callable.
    #[error("closures must be registered with an explicit name")]
    UnnamedCallable,
}

/// Convenience alias for registration results.
pub type Result<T> = std::result::Result<T, RegistryError>;
