//! Configuration types and loading for the formula prompt.
//!
//! The main entry point is [`PromptConfig`]. It is loaded with
//! [`load_config`], which layers, lowest precedence first:
//!
//! 1. built-in defaults;
//! 2. the YAML file, if any;
//! 3. `FPROMPT_*` environment variables (`FPROMPT_DECIMAL_PLACES=2`,
//!    `FPROMPT_MEMORY__ENABLED=false`).
//!
//! [`save_config`] writes a configuration back out as YAML.

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "fprompt.yaml";

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "FPROMPT_CONFIG";

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "FPROMPT_";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("config file not found: {}", path.display())]
    NotFound {
        /// The path that was requested.
        path: PathBuf,
    },

    /// The layered configuration could not be read or merged.
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    /// The configuration file could not be read or written.
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration could not be serialized to YAML.
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// A configuration value was invalid.
    #[error("invalid configuration value for key '{key}': {reason}")]
    InvalidValue {
        /// The configuration key that had an invalid value.
        key: String,
        /// A description of why the value is invalid.
        reason: String,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Color mode
// ---------------------------------------------------------------------------

/// When menus and results are styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Style only when stdout is a terminal that allows it.
    #[default]
    Auto,
    /// Always style.
    Always,
    /// Never style.
    Never,
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Memory extension section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Install the "Add to memory" and "Read from memory" entries.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Main config struct
// ---------------------------------------------------------------------------

/// The full prompt configuration.
///
/// Every field has a `serde` default so a partial file is filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Decimal places for formulas without their own precision; `None` disables rounding.
    #[serde(default = "default_decimal_places")]
    pub decimal_places: Option<u32>,

    /// Run a group's only child without showing its menu.
    #[serde(default)]
    pub auto_select_single: bool,

    /// Consecutive invalid entries tolerated before an entry is abandoned.
    #[serde(default = "default_max_entry_attempts")]
    pub max_entry_attempts: u32,

    /// Output styling.
    #[serde(default)]
    pub color: ColorMode,

    /// Memory extension settings.
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            decimal_places: default_decimal_places(),
            auto_select_single: false,
            max_entry_attempts: default_max_entry_attempts(),
            color: ColorMode::default(),
            memory: MemoryConfig::default(),
        }
    }
}

fn default_decimal_places() -> Option<u32> {
    Some(4)
}

fn default_max_entry_attempts() -> u32 {
    3
}

impl PromptConfig {
    /// Checks values serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.max_entry_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_entry_attempts".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// The configuration as a YAML document.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Picks the config file to read.
///
/// An explicit path always wins; otherwise [`DEFAULT_CONFIG_FILE`] in `cwd`
/// is used if it exists.
pub fn discover_config(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let candidate = cwd.join(DEFAULT_CONFIG_FILE);
    candidate.is_file().then_some(candidate)
}

/// Loads the configuration from `path` (if any) and the environment.
///
/// An empty file is valid and yields the defaults.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if `path` does not exist,
/// [`ConfigError::Load`] if the file or an environment value has the wrong
/// shape, and [`ConfigError::InvalidValue`] if a value is out of range.
pub fn load_config(path: Option<&Path>) -> Result<PromptConfig> {
    let mut figment = Figment::from(Serialized::defaults(PromptConfig::default()));

    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        if !content.trim().is_empty() {
            debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Yaml::string(&content));
        }
    }

    let config: PromptConfig = figment
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]).split("__"))
        .extract()?;
    config.validate()?;
    Ok(config)
}

/// Writes `config` to `path` as YAML, creating parent directories.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] on I/O failure or [`ConfigError::Serialize`]
/// if serialization fails.
pub fn save_config(path: &Path, config: &PromptConfig) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, config.to_yaml()?)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("fprompt.yaml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let cfg = PromptConfig::default();
        assert_eq!(cfg.decimal_places, Some(4));
        assert!(!cfg.auto_select_single);
        assert_eq!(cfg.max_entry_attempts, 3);
        assert_eq!(cfg.color, ColorMode::Auto);
        assert!(cfg.memory.enabled);
    }

    #[test]
    fn test_deserialize_partial_yaml() {
        let yaml = "decimal_places: 2\nmemory:\n  enabled: false\n";
        let cfg: PromptConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.decimal_places, Some(2));
        assert!(!cfg.memory.enabled);
        assert_eq!(cfg.max_entry_attempts, 3);
    }

    #[test]
    fn test_null_precision_disables_rounding() {
        let cfg: PromptConfig = serde_yaml::from_str("decimal_places: null\n").unwrap();
        assert_eq!(cfg.decimal_places, None);
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "auto_select_single: true\ncolor: never\n");
        let cfg = load_config(Some(&path)).unwrap();
        assert!(cfg.auto_select_single);
        assert_eq!(cfg.color, ColorMode::Never);
        assert_eq!(cfg.decimal_places, Some(4));
    }

    #[test]
    fn test_empty_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "\n");
        assert_eq!(load_config(Some(&path)).unwrap(), PromptConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("nope.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "max_entry_attempts: 0\n");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_bad_value_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "color: sometimes\n");
        assert!(matches!(load_config(Some(&path)), Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_roundtrip_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("fprompt.yaml");

        let cfg = PromptConfig {
            decimal_places: Some(6),
            auto_select_single: true,
            ..PromptConfig::default()
        };
        save_config(&path, &cfg).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), cfg);
    }

    #[test]
    fn test_discover_config() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(discover_config(None, dir.path()), None);

        let path = write(dir.path(), "");
        assert_eq!(discover_config(None, dir.path()), Some(path));

        let explicit = PathBuf::from("/elsewhere/custom.yaml");
        assert_eq!(
            discover_config(Some(&explicit), dir.path()),
            Some(explicit.clone())
        );
    }
}
