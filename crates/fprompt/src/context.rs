//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds the effective configuration (file and
//! environment, then command-line flags) and the output flags every command
//! handler needs.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use fprompt_config::{discover_config, load_config, ColorMode, PromptConfig};
use fprompt_ui::Theme;

use crate::cli::{ColorChoice, GlobalArgs};

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// The config file that was read, if any.
    pub config_path: Option<PathBuf>,

    /// Effective configuration with flag overrides applied.
    pub config: PromptConfig,

    /// Whether to produce JSON output.
    pub json: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    ///
    /// Config lookup: `--config` (or `$FPROMPT_CONFIG`), else `./fprompt.yaml`
    /// if present, else defaults.
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let cwd = env::current_dir().context("failed to read the working directory")?;
        let config_path = discover_config(global.config.as_deref(), &cwd);
        let config = load_config(config_path.as_deref()).with_context(|| match &config_path {
            Some(path) => format!("failed to load config from {}", path.display()),
            None => "failed to load config".to_string(),
        })?;
        debug!(path = ?config_path, "configuration loaded");

        Ok(Self {
            config_path,
            config: apply_overrides(config, global),
            json: global.json,
        })
    }

    /// The output theme for the configured color mode.
    pub fn theme(&self) -> Theme {
        match self.config.color {
            ColorMode::Auto => Theme::detect(),
            ColorMode::Always => Theme::colored(),
            ColorMode::Never => Theme::plain(),
        }
    }
}

/// Applies command-line flags on top of the loaded configuration.
fn apply_overrides(mut config: PromptConfig, global: &GlobalArgs) -> PromptConfig {
    if let Some(places) = global.precision {
        config.decimal_places = Some(places);
    }
    if global.no_round {
        config.decimal_places = None;
    }
    if global.auto_select {
        config.auto_select_single = true;
    }
    if global.no_memory {
        config.memory.enabled = false;
    }
    if let Some(attempts) = global.max_attempts {
        config.max_entry_attempts = attempts;
    }
    if let Some(choice) = global.color {
        config.color = match choice {
            ColorChoice::Auto => ColorMode::Auto,
            ColorChoice::Always => ColorMode::Always,
            ColorChoice::Never => ColorMode::Never,
        };
    }
    config
}
