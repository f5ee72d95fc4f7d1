//! Configuration management for the formula prompt.
//!
//! Settings live in a YAML file (`fprompt.yaml` by default) and can be
//! overridden per-process with `FPROMPT_`-prefixed environment variables.

pub mod config;

pub use config::{
    discover_config, load_config, save_config, ColorMode, ConfigError, MemoryConfig,
    PromptConfig, Result, CONFIG_ENV, DEFAULT_CONFIG_FILE, ENV_PREFIX,
};
