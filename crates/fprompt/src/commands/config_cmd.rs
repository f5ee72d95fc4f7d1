//! `fprompt config` -- show or create the configuration file.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use fprompt_config::{DEFAULT_CONFIG_FILE, PromptConfig, save_config};

use crate::cli::{ConfigArgs, ConfigCommands, ConfigInitArgs};
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `fprompt config` command.
pub fn run(ctx: &RuntimeContext, args: &ConfigArgs) -> Result<()> {
    match &args.command {
        ConfigCommands::Show => show(ctx),
        ConfigCommands::Init(init_args) => init(ctx, init_args),
    }
}

fn show(ctx: &RuntimeContext) -> Result<()> {
    if ctx.json {
        output_json(&serde_json::json!({
            "path": ctx.config_path,
            "config": ctx.config,
        }));
        return Ok(());
    }

    match &ctx.config_path {
        Some(path) => println!("# {}", path.display()),
        None => println!("# defaults (no config file)"),
    }
    print!("{}", ctx.config.to_yaml()?);
    Ok(())
}

fn init(ctx: &RuntimeContext, args: &ConfigInitArgs) -> Result<()> {
    let path = args
        .path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    if path.exists() && !args.force {
        bail!(
            "{} already exists\nHint: pass --force to overwrite it",
            path.display()
        );
    }

    save_config(&path, &PromptConfig::default())
        .with_context(|| format!("failed to write {}", path.display()))?;

    if ctx.json {
        output_json(&serde_json::json!({ "path": path }));
    } else {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
