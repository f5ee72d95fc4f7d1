//! `fprompt run` -- the interactive prompt.

use anyhow::{Context, Result, bail};
use tracing::info;

use fprompt_memory::MemoryExtension;
use fprompt_nav::{Exit, Prompt};

use crate::context::RuntimeContext;
use crate::library;

/// Builds the prompt the configuration describes, with every bundled formula.
pub fn build_prompt(ctx: &RuntimeContext) -> Result<Prompt> {
    let config = &ctx.config;
    let mut prompt = Prompt::new();
    prompt.set_default_precision(config.decimal_places);
    prompt.set_max_attempts(config.max_entry_attempts);
    prompt.set_auto_select(config.auto_select_single);
    prompt.set_theme(ctx.theme());
    if config.memory.enabled {
        prompt.install(&MemoryExtension::new());
    }
    library::register_all(&mut prompt).context("failed to register the bundled formulas")?;
    Ok(prompt)
}

/// Execute the `fprompt run` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let prompt = build_prompt(ctx)?;
    let exit = prompt.launch().context("prompt stopped")?;
    info!(?exit, "prompt finished");
    match exit {
        Exit::Quit | Exit::EndOfInput => Ok(()),
        Exit::Abandoned => bail!("too many invalid entries at the main menu"),
    }
}
