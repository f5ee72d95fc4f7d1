//! `fprompt list` -- print the formula tree without starting the prompt.

use anyhow::Result;

use crate::commands::run::build_prompt;
use crate::context::RuntimeContext;
use crate::output::{format_tree, node_views, output_json};

/// Execute the `fprompt list` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let prompt = build_prompt(ctx)?;
    let tree = prompt.registrar().tree();

    if ctx.json {
        output_json(&node_views(tree, tree.root()));
        return Ok(());
    }

    let theme = ctx.theme();
    for line in format_tree(tree, &theme) {
        println!("{line}");
    }
    Ok(())
}
