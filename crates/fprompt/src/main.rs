//! `fprompt` -- interactive formula prompt.
//!
//! Parses CLI arguments with clap, resolves the runtime context (config file,
//! environment and flag overrides), and dispatches to command handlers.
//! Without a subcommand the interactive prompt starts.

mod cli;
mod commands;
mod context;
mod library;
mod output;

use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;

use cli::{Cli, Commands};
use context::RuntimeContext;

/// Tracks whether a Ctrl+C has already been received.
static CTRLC_RECEIVED: AtomicBool = AtomicBool::new(false);

fn main() {
    // First Ctrl+C: exit cleanly. Second: force exit.
    let _ = ctrlc::set_handler(|| {
        if CTRLC_RECEIVED.swap(true, Ordering::SeqCst) {
            std::process::exit(1);
        }
        println!();
        std::process::exit(0);
    });

    let cli = Cli::parse();

    if cli.global.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("fprompt=debug,fprompt_core=debug,fprompt_nav=debug,fprompt_memory=debug,fprompt_config=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let result = RuntimeContext::from_global_args(&cli.global).and_then(|ctx| match &cli.command {
        None | Some(Commands::Run) => commands::run::run(&ctx),
        Some(Commands::List) => commands::list::run(&ctx),
        Some(Commands::Config(args)) => commands::config_cmd::run(&ctx, args),
        Some(Commands::Completion(args)) => commands::completion::run(args),
    });

    // Handle errors: print message and exit with code 1
    if let Err(e) = result {
        if cli.global.json {
            let err_json = serde_json::json!({
                "error": format!("{:#}", e),
            });
            if let Ok(s) = serde_json::to_string_pretty(&err_json) {
                eprintln!("{}", s);
            }
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}
