//! Command handlers, one module per subcommand.

pub mod completion;
pub mod config_cmd;
pub mod list;
pub mod run;
