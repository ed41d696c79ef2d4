//! Command-line surface: subcommands and plain-text report rendering
pub mod commands;
pub mod report;

pub use commands::{Cli, Commands, run};
