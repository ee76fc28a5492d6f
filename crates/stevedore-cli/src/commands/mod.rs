//! CLI command definitions and dispatch.

pub mod extract;
pub mod pull;

use clap::{Parser, Subcommand};

/// Stevedore — pull every image a compose configuration names.
#[derive(Parser, Debug)]
#[command(name = "stv", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract image references from a compose file into a list file.
    Extract(extract::ExtractArgs),
    /// Pull every image named in a list file, concurrently.
    Pull(pull::PullArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Extract(args) => extract::execute(args),
        Command::Pull(args) => pull::execute(args),
    }
}
