//! Command-line interface for seega.

use clap::{Parser, Subcommand};

/// Seega - two-player capture game server
#[derive(Parser, Debug)]
#[command(name = "seega")]
#[command(about = "Authoritative Seega game server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Port to bind to (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,
    },

    /// Print the board layout and a summary of the rules
    Rules,
}
