//! CLI module for Feelora
//!
//! Provides command-line interface parsing for the feelora-server binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Feelora - mental wellness platform server
#[derive(Parser, Debug)]
#[command(
    name = "feelora-server",
    author = "Feelora <build@feelora.app>",
    version,
    about = "Feelora - mental wellness platform server",
    long_about = "Serves counselor booking, events, resources, role dashboards and an AI\n\
                  wellness companion over a JSON API.\n\n\
                  Run without arguments to start the server.",
    after_help = "EXAMPLES:\n    \
                  feelora-server                          # Start the server\n    \
                  feelora-server --config my.toml serve   # Use a custom config file\n    \
                  feelora-server config                   # Show the resolved configuration\n    \
                  feelora-server chat \"I feel anxious\"    # Talk to the wellness companion once"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "feelora.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (the default)
    Serve,

    /// Show the resolved configuration with secrets masked
    Config {
        /// Also validate the configuration and environment
        #[arg(long)]
        validate: bool,
    },

    /// Send one message to the wellness companion and print the reply
    Chat {
        /// What you would like to share
        message: String,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
