//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// EdSkill - AI-generated learning paths
#[derive(Parser)]
#[command(
    name = "es",
    about = "Generate beginner learning roadmaps with an LLM",
    version,
    after_help = "Logs are written to: ~/.local/share/edskill/logs/edskill.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, help = "Log level (trace, debug, info, warn, error)")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Sign in and open the interactive dashboard (default)
    Dashboard,

    /// Generate a single learning path and print it
    Generate {
        /// What you want to learn
        #[arg(value_name = "TOPIC", required = true, num_args = 1..)]
        topic: Vec<String>,

        /// Print the raw JSON document instead of cards
        #[arg(long)]
        json: bool,
    },

    /// Print the structured-output schema sent to the provider
    Schema,
}
