//! Command-line interface.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

pub mod commands;
pub mod output;

pub use commands::Commands;

/// ai-skills - manage AI agent skills from one central directory
#[derive(Parser, Debug)]
#[command(name = "ai-skills", version, about, propagate_version = true)]
pub struct Cli {
    /// Home directory that holds agent folders and the central directory
    #[arg(long, global = true, env = "AI_SKILLS_HOME", value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Project root (defaults to the current directory)
    #[arg(long, short = 'C', global = true, value_name = "DIR")]
    pub project: Option<PathBuf>,

    /// Machine-readable JSON output
    #[arg(long, global = true)]
    pub robot: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}
