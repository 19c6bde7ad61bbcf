//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use clap::Subcommand;
use colored::Colorize;

pub mod activate;
pub mod agents;
pub mod init;
pub mod list;
pub mod sync;
pub mod version;

use crate::agents::ConfigUpdate;
use crate::app::AppContext;
use crate::cli::output::{emit_robot, robot_error};
use crate::engine::{AgentOutcome, EngineReport};
use crate::error::{Result, SkillsError};
use crate::reconcile::{BlockUpdate, SymlinkReport};

pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Init(args) => init::run(ctx, args),
        Commands::Activate(args) => activate::run(ctx, args),
        Commands::Sync(args) => sync::run(ctx, args),
        Commands::List(args) => list::run(ctx, args),
        Commands::Agents(args) => agents::run(ctx, args),
        Commands::Version => version::run(ctx),
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the central directory and link skills into detected agents
    Init(init::InitArgs),

    /// Activate skills for this project across agents
    Activate(activate::ActivateArgs),

    /// Re-link every central skill into each configured agent
    Sync(sync::SyncArgs),

    /// List skills in the central directory
    List(list::ListArgs),

    /// Show supported agents and their status
    Agents(agents::AgentsArgs),

    /// Print version information
    Version,
}

/// Guidance shown when a command needs `init` first.
fn report_not_initialized(ctx: &AppContext) -> Result<()> {
    let err = SkillsError::NotInitialized(ctx.central.config_path().to_path_buf());
    if ctx.robot_mode {
        return emit_robot(&robot_error(err.code(), err.to_string()));
    }
    println!("{}", "ai-skills is not initialized.".yellow());
    println!("Run {} to set up the central skills directory.", "ai-skills init".cyan());
    Ok(())
}

/// Shown when a command has no agents to act on.
fn report_no_agents(ctx: &AppContext, message: &str, hint: &str) -> Result<()> {
    if ctx.robot_mode {
        return emit_robot(&robot_error("no_agents", message));
    }
    println!("{}", message.yellow());
    println!("{hint}");
    Ok(())
}

/// `existing` followed by ids from `extra` it does not already contain.
fn merge_agents(existing: &[String], extra: &[String]) -> Vec<String> {
    let mut merged = existing.to_vec();
    for id in extra {
        if !merged.contains(id) {
            merged.push(id.clone());
        }
    }
    merged
}

fn warning_lines(report: &EngineReport) -> Vec<String> {
    report
        .warnings()
        .into_iter()
        .map(|(agent, warning)| format!("{agent}: {}: {}", warning.skill, warning.message))
        .collect()
}

fn link_summary(links: &SymlinkReport) -> String {
    if links.is_unchanged() {
        return "up to date".to_string();
    }
    format!("+{} added, -{} removed", links.created.len(), links.removed.len())
}

fn config_summary(config: &ConfigUpdate) -> Option<String> {
    match config {
        ConfigUpdate::None => None,
        ConfigUpdate::Block { path, update } => {
            let verb = match update {
                BlockUpdate::Created => "created",
                BlockUpdate::Replaced => "updated",
                BlockUpdate::Appended => "block appended",
                BlockUpdate::Unchanged => "unchanged",
            };
            Some(format!("{} {verb}", path.display()))
        }
        ConfigUpdate::TomlEntries { path, report } => Some(format!(
            "{} ({} added, {} enabled, {} disabled)",
            path.display(),
            report.added.len(),
            report.enabled.len(),
            report.disabled.len()
        )),
        ConfigUpdate::JsonSettings { path, added } => {
            Some(format!("{} ({} skill(s) added)", path.display(), added.len()))
        }
    }
}

/// One line per agent plus warnings, for human output.
fn print_outcomes(report: &EngineReport) {
    for outcome in &report.outcomes {
        let name = outcome.agent().display_name();
        match outcome {
            AgentOutcome::Activated(activation) => {
                println!("  {} {name}: {}", "✓".green(), link_summary(&activation.links));
                if let Some(config) = config_summary(&activation.config) {
                    println!("      {}", config.dimmed());
                }
            }
            AgentOutcome::Synced { links, .. } => {
                println!("  {} {name}: {}", "✓".green(), link_summary(links));
            }
            AgentOutcome::Failed { error, .. } => {
                println!("  {} {name}: {}", "✗".red(), error.red());
            }
        }
    }
    for line in warning_lines(report) {
        println!("  {} {line}", "!".yellow());
    }
}
