//! ai-skills agents - Show supported agents and their status

use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::agents::AgentDescriptor;
use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::error::Result;

#[derive(Args, Debug, Default)]
pub struct AgentsArgs {
    /// Only show agents found under home
    #[arg(long)]
    pub installed: bool,
}

#[derive(Debug, Serialize)]
struct AgentStatus {
    #[serde(flatten)]
    descriptor: AgentDescriptor,
    installed: bool,
    configured: bool,
}

pub fn run(ctx: &AppContext, args: &AgentsArgs) -> Result<()> {
    let configured = if ctx.central.is_initialized() {
        ctx.central.configured_agents()?
    } else {
        Vec::new()
    };

    let statuses: Vec<AgentStatus> = ctx
        .registry
        .all()
        .map(|agent| AgentStatus {
            descriptor: agent.descriptor(),
            installed: agent.is_installed(),
            configured: configured.iter().any(|id| id == agent.id().as_str()),
        })
        .filter(|status| !args.installed || status.installed)
        .collect();

    if ctx.robot_mode {
        return emit_robot(&robot_ok(serde_json::json!({ "agents": statuses })));
    }

    let mut layout = HumanLayout::new();
    layout.title("Agents");
    for status in &statuses {
        let marker = if status.configured {
            "configured".green().to_string()
        } else if status.installed {
            "installed".yellow().to_string()
        } else {
            "not found".dimmed().to_string()
        };
        layout.kv(
            status.descriptor.id.as_str(),
            &format!("{marker}  {}", status.descriptor.skills_path.display()),
        );
    }
    emit_human(layout);
    Ok(())
}
