//! ai-skills init - Create the central directory and link skills into agents

use clap::Args;
use colored::Colorize;
use tracing::info;

use crate::app::AppContext;
use crate::cli::output::{emit_robot, robot_batch};
use crate::error::Result;

use super::{merge_agents, print_outcomes, report_no_agents, warning_lines};

#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// Agents to configure, comma-separated (default: agents found under home)
    #[arg(long, value_delimiter = ',')]
    pub agents: Vec<String>,

    /// Recreate the central config even if one exists
    #[arg(long, short)]
    pub force: bool,
}

pub fn run(ctx: &AppContext, args: &InitArgs) -> Result<()> {
    let requested = ctx.registry.parse_agent_list(&args.agents)?;
    let selected: Vec<String> = if requested.is_empty() {
        ctx.registry
            .detect_installed()
            .iter()
            .map(|agent| agent.id.to_string())
            .collect()
    } else {
        requested
    };

    if selected.is_empty() {
        return report_nothing_detected(ctx);
    }

    let reinitialized = args.force || !ctx.central.is_initialized();
    let config = if reinitialized {
        ctx.central.initialize(&selected)?
    } else {
        let existing = ctx.registry.parse_agent_list(&ctx.central.configured_agents()?)?;
        ctx.central.update_agents(&merge_agents(&existing, &selected))?
    };
    info!(agents = ?config.agents, reinitialized, "central config ready");

    let report = ctx.engine().sync(&config.agents)?;

    if ctx.robot_mode {
        let data = serde_json::json!({
            "central_dir": ctx.central.dir(),
            "config_path": ctx.central.config_path(),
            "agents": config.agents,
            "reinitialized": reinitialized,
            "outcomes": report.outcomes,
        });
        let response = robot_batch(data, report.succeeded_count(), report.failed_count())
            .with_warnings(warning_lines(&report));
        emit_robot(&response)?;
    } else {
        let verb = if reinitialized { "Initialized" } else { "Updated" };
        println!(
            "{} {}",
            format!("{verb} ai-skills at").green().bold(),
            ctx.central.dir().display()
        );
        println!("Agents: {}", config.agents.join(", ").cyan());
        print_outcomes(&report);
    }

    report.into_result().map(drop)
}

fn report_nothing_detected(ctx: &AppContext) -> Result<()> {
    let mut hint = String::from("Expected one of:");
    for agent in ctx.registry.descriptors() {
        let dot_dir = agent
            .skills_path
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        hint.push_str(&format!("\n  - {dot_dir} ({})", agent.display_name));
    }
    hint.push_str(&format!("\nOr pass {} explicitly.", "--agents".cyan()));
    report_no_agents(ctx, "No AI agent folders detected.", &hint)
}
