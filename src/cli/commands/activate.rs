//! ai-skills activate - Activate skills for the current project

use clap::Args;
use colored::Colorize;
use tracing::{debug, warn};

use crate::app::AppContext;
use crate::cli::output::{emit_robot, robot_batch};
use crate::error::Result;
use crate::skills::{list_central_skills, normalize_names, validate_requested};

use super::{
    merge_agents, print_outcomes, report_no_agents, report_not_initialized, warning_lines,
};

#[derive(Args, Debug, Default)]
pub struct ActivateArgs {
    /// Skills to activate, comma-separated (default: the project's current skills)
    #[arg(long, value_delimiter = ',', conflicts_with = "clear")]
    pub skills: Option<Vec<String>>,

    /// Agents to apply to, comma-separated (default: configured agents)
    #[arg(long, value_delimiter = ',')]
    pub agents: Option<Vec<String>>,

    /// Deactivate every skill for this project
    #[arg(long)]
    pub clear: bool,
}

pub fn run(ctx: &AppContext, args: &ActivateArgs) -> Result<()> {
    if !ctx.central.is_initialized() {
        return report_not_initialized(ctx);
    }

    let available = list_central_skills(ctx.central.dir())?;
    let skills = select_skills(ctx, args, &available)?;

    // Ids read back from config.json are checked too, before anything is written.
    let configured = ctx.registry.parse_agent_list(&ctx.central.configured_agents()?)?;
    let agents = match &args.agents {
        Some(requested) => ctx.registry.parse_agent_list(requested)?,
        None => configured.clone(),
    };

    if agents.is_empty() {
        let hint = format!("Pass {} or run {}.", "--agents".cyan(), "ai-skills init".cyan());
        return report_no_agents(ctx, "No agents selected.", &hint);
    }

    let merged = merge_agents(&configured, &agents);
    if merged != configured {
        debug!(agents = ?merged, "adding newly targeted agents to central config");
        ctx.central.update_agents(&merged)?;
    }
    ctx.project.save(&skills, &agents)?;

    let report = ctx.engine().activate(&agents, &skills)?;

    if ctx.robot_mode {
        let data = serde_json::json!({
            "project_config": ctx.project.path(),
            "skills": skills,
            "agents": agents,
            "outcomes": report.outcomes,
        });
        let response = robot_batch(data, report.succeeded_count(), report.failed_count())
            .with_warnings(warning_lines(&report));
        emit_robot(&response)?;
    } else {
        if skills.is_empty() {
            println!("{}", "No skills active for this project.".green().bold());
        } else {
            println!(
                "{} {}",
                "Activated skills:".green().bold(),
                skills.join(", ").cyan()
            );
        }
        print_outcomes(&report);
    }

    report.into_result().map(drop)
}

/// Explicit `--skills` must all exist. Skills carried over from the project
/// config that have since left the central directory are dropped.
fn select_skills(ctx: &AppContext, args: &ActivateArgs, available: &[String]) -> Result<Vec<String>> {
    if args.clear {
        return Ok(Vec::new());
    }
    if let Some(requested) = &args.skills {
        let skills = normalize_names(requested);
        validate_requested(&skills, available)?;
        return Ok(skills);
    }

    let (kept, missing): (Vec<String>, Vec<String>) = ctx
        .project
        .active_skills()?
        .into_iter()
        .partition(|skill| available.contains(skill));
    for skill in &missing {
        warn!(skill = %skill, "previously active skill no longer in central directory");
    }
    Ok(kept)
}
