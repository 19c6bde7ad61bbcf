//! ai-skills list - List skills in the central directory

use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::output::{emit_robot, robot_ok};
use crate::error::Result;
use crate::skills::list_central_skills;

use super::report_not_initialized;

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only show skills active in this project
    #[arg(long)]
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
struct SkillEntry {
    name: String,
    active: bool,
}

pub fn run(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    if !ctx.central.is_initialized() {
        return report_not_initialized(ctx);
    }

    let active = ctx.project.active_skills()?;
    let entries: Vec<SkillEntry> = list_central_skills(ctx.central.dir())?
        .into_iter()
        .map(|name| SkillEntry {
            active: active.contains(&name),
            name,
        })
        .filter(|entry| !args.active || entry.active)
        .collect();
    debug!(count = entries.len(), active_only = args.active, "listing skills");

    if ctx.robot_mode {
        let data = serde_json::json!({
            "central_dir": ctx.central.dir(),
            "count": entries.len(),
            "skills": entries,
        });
        return emit_robot(&robot_ok(data));
    }

    if entries.is_empty() {
        println!("No skills found");
        println!();
        println!("Add skill folders under {}", ctx.central.dir().display());
        return Ok(());
    }

    for entry in &entries {
        if entry.active {
            println!("{} {}", "●".green(), entry.name.bold());
        } else {
            println!("{} {}", "○".dimmed(), entry.name);
        }
    }
    println!();
    let active_count = entries.iter().filter(|e| e.active).count();
    println!("{} skill(s), {active_count} active in this project", entries.len());
    Ok(())
}
