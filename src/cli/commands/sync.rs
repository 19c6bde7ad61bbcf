//! ai-skills sync - Re-link every central skill into configured agents

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::output::{emit_robot, robot_batch};
use crate::error::Result;

use super::{print_outcomes, report_no_agents, report_not_initialized, warning_lines};

#[derive(Args, Debug, Default)]
pub struct SyncArgs {
    /// Only sync these agents, comma-separated (default: configured agents)
    #[arg(long, value_delimiter = ',')]
    pub agents: Vec<String>,
}

pub fn run(ctx: &AppContext, args: &SyncArgs) -> Result<()> {
    if !ctx.central.is_initialized() {
        return report_not_initialized(ctx);
    }

    let requested = ctx.registry.parse_agent_list(&args.agents)?;
    let agents = if requested.is_empty() {
        ctx.central.configured_agents()?
    } else {
        requested
    };

    if agents.is_empty() {
        let hint = format!("Run {} to select agents.", "ai-skills init --agents <ids>".cyan());
        return report_no_agents(ctx, "No agents configured.", &hint);
    }

    let report = ctx.engine().sync(&agents)?;

    if ctx.robot_mode {
        let data = serde_json::json!({
            "central_dir": ctx.central.dir(),
            "outcomes": report.outcomes,
        });
        let response = robot_batch(data, report.succeeded_count(), report.failed_count())
            .with_warnings(warning_lines(&report));
        emit_robot(&response)?;
    } else {
        println!("{}", "Syncing skill links".bold());
        print_outcomes(&report);
    }

    report.into_result().map(drop)
}
