//! ai-skills version - Print version information

use crate::app::AppContext;
use crate::cli::output::{emit_robot, robot_ok};
use crate::error::Result;

pub fn run(ctx: &AppContext) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    if ctx.robot_mode {
        return emit_robot(&robot_ok(serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": version,
        })));
    }
    println!("ai-skills {version}");
    Ok(())
}
