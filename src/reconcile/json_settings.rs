//! Active skill list in a JSON settings document (`agent.activeSkills`).
//!
//! The patch is additive: names are appended when missing and never removed.
//! Sibling keys at every level are preserved in their original order.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::info;

use crate::error::{Result, SkillsError};
use crate::utils::fs::{read_optional, write_file};

pub const AGENT_KEY: &str = "agent";
pub const ACTIVE_SKILLS_KEY: &str = "activeSkills";

/// Append `skill_names` to `agent.activeSkills` in `settings_path`.
///
/// Returns the names that were newly added, in input order.
pub fn add_active_skills(settings_path: &Path, skill_names: &[String]) -> Result<Vec<String>> {
    let mut doc = match read_optional(settings_path)? {
        Some(raw) if !raw.trim().is_empty() => serde_json::from_str::<Value>(&raw)
            .map_err(|err| SkillsError::parse(settings_path, err.to_string()))?,
        _ => Value::Object(Map::new()),
    };

    let added = merge_active_skills(&mut doc, skill_names)
        .map_err(|message| SkillsError::parse(settings_path, message))?;

    let rendered = serde_json::to_string_pretty(&doc)
        .map_err(|err| SkillsError::Serialization(format!("{}: {err}", settings_path.display())))?;
    write_file(settings_path, &rendered)?;

    info!(path = %settings_path.display(), added = added.len(), "active skills merged");
    Ok(added)
}

/// Merge names into an in-memory settings document.
///
/// Errors describe a shape mismatch in the existing document.
pub fn merge_active_skills(
    doc: &mut Value,
    skill_names: &[String],
) -> std::result::Result<Vec<String>, String> {
    let Value::Object(root) = doc else {
        return Err("settings root must be a JSON object".to_string());
    };
    let agent = root
        .entry(AGENT_KEY)
        .or_insert_with(|| Value::Object(Map::new()));
    let Value::Object(agent) = agent else {
        return Err(format!("`{AGENT_KEY}` must be an object"));
    };
    let active = agent
        .entry(ACTIVE_SKILLS_KEY)
        .or_insert_with(|| Value::Array(Vec::new()));
    let Value::Array(active) = active else {
        return Err(format!("`{AGENT_KEY}.{ACTIVE_SKILLS_KEY}` must be an array"));
    };

    let mut added = Vec::new();
    for name in skill_names {
        if active.iter().any(|v| v.as_str() == Some(name.as_str())) {
            continue;
        }
        active.push(Value::String(name.clone()));
        added.push(name.clone());
    }
    Ok(added)
}
