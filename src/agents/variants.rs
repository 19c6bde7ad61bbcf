//! Agent-specific configuration surfaces.
//!
//! Each agent owns its paths and knows how to patch its own configuration
//! file. Symlink handling is shared through [`Agent::activate_skills`].

use std::path::{Path, PathBuf};

use super::{Agent, AgentId, ConfigUpdate};
use crate::error::Result;
use crate::reconcile::{SKILLS_MARKERS, add_active_skills, upsert_block, upsert_skill_entries};

/// Body written into a guarded block when no skills are active.
pub const NO_SKILLS_PLACEHOLDER: &str = "<!-- No skills activated -->";

/// Project-relative Claude instructions file.
pub const CLAUDE_INSTRUCTIONS_FILE: &str = ".claude/CLAUDE.md";
/// Project-relative Copilot instructions file.
pub const COPILOT_INSTRUCTIONS_FILE: &str = ".github/copilot-instructions.md";
/// Project-relative Gemini settings file.
pub const GEMINI_SETTINGS_FILE: &str = ".gemini/settings.json";
/// Home-relative Codex config file.
pub const CODEX_CONFIG_FILE: &str = ".codex/config.toml";
/// Prefix Codex expects in `[[skills.config]]` paths.
pub const CODEX_SKILL_PATH_PREFIX: &str = "~/.codex/skills/";

const COPILOT_PREAMBLE: &str = "# Copilot Instructions\n";

/// Block body for Claude instructions.
#[must_use]
pub fn render_claude_block(skills: &[String]) -> String {
    if skills.is_empty() {
        return NO_SKILLS_PLACEHOLDER.to_string();
    }
    let list = skills
        .iter()
        .map(|skill| format!("`{skill}`"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("# Project Instructions\n- Active global skills: {list}.")
}

/// Block body for Copilot instructions.
#[must_use]
pub fn render_copilot_block(skills: &[String]) -> String {
    if skills.is_empty() {
        return NO_SKILLS_PLACEHOLDER.to_string();
    }
    let mut body = String::from("When working in this repo, always enable these skills:");
    for skill in skills {
        body.push_str("\n- @");
        body.push_str(skill);
    }
    body
}

// ============================================================================
// Claude
// ============================================================================

#[derive(Debug, Clone)]
pub struct ClaudeAgent {
    home: PathBuf,
}

impl ClaudeAgent {
    #[must_use]
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }
}

impl Agent for ClaudeAgent {
    fn id(&self) -> AgentId {
        AgentId::Claude
    }

    fn home(&self) -> &Path {
        &self.home
    }

    fn update_project_configuration(
        &self,
        skills: &[String],
        project_root: &Path,
    ) -> Result<ConfigUpdate> {
        let path = project_root.join(CLAUDE_INSTRUCTIONS_FILE);
        let rendered = SKILLS_MARKERS.wrap(&render_claude_block(skills));
        let update = upsert_block(&path, SKILLS_MARKERS, &rendered, None)?;
        Ok(ConfigUpdate::Block { path, update })
    }
}

// ============================================================================
// Gemini
// ============================================================================

#[derive(Debug, Clone)]
pub struct GeminiAgent {
    home: PathBuf,
}

impl GeminiAgent {
    #[must_use]
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }
}

impl Agent for GeminiAgent {
    fn id(&self) -> AgentId {
        AgentId::Gemini
    }

    fn home(&self) -> &Path {
        &self.home
    }

    fn update_project_configuration(
        &self,
        skills: &[String],
        project_root: &Path,
    ) -> Result<ConfigUpdate> {
        let path = project_root.join(GEMINI_SETTINGS_FILE);
        let added = add_active_skills(&path, skills)?;
        Ok(ConfigUpdate::JsonSettings { path, added })
    }
}

// ============================================================================
// Codex
// ============================================================================

/// Codex reads skills from its own home-level config, not the project.
#[derive(Debug, Clone)]
pub struct CodexAgent {
    home: PathBuf,
}

impl CodexAgent {
    #[must_use]
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.home.join(CODEX_CONFIG_FILE)
    }
}

impl Agent for CodexAgent {
    fn id(&self) -> AgentId {
        AgentId::Codex
    }

    fn home(&self) -> &Path {
        &self.home
    }

    fn update_project_configuration(
        &self,
        skills: &[String],
        _project_root: &Path,
    ) -> Result<ConfigUpdate> {
        let path = self.config_path();
        let report = upsert_skill_entries(&path, skills, CODEX_SKILL_PATH_PREFIX)?;
        Ok(ConfigUpdate::TomlEntries { path, report })
    }
}

// ============================================================================
// Copilot
// ============================================================================

#[derive(Debug, Clone)]
pub struct CopilotAgent {
    home: PathBuf,
}

impl CopilotAgent {
    #[must_use]
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }
}

impl Agent for CopilotAgent {
    fn id(&self) -> AgentId {
        AgentId::Copilot
    }

    fn home(&self) -> &Path {
        &self.home
    }

    fn update_project_configuration(
        &self,
        skills: &[String],
        project_root: &Path,
    ) -> Result<ConfigUpdate> {
        let path = project_root.join(COPILOT_INSTRUCTIONS_FILE);
        let rendered = SKILLS_MARKERS.wrap(&render_copilot_block(skills));
        let update = upsert_block(&path, SKILLS_MARKERS, &rendered, Some(COPILOT_PREAMBLE))?;
        Ok(ConfigUpdate::Block { path, update })
    }
}
