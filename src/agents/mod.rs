//! Supported AI coding agents and how skills are projected into each.
//!
//! Every agent gets a symlink farm under `<home>/.<agent>/skills`. On top of
//! that each variant patches its own configuration surface:
//!
//! - Claude: guarded block in `<project>/.claude/CLAUDE.md`
//! - Copilot: guarded block in `<project>/.github/copilot-instructions.md`
//! - Gemini: `agent.activeSkills` in `<project>/.gemini/settings.json`
//! - Codex: `[[skills.config]]` entries in `<home>/.codex/config.toml`
//!
//! # Example
//!
//! ```rust,no_run
//! use ai_skills::agents::{AgentId, AgentRegistry};
//!
//! let registry = AgentRegistry::with_home("/home/dev");
//! for agent in registry.detect_installed() {
//!     println!("{} -> {}", agent.display_name, agent.skills_path.display());
//! }
//! # let _ = AgentId::Claude;
//! ```

mod registry;
mod variants;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SkillsError};
use crate::reconcile::symlinks::{self, SymlinkReport};
use crate::reconcile::{BlockUpdate, TomlPatchReport};

pub use registry::AgentRegistry;
pub use variants::{
    CLAUDE_INSTRUCTIONS_FILE, CODEX_CONFIG_FILE, CODEX_SKILL_PATH_PREFIX, COPILOT_INSTRUCTIONS_FILE,
    ClaudeAgent, CodexAgent, CopilotAgent, GEMINI_SETTINGS_FILE, GeminiAgent, NO_SKILLS_PLACEHOLDER,
    render_claude_block, render_copilot_block,
};

/// Identifier of a supported agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentId {
    Claude,
    Gemini,
    Codex,
    Copilot,
}

impl AgentId {
    /// Identifier used on the command line and in config files.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Gemini => "gemini",
            Self::Codex => "codex",
            Self::Copilot => "copilot",
        }
    }

    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Claude => "Claude",
            Self::Gemini => "Gemini",
            Self::Codex => "Codex",
            Self::Copilot => "Copilot",
        }
    }

    /// Per-agent directory under home, e.g. `.claude`.
    #[must_use]
    pub const fn dot_dir(&self) -> &'static str {
        match self {
            Self::Claude => ".claude",
            Self::Gemini => ".gemini",
            Self::Codex => ".codex",
            Self::Copilot => ".copilot",
        }
    }

    /// All supported agents, in display order.
    #[must_use]
    pub const fn all() -> &'static [AgentId] {
        &[Self::Claude, Self::Gemini, Self::Codex, Self::Copilot]
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentId {
    type Err = SkillsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| SkillsError::UnknownAgent(s.to_string()))
    }
}

/// Static description of one agent for a given home directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDescriptor {
    pub id: AgentId,
    pub display_name: String,
    pub skills_path: PathBuf,
}

/// What an agent's configuration patch step did.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigUpdate {
    /// The agent has no configuration surface beyond its skills directory.
    None,
    Block { path: PathBuf, update: BlockUpdate },
    TomlEntries { path: PathBuf, report: TomlPatchReport },
    JsonSettings { path: PathBuf, added: Vec<String> },
}

/// Result of activating skills for one agent.
#[derive(Debug, Clone, Serialize)]
pub struct AgentActivation {
    pub agent: AgentId,
    pub links: SymlinkReport,
    pub config: ConfigUpdate,
}

/// Contract shared by all agent variants.
pub trait Agent: Send + Sync {
    fn id(&self) -> AgentId;

    /// Home directory this agent's paths derive from.
    fn home(&self) -> &Path;

    /// Directory the agent loads skills from.
    fn skills_path(&self) -> PathBuf {
        self.home().join(self.id().dot_dir()).join("skills")
    }

    fn descriptor(&self) -> AgentDescriptor {
        AgentDescriptor {
            id: self.id(),
            display_name: self.id().display_name().to_string(),
            skills_path: self.skills_path(),
        }
    }

    /// Cheap heuristic: the agent's dot-directory exists.
    fn is_installed(&self) -> bool {
        self.skills_path().parent().is_some_and(Path::is_dir)
    }

    /// Patch the agent's own configuration surface for `skills`.
    fn update_project_configuration(
        &self,
        _skills: &[String],
        _project_root: &Path,
    ) -> Result<ConfigUpdate> {
        Ok(ConfigUpdate::None)
    }

    /// Reconcile the skills directory, then patch configuration.
    fn activate_skills(
        &self,
        skills: &[String],
        central_dir: &Path,
        project_root: &Path,
    ) -> Result<AgentActivation> {
        debug!(agent = %self.id(), skills = ?skills, "activating skills");
        let links = symlinks::reconcile(skills, &self.skills_path(), central_dir)?;
        let config = self.update_project_configuration(skills, project_root)?;
        Ok(AgentActivation {
            agent: self.id(),
            links,
            config,
        })
    }
}
