//! Multi-agent orchestration.
//!
//! The engine validates inputs up front, then drives each selected agent
//! independently. An agent that fails is recorded and the rest still run.

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::agents::{Agent, AgentActivation, AgentId, AgentRegistry};
use crate::error::{Result, SkillsError};
use crate::reconcile::{LinkWarning, SymlinkReport, reconcile};
use crate::skills::{list_central_skills, validate_requested};

/// Outcome of one agent within a batch.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AgentOutcome {
    /// Links reconciled and configuration patched.
    Activated(AgentActivation),
    /// Links reconciled against the full central catalog.
    Synced { agent: AgentId, links: SymlinkReport },
    Failed {
        agent: AgentId,
        code: &'static str,
        error: String,
    },
}

impl AgentOutcome {
    #[must_use]
    pub const fn agent(&self) -> AgentId {
        match self {
            Self::Activated(activation) => activation.agent,
            Self::Synced { agent, .. } | Self::Failed { agent, .. } => *agent,
        }
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Symlink report, if the agent got that far.
    #[must_use]
    pub const fn links(&self) -> Option<&SymlinkReport> {
        match self {
            Self::Activated(activation) => Some(&activation.links),
            Self::Synced { links, .. } => Some(links),
            Self::Failed { .. } => None,
        }
    }

    fn failed(agent: AgentId, err: &SkillsError) -> Self {
        warn!(agent = %agent, error = %err, "agent operation failed");
        Self::Failed {
            agent,
            code: err.code(),
            error: err.to_string(),
        }
    }
}

/// Per-agent outcomes of one engine call, in selection order.
#[derive(Debug, Default, Serialize)]
pub struct EngineReport {
    pub outcomes: Vec<AgentOutcome>,
}

impl EngineReport {
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }

    #[must_use]
    pub fn succeeded_count(&self) -> usize {
        self.outcomes.len() - self.failed_count()
    }

    /// Every symlink warning, tagged with its agent.
    #[must_use]
    pub fn warnings(&self) -> Vec<(AgentId, &LinkWarning)> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.links().map(|links| (outcome.agent(), links)))
            .flat_map(|(agent, links)| links.warnings.iter().map(move |w| (agent, w)))
            .collect()
    }

    /// `Err(AgentFailures)` if any agent failed.
    pub fn into_result(self) -> Result<Self> {
        let failed = self.failed_count();
        if failed == 0 {
            Ok(self)
        } else {
            Err(SkillsError::AgentFailures {
                failed,
                total: self.outcomes.len(),
            })
        }
    }
}

/// Applies skill selections across agents for one home and project.
#[derive(Debug)]
pub struct Engine<'a> {
    registry: &'a AgentRegistry,
    central_dir: &'a Path,
    project_root: &'a Path,
}

impl<'a> Engine<'a> {
    #[must_use]
    pub const fn new(registry: &'a AgentRegistry, central_dir: &'a Path, project_root: &'a Path) -> Self {
        Self {
            registry,
            central_dir,
            project_root,
        }
    }

    /// Activate `skills` for each agent in `agent_ids`.
    ///
    /// Unknown agents and unknown skills abort before anything is touched.
    pub fn activate(&self, agent_ids: &[String], skills: &[String]) -> Result<EngineReport> {
        let agents = self.registry.resolve(agent_ids)?;
        let available = list_central_skills(self.central_dir)?;
        validate_requested(skills, &available)?;

        info!(agents = agents.len(), skills = ?skills, "activating skills");
        let outcomes = agents
            .into_iter()
            .map(|agent| {
                match agent.activate_skills(skills, self.central_dir, self.project_root) {
                    Ok(activation) => AgentOutcome::Activated(activation),
                    Err(err) => AgentOutcome::failed(agent.id(), &err),
                }
            })
            .collect();
        Ok(EngineReport { outcomes })
    }

    /// Link every central skill into each agent's skills directory.
    ///
    /// Agent configuration files are left alone.
    pub fn sync(&self, agent_ids: &[String]) -> Result<EngineReport> {
        let agents = self.registry.resolve(agent_ids)?;
        let available = list_central_skills(self.central_dir)?;

        info!(agents = agents.len(), skills = available.len(), "syncing skill links");
        let outcomes = agents
            .into_iter()
            .map(|agent| self.sync_agent(agent, &available))
            .collect();
        Ok(EngineReport { outcomes })
    }

    fn sync_agent(&self, agent: &dyn Agent, available: &[String]) -> AgentOutcome {
        match reconcile(available, &agent.skills_path(), self.central_dir) {
            Ok(links) => AgentOutcome::Synced {
                agent: agent.id(),
                links,
            },
            Err(err) => AgentOutcome::failed(agent.id(), &err),
        }
    }
}
