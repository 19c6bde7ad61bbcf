//! Lookup table from agent id to agent implementation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, info};

use super::variants::{ClaudeAgent, CodexAgent, CopilotAgent, GeminiAgent};
use super::{Agent, AgentDescriptor, AgentId};
use crate::error::{Result, SkillsError};
use crate::skills::normalize_names;

/// All supported agents, bound to one home directory.
pub struct AgentRegistry {
    agents: HashMap<AgentId, Box<dyn Agent>>,
    home: PathBuf,
}

impl AgentRegistry {
    /// Registry whose agent paths derive from `home`.
    #[must_use]
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        let agents: Vec<Box<dyn Agent>> = vec![
            Box::new(ClaudeAgent::new(&home)),
            Box::new(GeminiAgent::new(&home)),
            Box::new(CodexAgent::new(&home)),
            Box::new(CopilotAgent::new(&home)),
        ];
        Self {
            agents: agents.into_iter().map(|agent| (agent.id(), agent)).collect(),
            home,
        }
    }

    #[must_use]
    pub fn home(&self) -> &Path {
        &self.home
    }

    #[must_use]
    pub fn get(&self, id: AgentId) -> Option<&dyn Agent> {
        self.agents.get(&id).map(Box::as_ref)
    }

    /// Look up an agent by its string id.
    pub fn lookup(&self, id: &str) -> Result<&dyn Agent> {
        let agent_id = AgentId::from_str(id)?;
        self.get(agent_id)
            .ok_or_else(|| SkillsError::UnknownAgent(id.to_string()))
    }

    /// Resolve every id, failing on the first unknown one.
    ///
    /// Duplicates are dropped; order of first occurrence is kept.
    pub fn resolve(&self, ids: &[String]) -> Result<Vec<&dyn Agent>> {
        let mut resolved: Vec<&dyn Agent> = Vec::with_capacity(ids.len());
        for id in ids {
            let agent = self.lookup(id)?;
            if !resolved.iter().any(|seen| seen.id() == agent.id()) {
                resolved.push(agent);
            }
        }
        Ok(resolved)
    }

    /// Canonical ids from raw CLI input: comma lists are split, blanks and
    /// repeats dropped, and every id checked against the table.
    pub fn parse_agent_list(&self, raw: &[String]) -> Result<Vec<String>> {
        let ids = normalize_names(raw);
        self.resolve(&ids)?;
        Ok(ids)
    }

    /// All agents in display order.
    pub fn all(&self) -> impl Iterator<Item = &dyn Agent> + '_ {
        AgentId::all().iter().filter_map(|id| self.get(*id))
    }

    #[must_use]
    pub fn descriptors(&self) -> Vec<AgentDescriptor> {
        self.all().map(|agent| agent.descriptor()).collect()
    }

    /// Agents whose dot-directory exists under home.
    #[must_use]
    pub fn detect_installed(&self) -> Vec<AgentDescriptor> {
        info!(home = %self.home.display(), "Scanning for installed agents");
        let detected: Vec<AgentDescriptor> = self
            .all()
            .filter(|agent| {
                let installed = agent.is_installed();
                debug!(agent = %agent.id(), installed, "agent probe");
                installed
            })
            .map(|agent| agent.descriptor())
            .collect();
        info!(count = detected.len(), "Agent detection complete");
        detected
    }
}

impl std::fmt::Debug for AgentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentRegistry")
            .field("home", &self.home)
            .field("agents", &AgentId::all())
            .finish()
    }
}
