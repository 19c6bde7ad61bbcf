use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::{iso_millis, to_json};
use crate::error::{Result, SkillsError};
use crate::utils::fs::{ensure_dir, read_optional, write_file};

/// Version written into newly created central configs.
pub const CONFIG_VERSION: &str = "0.1.0";
/// Central config filename inside the central directory.
pub const CENTRAL_CONFIG_FILE: &str = "config.json";

/// Global agent selection, stored at `<central>/config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CentralConfig {
    pub version: String,
    #[serde(default)]
    pub agents: Vec<String>,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso_millis")]
    pub updated_at: DateTime<Utc>,
    /// Keys this tool does not know about, kept across updates.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reads and writes the central config document.
#[derive(Debug, Clone)]
pub struct CentralStore {
    dir: PathBuf,
    config_path: PathBuf,
}

impl CentralStore {
    #[must_use]
    pub fn new(central_dir: impl Into<PathBuf>) -> Self {
        let dir = central_dir.into();
        let config_path = dir.join(CENTRAL_CONFIG_FILE);
        Self { dir, config_path }
    }

    /// The central skills directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.dir.is_dir() && self.config_path.is_file()
    }

    /// Create the central directory and a fresh config for `agents`.
    pub fn initialize(&self, agents: &[String]) -> Result<CentralConfig> {
        ensure_dir(&self.dir)?;
        let now = Utc::now();
        let config = CentralConfig {
            version: CONFIG_VERSION.to_string(),
            agents: agents.to_vec(),
            created_at: now,
            updated_at: now,
            extra: Map::new(),
        };
        self.save(&config)?;
        info!(path = %self.config_path.display(), agents = ?agents, "central config initialized");
        Ok(config)
    }

    pub fn load(&self) -> Result<CentralConfig> {
        let raw = read_optional(&self.config_path)?
            .ok_or_else(|| SkillsError::NotInitialized(self.config_path.clone()))?;
        serde_json::from_str(&raw).map_err(|err| SkillsError::parse(&self.config_path, err.to_string()))
    }

    /// Replace the agent list, bumping `updatedAt` and keeping everything else.
    pub fn update_agents(&self, agents: &[String]) -> Result<CentralConfig> {
        let mut config = self.load()?;
        config.agents = agents.to_vec();
        config.updated_at = Utc::now().max(config.updated_at);
        self.save(&config)?;
        debug!(agents = ?agents, "central agent list updated");
        Ok(config)
    }

    /// Ids of configured agents, as stored.
    pub fn configured_agents(&self) -> Result<Vec<String>> {
        Ok(self.load()?.agents)
    }

    fn save(&self, config: &CentralConfig) -> Result<()> {
        write_file(&self.config_path, &to_json(config)?)
    }
}
