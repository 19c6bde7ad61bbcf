use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{iso_millis, to_json};
use crate::error::{Result, SkillsError};
use crate::utils::fs::{read_optional, write_file};

/// Active skill set for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub agents: Vec<String>,
    #[serde(with = "iso_millis")]
    pub updated_at: DateTime<Utc>,
}

/// Reads and writes the project config file in a project root.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    path: PathBuf,
}

impl ProjectStore {
    #[must_use]
    pub fn new(project_root: &Path, file_name: &str) -> Self {
        Self {
            path: project_root.join(file_name),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored config, or `None` if the project has none yet.
    pub fn load(&self) -> Result<Option<ProjectConfig>> {
        let Some(raw) = read_optional(&self.path)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| SkillsError::parse(&self.path, err.to_string()))
    }

    /// Skills currently active for this project; empty if none recorded.
    pub fn active_skills(&self) -> Result<Vec<String>> {
        Ok(self.load()?.map(|config| config.skills).unwrap_or_default())
    }

    /// Overwrite the project config.
    pub fn save(&self, skills: &[String], agents: &[String]) -> Result<ProjectConfig> {
        let config = ProjectConfig {
            skills: skills.to_vec(),
            agents: agents.to_vec(),
            updated_at: Utc::now(),
        };
        write_file(&self.path, &to_json(&config)?)?;
        debug!(path = %self.path.display(), skills = ?skills, "project config saved");
        Ok(config)
    }
}
