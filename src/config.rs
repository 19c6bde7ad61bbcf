//! Runtime settings.
//!
//! Settings are layered: built-in defaults, then an optional `settings.toml`,
//! then `AI_SKILLS_*` environment overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SkillsError};

/// Default project config filename, stored in the project root.
pub const DEFAULT_PROJECT_FILE: &str = ".ai-skills.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Central skills directory; `None` means `<home>/.config/ai-skills`.
    #[serde(default)]
    pub central_dir: Option<String>,
    #[serde(default = "default_project_file")]
    pub project_file: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            central_dir: None,
            project_file: default_project_file(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub robot: bool,
}

fn default_project_file() -> String {
    DEFAULT_PROJECT_FILE.to_string()
}

impl Settings {
    /// Load settings for the given home directory using the process environment.
    pub fn load(home: &Path) -> Result<Self> {
        Self::load_with_env(home, |key| std::env::var(key).ok())
    }

    /// Load settings with an injected environment lookup.
    pub fn load_with_env<F>(home: &Path, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        let path = env("AI_SKILLS_SETTINGS")
            .map(PathBuf::from)
            .unwrap_or_else(|| default_settings_path(home));
        if let Some(patch) = Self::load_patch(&path)? {
            settings.merge_patch(patch);
        }

        settings.apply_env_overrides(&env)?;
        Ok(settings)
    }

    fn load_patch(path: &Path) -> Result<Option<SettingsPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| SkillsError::Config(format!("read settings {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| SkillsError::Config(format!("parse settings {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: SettingsPatch) {
        if let Some(paths) = patch.paths {
            if let Some(value) = paths.central_dir {
                self.paths.central_dir = Some(value);
            }
            if let Some(value) = paths.project_file {
                self.paths.project_file = value;
            }
        }
        if let Some(output) = patch.output {
            if let Some(value) = output.robot {
                self.output.robot = value;
            }
        }
    }

    fn apply_env_overrides<F>(&mut self, env: &F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = env("AI_SKILLS_CENTRAL_DIR") {
            self.paths.central_dir = Some(value);
        }
        if let Some(value) = env("AI_SKILLS_PROJECT_FILE") {
            if value.trim().is_empty() {
                return Err(SkillsError::Config(
                    "AI_SKILLS_PROJECT_FILE must not be empty".to_string(),
                ));
            }
            self.paths.project_file = value;
        }
        if let Some(value) = env("AI_SKILLS_ROBOT") {
            self.output.robot = parse_bool(&value);
        }
        Ok(())
    }

    /// Resolve the central skills directory against `home`.
    #[must_use]
    pub fn central_dir(&self, home: &Path) -> PathBuf {
        self.paths
            .central_dir
            .as_deref()
            .map_or_else(|| default_central_dir(home), |raw| expand_home(raw, home))
    }
}

/// `<home>/.config/ai-skills`
#[must_use]
pub fn default_central_dir(home: &Path) -> PathBuf {
    home.join(".config").join("ai-skills")
}

fn default_settings_path(home: &Path) -> PathBuf {
    default_central_dir(home).join("settings.toml")
}

/// Expand a leading `~` or `~/` against `home`.
#[must_use]
pub fn expand_home(raw: &str, home: &Path) -> PathBuf {
    if raw == "~" {
        home.to_path_buf()
    } else if let Some(rest) = raw.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(raw)
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SettingsPatch {
    pub paths: Option<PathsPatch>,
    pub output: Option<OutputPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PathsPatch {
    pub central_dir: Option<String>,
    pub project_file: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct OutputPatch {
    pub robot: Option<bool>,
}
