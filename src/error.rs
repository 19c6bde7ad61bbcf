//! Error types for ai-skills.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while resolving, reconciling, or persisting skill state.
#[derive(Error, Debug)]
pub enum SkillsError {
    /// Central configuration has not been created yet.
    #[error("ai-skills is not initialized (missing {}); run `ai-skills init` first", .0.display())]
    NotInitialized(PathBuf),

    #[error("unknown agent: {0}")]
    UnknownAgent(String),

    #[error("unknown skill: {0}")]
    UnknownSkill(String),

    /// A required file or directory could not be created or accessed.
    #[error("filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A structured config file exists but could not be understood.
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("missing configuration: {0}")]
    MissingConfig(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    /// One or more agents failed during a multi-agent operation.
    #[error("{failed} of {total} agent(s) failed")]
    AgentFailures { failed: usize, total: usize },
}

impl SkillsError {
    /// Wrap an I/O error with the path it happened on.
    pub fn fs(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn parse(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Stable machine-readable code for robot output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotInitialized(_) => "not_initialized",
            Self::UnknownAgent(_) => "unknown_agent",
            Self::UnknownSkill(_) => "unknown_skill",
            Self::Filesystem { .. } | Self::Io(_) => "filesystem",
            Self::Parse { .. } => "parse",
            Self::Config(_) | Self::MissingConfig(_) => "config",
            Self::Serialization(_) => "serialization",
            Self::AgentFailures { .. } => "agent_failures",
        }
    }
}

pub type Result<T> = std::result::Result<T, SkillsError>;
