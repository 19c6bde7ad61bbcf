//! ai-skills: keep AI agent skills in one place and project them into each
//! agent's skills directory and configuration files.

pub mod agents;
pub mod app;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod reconcile;
pub mod skills;
pub mod store;
pub mod test_utils;
pub mod utils;

pub use error::{Result, SkillsError};
