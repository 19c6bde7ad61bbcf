//! Per-format reconcilers that converge on-disk agent configuration.
//!
//! - [`symlinks`]: agent skills directory as a farm of links into the central directory
//! - [`guarded_block`]: machine-owned block inside a markdown file
//! - [`toml_entries`]: `[[skills.config]]` entries in a TOML document
//! - [`json_settings`]: `agent.activeSkills` in a JSON settings document

pub mod guarded_block;
pub mod json_settings;
pub mod symlinks;
pub mod toml_entries;

pub use guarded_block::{BlockUpdate, Markers, SKILLS_MARKERS, upsert_block};
pub use json_settings::add_active_skills;
pub use symlinks::{LinkWarning, SymlinkReport, reconcile};
pub use toml_entries::{TomlPatchReport, upsert_skill_entries};
