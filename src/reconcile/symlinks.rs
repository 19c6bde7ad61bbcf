//! Symlink farm reconciliation.
//!
//! Converges an agent's skills directory so that the set of *managed* links
//! (links whose target lies inside the central skills directory) equals the
//! desired skills that actually exist centrally. Real files and directories,
//! and links pointing anywhere else, are never removed.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Result, SkillsError};
use crate::skills::is_central_skill;
use crate::utils::fs::{absolute, create_dir_link, ensure_dir, is_link, remove_link};

/// A per-skill problem that did not abort the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkWarning {
    pub skill: String,
    pub message: String,
}

/// What one reconciliation pass changed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SymlinkReport {
    /// Links that did not exist before this pass.
    pub created: Vec<String>,
    /// Existing links that were removed and recreated.
    pub refreshed: Vec<String>,
    /// Managed links removed because their skill is no longer desired.
    pub removed: Vec<String>,
    /// Desired skills whose slot is occupied by a real file or directory.
    pub skipped: Vec<String>,
    pub warnings: Vec<LinkWarning>,
}

impl SymlinkReport {
    /// True when nothing was added or removed.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.created.is_empty() && self.removed.is_empty()
    }

    fn warn(&mut self, skill: &str, message: impl Into<String>) {
        let message = message.into();
        warn!(skill, %message, "symlink reconciliation warning");
        self.warnings.push(LinkWarning {
            skill: skill.to_string(),
            message,
        });
    }
}

/// Reconcile `agent_skills_path` against `desired` skills from `central_skills_path`.
///
/// Fails only if the agent skills directory cannot be created or listed.
/// Per-skill failures are reported as warnings.
pub fn reconcile(
    desired: &[String],
    agent_skills_path: &Path,
    central_skills_path: &Path,
) -> Result<SymlinkReport> {
    ensure_dir(agent_skills_path)?;

    // Link targets are stored as written, so they must not be relative.
    let agent_dir = normalize_lexically(&absolute(agent_skills_path)?);
    let central = normalize_lexically(&absolute(central_skills_path)?);

    let mut report = SymlinkReport::default();
    let wanted = resolve_desired(desired, &central, &mut report);
    let wanted_set: HashSet<&str> = wanted.iter().map(String::as_str).collect();

    remove_stale_links(&agent_dir, &central, &wanted_set, &mut report)?;

    for name in &wanted {
        link_skill(name, &agent_dir, &central, &mut report);
    }

    info!(
        agent_dir = %agent_dir.display(),
        created = report.created.len(),
        refreshed = report.refreshed.len(),
        removed = report.removed.len(),
        skipped = report.skipped.len(),
        warnings = report.warnings.len(),
        "symlink reconciliation complete"
    );
    Ok(report)
}

/// Deduplicate `desired` and drop names that are not linkable central skills.
fn resolve_desired(desired: &[String], central: &Path, report: &mut SymlinkReport) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut wanted = Vec::new();
    for name in desired {
        if !seen.insert(name.as_str()) {
            continue;
        }
        if !is_plain_name(name) {
            report.warn(name, "not a valid skill folder name");
            continue;
        }
        if !is_central_skill(central, name) {
            report.warn(name, "not found in central skills directory");
            continue;
        }
        wanted.push(name.clone());
    }
    wanted
}

fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn remove_stale_links(
    agent_dir: &Path,
    central: &Path,
    wanted: &HashSet<&str>,
    report: &mut SymlinkReport,
) -> Result<()> {
    let entries = std::fs::read_dir(agent_dir).map_err(|err| SkillsError::fs(agent_dir, err))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| SkillsError::fs(agent_dir, err))?;
        names.push(entry.file_name().to_string_lossy().to_string());
    }
    names.sort();

    for name in names {
        let path = agent_dir.join(&name);
        if !is_link(&path) {
            continue;
        }
        let Some(target) = link_target(&path) else {
            debug!(path = %path.display(), "unreadable link target, leaving in place");
            continue;
        };
        if !target.starts_with(central) {
            debug!(path = %path.display(), target = %target.display(), "foreign link, leaving in place");
            continue;
        }
        if wanted.contains(name.as_str()) {
            continue;
        }
        match remove_link(&path) {
            Ok(()) => {
                info!(skill = %name, "removed managed link");
                report.removed.push(name);
            }
            Err(err) => report.warn(&name, format!("could not remove link: {err}")),
        }
    }
    Ok(())
}

/// Resolved target of a link; relative targets are anchored at the link's directory.
fn link_target(link: &Path) -> Option<PathBuf> {
    let raw = std::fs::read_link(link).ok()?;
    if raw.is_absolute() {
        return Some(normalize_lexically(&raw));
    }
    link.parent().map(|parent| normalize_lexically(&parent.join(raw)))
}

/// Collapse `.` and `..` without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

fn link_skill(name: &str, agent_dir: &Path, central: &Path, report: &mut SymlinkReport) {
    let target = central.join(name);
    let link = agent_dir.join(name);

    let existed = match std::fs::symlink_metadata(&link) {
        Ok(_) if is_link(&link) => {
            if let Err(err) = remove_link(&link) {
                report.warn(name, format!("could not replace existing link: {err}"));
                return;
            }
            true
        }
        Ok(_) => {
            debug!(skill = name, path = %link.display(), "slot occupied by user content, skipping");
            report.skipped.push(name.to_string());
            return;
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => false,
        Err(err) => {
            report.warn(name, format!("could not inspect {}: {err}", link.display()));
            return;
        }
    };

    match create_dir_link(&target, &link) {
        Ok(()) if existed => report.refreshed.push(name.to_string()),
        Ok(()) => {
            info!(skill = name, link = %link.display(), "created link");
            report.created.push(name.to_string());
        }
        Err(err) => report.warn(name, format!("could not create link: {err}")),
    }
}
