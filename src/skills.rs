//! Central skill catalog.
//!
//! A skill is any non-hidden directory directly under the central skills
//! directory. The filesystem is the source of truth, so the catalog is
//! rescanned on every call.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, SkillsError};

/// List skill names under `central_dir`, sorted.
///
/// A missing directory yields an empty list. Symlinks, files, and dotted
/// entries are not skills.
pub fn list_central_skills(central_dir: &Path) -> Result<Vec<String>> {
    let entries = match std::fs::read_dir(central_dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %central_dir.display(), "central directory missing");
            return Ok(Vec::new());
        }
        Err(err) => return Err(SkillsError::fs(central_dir, err)),
    };

    let mut skills = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| SkillsError::fs(central_dir, err))?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            debug!(path = %entry.path().display(), "skipping non-UTF-8 skill name");
            continue;
        };
        if is_central_skill(central_dir, &name) {
            skills.push(name);
        }
    }

    skills.sort();
    Ok(skills)
}

/// True if `name` is a skill folder in `central_dir`: a real, non-hidden
/// directory. Symlinked folders do not count.
#[must_use]
pub fn is_central_skill(central_dir: &Path, name: &str) -> bool {
    !name.starts_with('.')
        && std::fs::symlink_metadata(central_dir.join(name))
            .is_ok_and(|meta| meta.file_type().is_dir())
}

/// Fail with `UnknownSkill` on the first requested name not in `available`.
pub fn validate_requested(requested: &[String], available: &[String]) -> Result<()> {
    let known: HashSet<&str> = available.iter().map(String::as_str).collect();
    match requested.iter().find(|name| !known.contains(name.as_str())) {
        Some(unknown) => Err(SkillsError::UnknownSkill(unknown.clone())),
        None => Ok(()),
    }
}

/// Split comma-separated entries, trim them, and drop blanks and repeats.
///
/// Order of first occurrence is kept.
#[must_use]
pub fn normalize_names(raw: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert((*name).to_string()))
        .map(str::to_string)
        .collect()
}
