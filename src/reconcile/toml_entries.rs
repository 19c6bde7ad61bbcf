//! Skill entries in a TOML array-of-tables (`[[skills.config]]`).
//!
//! Entries are keyed by their `path`. Entries under the managed path prefix
//! are enabled or disabled, never deleted; everything else in the document
//! is carried through unchanged.

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;
use toml::{Table, Value};
use tracing::{debug, info};

use crate::error::{Result, SkillsError};
use crate::utils::fs::{read_optional, write_file};

/// Top-level table holding the entry array.
pub const SKILLS_TABLE: &str = "skills";
/// Array-of-tables key under [`SKILLS_TABLE`].
pub const ENTRIES_KEY: &str = "config";

/// Entries flipped or added by one patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TomlPatchReport {
    pub added: Vec<String>,
    pub enabled: Vec<String>,
    pub disabled: Vec<String>,
}

impl TomlPatchReport {
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.enabled.is_empty() && self.disabled.is_empty()
    }
}

/// Reconcile `[[skills.config]]` entries in `config_path` to `desired`.
///
/// A missing file starts from an empty document. A file that does not parse,
/// or whose `skills`/`skills.config` has the wrong shape, is left untouched
/// and reported as a parse error.
pub fn upsert_skill_entries(
    config_path: &Path,
    desired: &[String],
    path_prefix: &str,
) -> Result<TomlPatchReport> {
    let mut doc = match read_optional(config_path)? {
        Some(raw) => toml::from_str::<Table>(&raw)
            .map_err(|err| SkillsError::parse(config_path, err.to_string()))?,
        None => {
            debug!(path = %config_path.display(), "config missing, starting empty");
            Table::new()
        }
    };

    let report = apply_entries(&mut doc, desired, path_prefix)
        .map_err(|message| SkillsError::parse(config_path, message))?;

    let rendered = toml::to_string(&doc)
        .map_err(|err| SkillsError::Serialization(format!("{}: {err}", config_path.display())))?;
    write_file(config_path, &rendered)?;

    info!(
        path = %config_path.display(),
        added = report.added.len(),
        enabled = report.enabled.len(),
        disabled = report.disabled.len(),
        "skill entries reconciled"
    );
    Ok(report)
}

/// Apply the reconciliation to an in-memory document.
///
/// Errors describe a shape mismatch in the existing document.
pub fn apply_entries(
    doc: &mut Table,
    desired: &[String],
    path_prefix: &str,
) -> std::result::Result<TomlPatchReport, String> {
    let skills = doc
        .entry(SKILLS_TABLE)
        .or_insert_with(|| Value::Table(Table::new()));
    let Value::Table(skills) = skills else {
        return Err(format!("`{SKILLS_TABLE}` must be a table"));
    };
    let entries = skills
        .entry(ENTRIES_KEY)
        .or_insert_with(|| Value::Array(Vec::new()));
    let Value::Array(entries) = entries else {
        return Err(format!("`{SKILLS_TABLE}.{ENTRIES_KEY}` must be an array of tables"));
    };

    let wanted: HashSet<&str> = desired.iter().map(String::as_str).collect();
    let mut report = TomlPatchReport::default();
    let mut present = HashSet::new();

    for entry in entries.iter_mut() {
        let Value::Table(table) = entry else {
            continue;
        };
        let Some(name) = table
            .get("path")
            .and_then(Value::as_str)
            .and_then(|path| path.strip_prefix(path_prefix))
            .map(str::to_string)
        else {
            continue;
        };

        let enable = wanted.contains(name.as_str());
        let current = table.get("enabled").and_then(Value::as_bool);
        if current != Some(enable) {
            table.insert("enabled".to_string(), Value::Boolean(enable));
            if enable {
                report.enabled.push(name.clone());
            } else {
                report.disabled.push(name.clone());
            }
        }
        if enable {
            present.insert(name);
        }
    }

    for name in desired {
        if present.contains(name) {
            continue;
        }
        let mut table = Table::new();
        table.insert("path".to_string(), Value::String(format!("{path_prefix}{name}")));
        table.insert("enabled".to_string(), Value::Boolean(true));
        entries.push(Value::Table(table));
        present.insert(name.clone());
        report.added.push(name.clone());
    }

    Ok(report)
}
