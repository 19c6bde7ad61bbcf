//! Guarded block patching for human-edited text files.
//!
//! A guarded block is the span from a start marker through an end marker.
//! Only that span is machine-owned; every byte outside it is preserved.

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::utils::fs::{read_optional, write_file};

pub const SKILLS_START_MARKER: &str = "<!-- SKILLS_ACTIVATION_START -->";
pub const SKILLS_END_MARKER: &str = "<!-- SKILLS_ACTIVATION_END -->";

/// Delimiters of a guarded block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markers<'a> {
    pub start: &'a str,
    pub end: &'a str,
}

/// Markers used for skill activation blocks.
pub const SKILLS_MARKERS: Markers<'static> = Markers {
    start: SKILLS_START_MARKER,
    end: SKILLS_END_MARKER,
};

impl Markers<'_> {
    /// Surround `body` with the markers, each on its own line.
    #[must_use]
    pub fn wrap(&self, body: &str) -> String {
        format!("{}\n{body}\n{}", self.start, self.end)
    }

    /// Byte range of the existing block: first start marker through the
    /// first end marker that follows it.
    #[must_use]
    pub fn locate(&self, content: &str) -> Option<std::ops::Range<usize>> {
        let start = content.find(self.start)?;
        let after_start = start + self.start.len();
        let end = content[after_start..].find(self.end)? + after_start;
        Some(start..end + self.end.len())
    }
}

/// How a file was changed by [`upsert_block`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockUpdate {
    /// File did not exist and was created.
    Created,
    /// An existing well-formed block was replaced in place.
    Replaced,
    /// No well-formed block was found; one was appended.
    Appended,
    /// The file already contained exactly this block.
    Unchanged,
}

/// Insert or replace the guarded block in `path` with `rendered`.
///
/// `rendered` must already include both markers (see [`Markers::wrap`]).
/// `preamble` seeds a file that does not exist yet.
pub fn upsert_block(
    path: &Path,
    markers: Markers<'_>,
    rendered: &str,
    preamble: Option<&str>,
) -> Result<BlockUpdate> {
    let existing = read_optional(path)?;
    let created = existing.is_none();
    let content = existing.unwrap_or_else(|| preamble.unwrap_or_default().to_string());

    let (updated, replaced) = splice(&content, markers, rendered);
    let outcome = if created {
        BlockUpdate::Created
    } else if updated == content {
        BlockUpdate::Unchanged
    } else if replaced {
        BlockUpdate::Replaced
    } else {
        BlockUpdate::Appended
    };

    if outcome != BlockUpdate::Unchanged {
        write_file(path, &updated)?;
    }
    debug!(path = %path.display(), ?outcome, "guarded block updated");
    Ok(outcome)
}

/// Replace the block in `content`, or append it. Returns the new content and
/// whether an existing block was replaced.
///
/// A start marker with no following end marker is not repaired; the new
/// block is appended after it.
#[must_use]
pub fn splice(content: &str, markers: Markers<'_>, rendered: &str) -> (String, bool) {
    if let Some(range) = markers.locate(content) {
        let mut out = String::with_capacity(content.len() + rendered.len());
        out.push_str(&content[..range.start]);
        out.push_str(rendered);
        out.push_str(&content[range.end..]);
        return (out, true);
    }

    let head = content.trim_end_matches(['\n', '\r']);
    if head.trim().is_empty() {
        (format!("{rendered}\n"), false)
    } else {
        (format!("{head}\n\n{rendered}\n"), false)
    }
}
