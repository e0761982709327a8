//! Idempotent line-oriented edits to small config files.
//!
//! The one entry point is [`apply_line_edits`]: remove exact lines, append
//! missing lines, apply literal substitutions, and report whether the file's
//! digest actually changed. Callers gate expensive regeneration steps
//! (bootloader config rebuild) on that `changed` result, so a redundant rule
//! execution never triggers a rebuild.

use crate::probe::sha256_hex;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// One batch of edits to a line-oriented config file.
#[derive(Debug, Clone, Default)]
pub struct LineEdits {
    /// Lines dropped when their trimmed text exactly matches an entry
    pub remove: Vec<String>,
    /// Lines appended unless already present verbatim
    pub add: Vec<String>,
    /// Literal `(pattern, replacement)` substitutions, applied in order
    pub substitutions: Vec<(String, String)>,
}

impl LineEdits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remove_line(mut self, line: impl Into<String>) -> Self {
        self.remove.push(line.into());
        self
    }

    pub fn add_line(mut self, line: impl Into<String>) -> Self {
        self.add.push(line.into());
        self
    }

    pub fn substitute(mut self, pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.substitutions.push((pattern.into(), replacement.into()));
        self
    }
}

/// Apply a batch of line edits and report whether the content changed.
///
/// A missing target file is "not applicable on this system": the edit is
/// skipped silently and `Ok(false)` is returned. Applying the same edits
/// twice yields `true` then `false`.
pub fn apply_line_edits(path: &Path, edits: &LineEdits) -> Result<bool> {
    if !path.exists() {
        debug!("skipping line edits, {} does not exist", path.display());
        return Ok(false);
    }

    let original = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let before = sha256_hex(original.as_bytes());

    let mut lines: Vec<String> = original
        .lines()
        .filter(|line| !edits.remove.iter().any(|r| line.trim() == r))
        .map(str::to_string)
        .collect();

    for addition in &edits.add {
        if !lines.iter().any(|line| line == addition) {
            lines.push(addition.clone());
        }
    }

    let mut content = lines.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }

    for (pattern, replacement) in &edits.substitutions {
        content = content.replace(pattern.as_str(), replacement.as_str());
    }

    let after = sha256_hex(content.as_bytes());
    if after == before {
        return Ok(false);
    }

    fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(true)
}
