//! Draft artifact persistence.

use anyhow::{Context, Result};
use draftsmith_extract::DraftRecord;
use std::fs;
use std::path::{Path, PathBuf};

pub const DRAFT_FILE_NAME: &str = "draft.json";

/// Write the draft as pretty JSON to `<output_dir>/draft.json`, creating the
/// directory if absent. Returns the artifact path.
pub fn write_draft(output_dir: impl AsRef<Path>, draft: &DraftRecord) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let path = output_dir.join(DRAFT_FILE_NAME);
    let json = serde_json::to_string_pretty(draft).context("Failed to serialize draft")?;
    fs::write(&path, json)
        .with_context(|| format!("Failed to write draft to {}", path.display()))?;

    Ok(path)
}
