//! The draft extraction chain.
//!
//! Ordered recovery from raw model output: structural parses first, then one
//! repair round-trip through the model, then derivation from the raw text
//! itself. The parsing side is total; only the repair call's transport
//! failure escapes as an error, which callers treat as fatal to the run.

use crate::draft::DraftRecord;
use crate::parse::parse_any;
use crate::tags::merge_tags;
use crate::title::sanitize_title;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Seam for the repair round-trip so tests can stub the network.
///
/// Implementations send `raw_text` back to the model under a strict
/// instruction demanding only the three-field JSON object.
#[async_trait]
pub trait RepairModel: Send + Sync {
    async fn repair(&self, raw_text: &str) -> Result<String>;
}

/// Extract a draft from raw model output.
///
/// Attempts the structural parses, then a single repair call, then falls
/// back to deriving a draft from the raw text. A garbage repair reply falls
/// through to derivation from the ORIGINAL text, not the repair reply.
/// The only error path is a failed repair transport.
pub async fn extract_draft(raw_text: &str, repair: &dyn RepairModel) -> Result<DraftRecord> {
    if let Some(value) = parse_any(raw_text) {
        return Ok(draft_from_value(&value));
    }

    tracing::warn!("raw output is not parseable, issuing repair request");
    let repaired = repair.repair(raw_text).await?;

    if let Some(value) = parse_any(&repaired) {
        return Ok(draft_from_value(&value));
    }

    tracing::warn!("repair reply is not parseable, deriving draft from raw text");
    Ok(derive_from_text(raw_text))
}

/// Build a draft from a parsed JSON object.
///
/// Missing fields degrade: absent title becomes the placeholder (via
/// sanitization), absent body becomes empty, absent tags become empty.
/// Scalar tag values are coerced to strings; composite values are skipped.
pub fn draft_from_value(value: &Value) -> DraftRecord {
    let title = sanitize_title(value.get("title").and_then(Value::as_str).unwrap_or(""));

    let draft_body = value
        .get("draftBody")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    let tags = value
        .get("tags")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(coerce_tag).collect::<Vec<String>>())
        .unwrap_or_default();

    DraftRecord::new(title, draft_body, merge_tags(tags, Vec::new()))
}

fn coerce_tag(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Last-resort derivation when no JSON was ever obtained: first non-empty,
/// non-fence line as the title, the remainder as the body, no tags.
pub fn derive_from_text(raw_text: &str) -> DraftRecord {
    let title_line = raw_text
        .lines()
        .find(|line| !line.trim().is_empty() && !line.trim_start().starts_with("```"));

    let (title, body) = match title_line {
        Some(line) => {
            let remainder = raw_text
                .lines()
                .skip_while(|l| *l != line)
                .skip(1)
                .collect::<Vec<_>>()
                .join("\n");
            let remainder = remainder.trim();
            let body = if remainder.is_empty() {
                raw_text.trim()
            } else {
                remainder
            };
            (sanitize_title(line), body.to_string())
        }
        None => (sanitize_title(""), raw_text.trim().to_string()),
    };

    DraftRecord::new(title, body, Vec::new())
}
