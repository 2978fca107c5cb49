use serde::{Deserialize, Serialize};

/// Fallback title when sanitization leaves nothing behind.
pub const UNTITLED_TITLE: &str = "Untitled draft";

/// The run's sole output artifact: a flat blog-post draft.
///
/// Serialized with the downstream field names (`title`, `draftBody`, `tags`).
/// `title` is never empty; `tags` holds deduplicated strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRecord {
    pub title: String,
    #[serde(default)]
    pub draft_body: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl DraftRecord {
    pub fn new(
        title: impl Into<String>,
        draft_body: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            draft_body: draft_body.into(),
            tags,
        }
    }
}
