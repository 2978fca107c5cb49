use anyhow::Result;
use async_trait::async_trait;
use draftsmith_extract::{
    derive_from_text, extract_draft, merge_tags, DraftRecord, RepairModel, UNTITLED_TITLE,
};

/// Stub repair seam: either replies with a canned string or fails transport.
struct StubRepair {
    reply: Option<String>,
}

impl StubRepair {
    fn replies(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
        }
    }

    fn fails() -> Self {
        Self { reply: None }
    }
}

#[async_trait]
impl RepairModel for StubRepair {
    async fn repair(&self, _raw_text: &str) -> Result<String> {
        self.reply
            .clone()
            .ok_or_else(|| anyhow::anyhow!("repair transport failed"))
    }
}

/// A stub that panics when invoked, for cases that must not reach repair.
struct NoRepair;

#[async_trait]
impl RepairModel for NoRepair {
    async fn repair(&self, _raw_text: &str) -> Result<String> {
        panic!("repair must not be called for parseable input");
    }
}

#[tokio::test]
async fn valid_json_passes_through() {
    let raw = r#"{"title":"T","draftBody":"B","tags":["a","b"]}"#;
    let draft = extract_draft(raw, &NoRepair).await.unwrap();

    assert_eq!(draft, DraftRecord::new("T", "B", vec!["a".into(), "b".into()]));
}

#[tokio::test]
async fn title_heading_marker_is_stripped_and_tags_deduped() {
    let raw = r##"{"title":"# Hello","draftBody":"body text","tags":["a","a","b"]}"##;
    let draft = extract_draft(raw, &NoRepair).await.unwrap();

    assert_eq!(draft.title, "Hello");
    assert_eq!(draft.draft_body, "body text");
    assert_eq!(draft.tags, vec!["a".to_string(), "b".to_string()]);
}

#[tokio::test]
async fn fenced_block_is_recovered() {
    let raw = "```json\n{\"title\":\"T\",\"draftBody\":\"B\",\"tags\":[]}\n```";
    let draft = extract_draft(raw, &NoRepair).await.unwrap();

    assert_eq!(draft.title, "T");
    assert_eq!(draft.draft_body, "B");
    assert!(draft.tags.is_empty());
}

#[tokio::test]
async fn embedded_object_is_recovered_from_prose() {
    let raw = "Sure, here is your draft:\n{\"title\":\"T\",\"draftBody\":\"B\",\"tags\":[\"x\"]}\nLet me know!";
    let draft = extract_draft(raw, &NoRepair).await.unwrap();

    assert_eq!(draft.title, "T");
    assert_eq!(draft.tags, vec!["x".to_string()]);
}

#[tokio::test]
async fn repair_reply_is_used_when_parseable() {
    let raw = "I could not produce JSON, sorry.";
    let stub = StubRepair::replies(r#"{"title":"Fixed","draftBody":"B","tags":[]}"#);
    let draft = extract_draft(raw, &stub).await.unwrap();

    assert_eq!(draft.title, "Fixed");
}

#[tokio::test]
async fn garbage_repair_falls_back_to_original_text() {
    let raw = "My Great Title\nSome body content";
    let stub = StubRepair::replies("still not json");
    let draft = extract_draft(raw, &stub).await.unwrap();

    assert_eq!(draft.title, "My Great Title");
    assert_eq!(draft.draft_body, "Some body content");
    assert!(draft.tags.is_empty());
}

#[tokio::test]
async fn repair_transport_failure_is_fatal() {
    let result = extract_draft("plain prose", &StubRepair::fails()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn empty_title_becomes_placeholder() {
    let raw = r#"{"title":"  ","draftBody":"B","tags":[]}"#;
    let draft = extract_draft(raw, &NoRepair).await.unwrap();

    assert_eq!(draft.title, UNTITLED_TITLE);
}

#[tokio::test]
async fn numeric_tags_are_coerced_to_strings() {
    let raw = r#"{"title":"T","draftBody":"B","tags":["a",42]}"#;
    let draft = extract_draft(raw, &NoRepair).await.unwrap();

    assert_eq!(draft.tags, vec!["a".to_string(), "42".to_string()]);
}

#[test]
fn derive_skips_fence_lines_for_title() {
    let draft = derive_from_text("```\nActual Title\nbody line");

    assert_eq!(draft.title, "Actual Title");
    assert_eq!(draft.draft_body, "body line");
}

#[test]
fn derive_falls_back_to_whole_text_as_body() {
    let draft = derive_from_text("Only one line");

    assert_eq!(draft.title, "Only one line");
    assert_eq!(draft.draft_body, "Only one line");
}

#[test]
fn derive_handles_blank_input() {
    let draft = derive_from_text("   \n  ");

    assert_eq!(draft.title, UNTITLED_TITLE);
    assert_eq!(draft.draft_body, "");
}

#[test]
fn tag_merge_union() {
    let merged = merge_tags(
        vec!["x".to_string(), "y".to_string()],
        vec!["y".to_string(), "z".to_string()],
    );
    assert_eq!(merged, vec!["x".to_string(), "y".to_string(), "z".to_string()]);
}
