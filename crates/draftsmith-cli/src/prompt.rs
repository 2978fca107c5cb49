//! Prompt assembly for the primary and repair generation calls.

use crate::config::PostConfig;
use serde_json::{json, Value};

pub const DRAFT_SYSTEM_PROMPT: &str = "You are a technical blog writer. Using the supplied \
research, write a blog-post draft. Respond with a single JSON object with exactly three \
fields: \"title\" (string), \"draftBody\" (markdown string), \"tags\" (array of strings). \
Respond with the JSON object only, no surrounding prose and no code fences.";

pub const REPAIR_SYSTEM_PROMPT: &str = "You convert malformed output into valid JSON. The \
user message is a failed attempt at a blog-post draft. Respond with ONLY a JSON object with \
exactly these fields: \"title\" (string), \"draftBody\" (string), \"tags\" (array of \
strings). No prose, no code fences, no explanations.";

/// User prompt for the primary generation call.
pub fn draft_user_prompt(post: &PostConfig, research: &str) -> String {
    format!(
        "Write a blog-post draft.\n\n\
         Theme: {}\n\
         Target audience: {}\n\
         Key message: {}\n\
         Call to action: {}\n\n\
         Research material:\n\
         ---\n\
         {}\n\
         ---",
        post.theme, post.persona, post.message, post.cta, research
    )
}

/// JSON schema pinning the three-field draft object, used as the
/// structured-output constraint on the repair call.
pub fn draft_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string" },
            "draftBody": { "type": "string" },
            "tags": {
                "type": "array",
                "items": { "type": "string" }
            }
        },
        "required": ["title", "draftBody", "tags"],
        "additionalProperties": false
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> PostConfig {
        PostConfig {
            theme: "Rust".to_string(),
            persona: "Engineers".to_string(),
            message: "Use it".to_string(),
            cta: "Star the repo".to_string(),
            tags: String::new(),
        }
    }

    #[test]
    fn user_prompt_carries_config_and_research() {
        let prompt = draft_user_prompt(&post(), "some findings");

        assert!(prompt.contains("Theme: Rust"));
        assert!(prompt.contains("Target audience: Engineers"));
        assert!(prompt.contains("some findings"));
    }

    #[test]
    fn schema_names_the_three_fields() {
        let schema = draft_schema();
        assert_eq!(schema["required"], json!(["title", "draftBody", "tags"]));
        assert_eq!(schema["properties"]["tags"]["type"], "array");
    }
}
