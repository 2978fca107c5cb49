//! Adapter putting the generation client behind the extractor's repair seam.

use crate::prompt::{draft_schema, REPAIR_SYSTEM_PROMPT};
use anyhow::Result;
use async_trait::async_trait;
use draftsmith_extract::RepairModel;
use draftsmith_llm::{
    GenerationClient, GenerationOptions, GenerationRequest, Message, ResponseSchema,
};
use std::sync::Arc;

/// One repair round-trip: strict instruction, temperature 0, bounded output,
/// fixed three-field schema.
pub struct ModelRepair {
    client: Arc<dyn GenerationClient>,
    model: String,
    max_output_tokens: u32,
}

impl ModelRepair {
    pub fn new(client: Arc<dyn GenerationClient>, model: impl Into<String>, max_output_tokens: u32) -> Self {
        Self {
            client,
            model: model.into(),
            max_output_tokens,
        }
    }
}

#[async_trait]
impl RepairModel for ModelRepair {
    async fn repair(&self, raw_text: &str) -> Result<String> {
        let messages = vec![
            Message::system(REPAIR_SYSTEM_PROMPT),
            Message::human(raw_text),
        ];
        let options = GenerationOptions::new()
            .temperature(0.0)
            .max_output_tokens(self.max_output_tokens)
            .response_schema(ResponseSchema::new("blog_draft", draft_schema()));

        let response = self
            .client
            .generate(GenerationRequest::new(&self.model, messages).with_options(options))
            .await?;

        Ok(response.text().unwrap_or_default().to_string())
    }
}
