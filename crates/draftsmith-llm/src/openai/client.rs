// OpenAI-specific client implementation

use crate::traits::{
    GenerationClient, GenerationOptions, GenerationRequest, GenerationResponse, TokenUsage,
};
use crate::types::Message;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// OpenAI client (HTTP direct, no SDK)
pub struct OpenAIClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl OpenAIClient {
    /// Create new client with API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .context("Invalid API key format")?,
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            base_url: OPENAI_API_BASE.to_string(),
        })
    }

    /// Point the client at an OpenAI-compatible endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build chat completion request payload
    fn build_request(
        &self,
        model: &str,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Value> {
        let openai_messages: Vec<Value> = messages
            .iter()
            .map(convert_message)
            .collect::<Result<Vec<_>>>()?;

        let mut request = serde_json::json!({
            "model": model,
            "messages": openai_messages,
        });

        let obj = request
            .as_object_mut()
            .context("request payload must be an object")?;

        // o1 and gpt-5 models reject temperature and rename the token cap
        let is_reasoning_model = model.starts_with("o1") || model.starts_with("gpt-5");

        if let Some(temp) = options.temperature {
            if !is_reasoning_model {
                obj.insert("temperature".to_string(), serde_json::json!(temp));
            }
        }
        if let Some(max_tokens) = options.max_output_tokens {
            let token_field = if is_reasoning_model {
                "max_completion_tokens"
            } else {
                "max_tokens"
            };
            obj.insert(token_field.to_string(), serde_json::json!(max_tokens));
        }
        if let Some(schema) = &options.response_schema {
            obj.insert(
                "response_format".to_string(),
                serde_json::json!({
                    "type": "json_schema",
                    "json_schema": {
                        "name": schema.name,
                        "strict": true,
                        "schema": schema.schema,
                    },
                }),
            );
        }

        Ok(request)
    }
}

/// Convert our Message type to OpenAI format
fn convert_message(message: &Message) -> Result<Value> {
    let mut obj = serde_json::json!({
        "role": message.role(),
    });
    if let Some(content) = message.content() {
        obj.as_object_mut()
            .context("message payload must be an object")?
            .insert("content".to_string(), serde_json::json!(content));
    }
    Ok(obj)
}

#[async_trait]
impl GenerationClient for OpenAIClient {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        let payload = self.build_request(&request.model, &request.messages, &request.options)?;

        tracing::debug!(model = %request.model, "sending generation request");

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&payload)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("OpenAI API error ({}): {}", status, error_text);
        }

        let raw: OpenAIChatResponse = response
            .json()
            .await
            .context("Failed to parse response")?;

        tracing::debug!(
            input_tokens = raw.usage.prompt_tokens,
            output_tokens = raw.usage.completion_tokens,
            "generation complete"
        );

        // Convert to provider-agnostic response
        let choice = raw.choices.first();
        Ok(GenerationResponse {
            content: choice.and_then(|c| c.message.content.clone()),
            usage: Some(TokenUsage {
                input_tokens: raw.usage.prompt_tokens,
                output_tokens: raw.usage.completion_tokens,
                total_tokens: raw.usage.total_tokens,
            }),
            finish_reason: choice.and_then(|c| c.finish_reason.clone()),
            raw: serde_json::to_value(raw)?,
        })
    }
}

// ============================================================================
// OPENAI-SPECIFIC RESPONSE TYPES (for Chat Completions)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAIChatResponse {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<Choice>,
    pub usage: Usage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Choice {
    pub index: u32,
    pub message: ResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResponseMessage {
    pub role: String,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_request_basic_fields() {
        let client = OpenAIClient::new("test-key").unwrap();
        let messages = vec![Message::system("be terse"), Message::human("hello")];
        let options = GenerationOptions::new().temperature(0.5).max_output_tokens(256);

        let payload = client.build_request("gpt-4o-mini", &messages, &options).unwrap();

        assert_eq!(payload["model"], "gpt-4o-mini");
        assert_eq!(payload["messages"][0]["role"], "system");
        assert_eq!(payload["messages"][1]["content"], "hello");
        assert_eq!(payload["temperature"], 0.5);
        assert_eq!(payload["max_tokens"], 256);
    }

    #[test]
    fn build_request_reasoning_model_quirks() {
        let client = OpenAIClient::new("test-key").unwrap();
        let messages = vec![Message::human("hello")];
        let options = GenerationOptions::new().temperature(0.0).max_output_tokens(100);

        let payload = client.build_request("o1-mini", &messages, &options).unwrap();

        assert!(payload.get("temperature").is_none());
        assert!(payload.get("max_tokens").is_none());
        assert_eq!(payload["max_completion_tokens"], 100);
    }

    #[test]
    fn build_request_response_schema() {
        let client = OpenAIClient::new("test-key").unwrap();
        let schema = crate::traits::ResponseSchema::new(
            "draft",
            serde_json::json!({"type": "object"}),
        );
        let options = GenerationOptions::new().response_schema(schema);

        let payload = client
            .build_request("gpt-4o-mini", &[Message::human("x")], &options)
            .unwrap();

        assert_eq!(payload["response_format"]["type"], "json_schema");
        assert_eq!(payload["response_format"]["json_schema"]["name"], "draft");
        assert_eq!(payload["response_format"]["json_schema"]["strict"], true);
    }
}
