use config::builder::DefaultState;
use config::{Config as ConfigLoader, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub post: PostConfig,
    pub llm: LlmConfig,
    pub paths: PathsConfig,

    // Secrets (from ENV only)
    #[serde(default)]
    pub openai_api_key: String,
    #[serde(default)]
    pub openai_base_url: Option<String>,
}

/// What the post is about. Env: POST_THEME, POST_PERSONA, POST_MESSAGE,
/// POST_CTA, POST_TAGS (comma-separated).
#[derive(Debug, Clone, Deserialize)]
pub struct PostConfig {
    pub theme: String,
    pub persona: String,
    pub message: String,
    pub cta: String,
    #[serde(default)]
    pub tags: String,
}

impl PostConfig {
    /// Caller-supplied extra tags, split on commas.
    pub fn extra_tags(&self) -> Vec<String> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Env: LLM_MODEL, LLM_TEMPERATURE, LLM_TOKENS.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub temperature: f32,
    /// Max output tokens for both the primary and the repair call.
    pub tokens: u32,
}

/// Env: PATHS_RESEARCH, PATHS_OUTPUT.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// Research document read before generation.
    pub research: String,
    /// Directory the draft artifact is written into.
    pub output: String,
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. Built-in defaults
    /// 2. config/default.toml
    /// 3. config/{ENV}.toml (if ENV is set)
    /// 4. Environment variables (POST_*, LLM_*, PATHS_*)
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = with_defaults(ConfigLoader::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            // Environment variables override everything, one prefix-scoped
            // source per section. The kept prefix plus the `_` separator
            // maps POST_THEME to post.theme and so on, which is why the
            // nested keys are all single words.
            .add_source(env_source("POST"))
            .add_source(env_source("LLM"))
            .add_source(env_source("PATHS"));

        let config = builder.build()?;

        let mut cfg: Config = config.try_deserialize()?;

        // Load secrets from ENV (not in TOML)
        cfg.openai_api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            ConfigError::Message("OPENAI_API_KEY environment variable is required".to_string())
        })?;
        cfg.openai_base_url = std::env::var("OPENAI_BASE_URL").ok();

        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));

        let config = builder.build()?;
        config.try_deserialize()
    }
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("post.theme", "General technology")?
        .set_default("post.persona", "Technical readers")?
        .set_default("post.message", "")?
        .set_default("post.cta", "")?
        .set_default("post.tags", "")?
        .set_default("llm.model", "gpt-4o-mini")?
        .set_default("llm.temperature", 0.7)?
        .set_default("llm.tokens", 2048)?
        .set_default("paths.research", "research/research.md")?
        .set_default("paths.output", "output")
}

/// Env source scoped to one section: only `<PREFIX>_*` variables are read,
/// and the kept prefix nests them under the matching table.
fn env_source(prefix: &str) -> Environment {
    Environment::default()
        .prefix(prefix)
        .keep_prefix(true)
        .separator("_")
        .try_parsing(true)
}
