use std::fs;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use draftsmith_cli::{
    config::Config,
    output::write_draft,
    prompt::{draft_user_prompt, DRAFT_SYSTEM_PROMPT},
    repair::ModelRepair,
};
use draftsmith_extract::{extract_draft, merge_tags};
use draftsmith_llm::{
    GenerationClient, GenerationOptions, GenerationRequest, Message, OpenAIClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config =
        Config::load().map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging();

    tracing::info!("Starting draftsmith");
    tracing::info!(model = %config.llm.model, research = %config.paths.research, "Config loaded");

    // Read the research document
    let research = fs::read_to_string(&config.paths.research).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read research document {}: {}",
            config.paths.research,
            e
        )
    })?;

    // Initialize generation client
    let mut openai = OpenAIClient::new(config.openai_api_key.clone())?;
    if let Some(base_url) = &config.openai_base_url {
        openai = openai.with_base_url(base_url);
    }
    let client: Arc<dyn GenerationClient> = Arc::new(openai);

    // Primary generation call
    tracing::info!("Requesting draft generation");
    let messages = vec![
        Message::system(DRAFT_SYSTEM_PROMPT),
        Message::human(draft_user_prompt(&config.post, &research)),
    ];
    let options = GenerationOptions::new()
        .temperature(config.llm.temperature)
        .max_output_tokens(config.llm.tokens);
    let response = client
        .generate(GenerationRequest::new(&config.llm.model, messages).with_options(options))
        .await?;

    let raw_text = response
        .text()
        .ok_or_else(|| anyhow::anyhow!("model returned no content"))?
        .to_string();

    // Extract the structured draft (one repair call at most)
    let repair = ModelRepair::new(client.clone(), &config.llm.model, config.llm.tokens);
    let mut draft = extract_draft(&raw_text, &repair).await?;

    // Merge caller-supplied tags
    draft.tags = merge_tags(draft.tags, config.post.extra_tags());

    // Persist the artifact
    let path = write_draft(&config.paths.output, &draft)?;
    tracing::info!(title = %draft.title, path = %path.display(), "Draft written");

    Ok(())
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
