//! Subcommand handlers.

use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::builder::resolve_and_build;
use crate::cli::GenerateArgs;
use crate::client::{qualify_model_name, GeminiClient};
use crate::config::KeyStore;
use crate::error::Result;
use crate::models::{ModelInfo, ModelSummary};
use crate::parts::ParsedPart;

/// Classification for models expected to produce general text.
pub const TEXT_OUTPUT_YES: &str = "Yes";
/// Classification for models without `generateContent`.
pub const TEXT_OUTPUT_NO: &str = "No";
/// Classification for `generateContent` models whose output is not general text.
pub const TEXT_OUTPUT_SPECIALIZED: &str = "No (Specialized: Audio/Image/Video/Embedding)";

/// Resolves the key store from an optional `--config` override.
pub fn key_store(config: Option<PathBuf>) -> Result<KeyStore> {
    match config {
        Some(path) => Ok(KeyStore::at(path)),
        None => KeyStore::default_location(),
    }
}

/// `set-config`: stores the key and reports where.
pub fn set_config(store: &KeyStore, api_key: &str, out: &mut impl Write) -> Result<()> {
    let path = store.store(api_key)?;
    writeln!(out, "API key saved to {}", path.display())?;
    Ok(())
}

/// `generate`: builds the request, sends it and writes the raw response.
pub async fn generate(
    client: &GeminiClient,
    args: &GenerateArgs,
    parts: &[ParsedPart],
    out: &mut impl Write,
) -> Result<()> {
    let model = qualify_model_name(&args.model);
    let request = resolve_and_build(
        client.http(),
        &args.system_instruction,
        parts,
        &args.generation_options(),
        &args.tool_selection(),
        &args.safety_settings,
    )
    .await?;

    info!(model = %model, parts = parts.len(), "generating content");
    let body = client.generate_content(&model, &request).await?;
    out.write_all(&body)?;
    writeln!(out)?;
    Ok(())
}

/// `list-models`: fetches the model list and prints the reshaped JSON.
pub async fn list_models(client: &GeminiClient, out: &mut impl Write) -> Result<()> {
    let response = client.list_models().await?;
    let models: Vec<ModelSummary> = response.models.iter().map(summarize_model).collect();

    #[derive(Serialize)]
    struct Output<'a> {
        models: &'a [ModelSummary],
    }

    let rendered = serde_json::to_string_pretty(&Output { models: &models })?;
    writeln!(out, "{}", rendered)?;
    Ok(())
}

/// Whether a model is expected to produce general text output.
pub fn classify_text_output(model: &ModelInfo) -> &'static str {
    if !model.supports_generate_content() {
        return TEXT_OUTPUT_NO;
    }

    let name = model.display_name.to_lowercase();
    if name.contains("tts")
        || name.contains("embedding")
        || name.starts_with("imagen")
        || name.starts_with("veo")
    {
        TEXT_OUTPUT_SPECIALIZED
    } else {
        TEXT_OUTPUT_YES
    }
}

/// Display form of a model entry.
pub fn summarize_model(model: &ModelInfo) -> ModelSummary {
    ModelSummary {
        name: model.name.clone(),
        display_name: model.display_name.clone(),
        version: model.version.clone(),
        input_token_limit: model.input_token_limit,
        output_token_limit: model.output_token_limit,
        supported_generation_methods: model.supported_generation_methods.clone(),
        supported_for_text_output: classify_text_output(model).to_string(),
    }
}
