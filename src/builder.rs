//! Assembling a `generateContent` request from command-line input.

use std::fs;

use serde_json::value::RawValue;
use typed_builder::TypedBuilder;

use crate::error::{GeminiCliError, Result};
use crate::models::{
    Content, DynamicRetrievalConfig, GenerateContentRequest, GenerationConfig,
    GoogleSearchRetrieval, Part, SafetySetting, ThinkingConfig, Tool,
};
use crate::parts::{resolve_parts, ParsedPart};

/// Generation parameter overrides. `None` leaves the API default in place.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(doc)]
pub struct GenerationOptions {
    /// Sampling temperature
    #[builder(default, setter(strip_option))]
    pub temperature: Option<f64>,
    /// Maximum number of output tokens
    #[builder(default, setter(strip_option))]
    pub max_output_tokens: Option<u32>,
    /// Top-P sampling
    #[builder(default, setter(strip_option))]
    pub top_p: Option<f64>,
    /// Top-K sampling
    #[builder(default, setter(strip_option))]
    pub top_k: Option<u32>,
    /// A single stop sequence
    #[builder(default, setter(strip_option, into))]
    pub stop_sequence: Option<String>,
    /// Response MIME type, e.g. `application/json`
    #[builder(default, setter(strip_option, into))]
    pub response_mime_type: Option<String>,
    /// Schema as a JSON string, or `@path` to read it from a file
    #[builder(default, setter(strip_option, into))]
    pub response_schema: Option<String>,
    /// Thinking budget in tokens
    #[builder(default, setter(strip_option))]
    pub thinking_budget: Option<i32>,
    /// Ask for thought summaries
    #[builder(default)]
    pub include_thoughts: bool,
}

/// Which built-in tools to enable.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(doc)]
pub struct ToolSelection {
    /// URL context tool
    #[builder(default)]
    pub url_context: bool,
    /// Google Search tool
    #[builder(default)]
    pub google_search: bool,
    /// Legacy Google Search retrieval tool
    #[builder(default)]
    pub google_search_retrieval: bool,
    /// Dynamic retrieval mode, e.g. `MODE_DYNAMIC`
    #[builder(default, setter(strip_option, into))]
    pub retrieval_mode: Option<String>,
    /// Dynamic retrieval threshold
    #[builder(default, setter(strip_option))]
    pub retrieval_threshold: Option<f64>,
}

/// Resolves `parts` and builds the request.
pub async fn resolve_and_build(
    http: &reqwest::Client,
    system_instruction: &str,
    parts: &[ParsedPart],
    generation: &GenerationOptions,
    tools: &ToolSelection,
    safety_settings: &str,
) -> Result<GenerateContentRequest> {
    if parts.is_empty() && system_instruction.is_empty() {
        return Err(empty_request());
    }
    let resolved = resolve_parts(http, parts).await?;
    build_request(system_instruction, resolved, generation, tools, safety_settings)
}

/// Builds a request from already resolved parts.
pub fn build_request(
    system_instruction: &str,
    parts: Vec<Part>,
    generation: &GenerationOptions,
    tools: &ToolSelection,
    safety_settings: &str,
) -> Result<GenerateContentRequest> {
    if parts.is_empty() && system_instruction.is_empty() {
        return Err(empty_request());
    }

    let mut request = GenerateContentRequest::default();

    if !system_instruction.is_empty() {
        request.system_instruction = Some(Content::text(system_instruction));
    }
    if !parts.is_empty() {
        request.contents = vec![Content { parts }];
    }

    let config = build_generation_config(generation)?;
    if !config.is_empty() {
        request.generation_config = Some(config);
    }

    let tools = build_tools(tools);
    if !tools.is_empty() {
        request.tools = Some(tools);
    }

    let safety = parse_safety_settings(safety_settings)?;
    if !safety.is_empty() {
        request.safety_settings = Some(safety);
    }

    Ok(request)
}

fn empty_request() -> GeminiCliError {
    GeminiCliError::validation("at least one input part or system instruction is required")
}

/// Maps the set options onto a [`GenerationConfig`].
pub fn build_generation_config(options: &GenerationOptions) -> Result<GenerationConfig> {
    let response_schema = options
        .response_schema
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(load_response_schema)
        .transpose()?;

    let thinking = ThinkingConfig {
        thinking_budget: options.thinking_budget,
        include_thoughts: options.include_thoughts.then_some(true),
    };

    Ok(GenerationConfig {
        stop_sequences: options
            .stop_sequence
            .clone()
            .filter(|s| !s.is_empty())
            .map(|s| vec![s]),
        temperature: options.temperature,
        max_output_tokens: options.max_output_tokens,
        top_p: options.top_p,
        top_k: options.top_k,
        response_mime_type: options.response_mime_type.clone().filter(|s| !s.is_empty()),
        response_schema,
        thinking_config: (!thinking.is_empty()).then_some(thinking),
    })
}

/// Reads `@path` or takes the value as literal JSON, then checks its syntax.
fn load_response_schema(value: &str) -> Result<Box<RawValue>> {
    let text = match value.strip_prefix('@') {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            GeminiCliError::validation(format!(
                "failed to read response-schema: failed to read file '{}': {}",
                path, e
            ))
        })?,
        None => value.to_string(),
    };
    RawValue::from_string(text).map_err(|e| {
        GeminiCliError::validation(format!("response-schema is not valid JSON: {}", e))
    })
}

/// Tool descriptors in fixed order: URL context, Google Search, retrieval.
pub fn build_tools(selection: &ToolSelection) -> Vec<Tool> {
    let mut tools = Vec::new();
    if selection.url_context {
        tools.push(Tool::url_context());
    }
    if selection.google_search {
        tools.push(Tool::google_search());
    }
    if selection.google_search_retrieval {
        let mode = selection.retrieval_mode.clone().filter(|m| !m.is_empty());
        let dynamic_threshold = selection.retrieval_threshold;
        let dynamic_retrieval_config = (mode.is_some() || dynamic_threshold.is_some())
            .then(|| DynamicRetrievalConfig {
                mode,
                dynamic_threshold,
            });
        tools.push(Tool::google_search_retrieval(GoogleSearchRetrieval {
            dynamic_retrieval_config,
        }));
    }
    tools
}

/// Parses `CATEGORY:THRESHOLD,CATEGORY:THRESHOLD`.
///
/// Empty entries are skipped; any other entry without a non-empty category
/// and threshold fails the whole string.
pub fn parse_safety_settings(input: &str) -> Result<Vec<SafetySetting>> {
    let mut settings = Vec::new();
    for pair in input.split(',') {
        let entry = pair.trim();
        if entry.is_empty() {
            continue;
        }
        let Some((category, threshold)) = entry.split_once(':') else {
            return Err(GeminiCliError::validation(format!(
                "invalid safety setting format: '{}'. Must be CATEGORY:THRESHOLD",
                pair
            )));
        };
        let (category, threshold) = (category.trim(), threshold.trim());
        if category.is_empty() || threshold.is_empty() {
            return Err(GeminiCliError::validation(format!(
                "invalid safety setting pair: '{}'. Must be CATEGORY:THRESHOLD",
                pair
            )));
        }
        settings.push(SafetySetting::new(category, threshold));
    }
    Ok(settings)
}
