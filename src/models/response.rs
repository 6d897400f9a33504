//! Response models for the Gemini AI API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ModelInfo;

/// Response from listing available models.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListModelsResponse {
    /// List of available models and their details.
    #[serde(default)]
    pub models: Vec<ModelInfo>,
    /// Token for retrieving the next page of results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A model entry as printed by `list-models`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSummary {
    /// The resource name of the model.
    pub name: String,
    /// The display name of the model.
    pub display_name: String,
    /// Version of the model.
    pub version: String,
    /// Maximum number of tokens allowed for input.
    pub input_token_limit: i64,
    /// Maximum number of tokens allowed for output.
    pub output_token_limit: i64,
    /// Supported generation methods, as returned by the API.
    pub supported_generation_methods: Vec<String>,
    /// Whether the model is expected to produce general text output.
    pub supported_for_text_output: String,
}
