use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Information about a Gemini model.
///
/// Only the fields the CLI reads are typed; anything else the API returns is
/// kept in [`ModelInfo::extra`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    /// The resource name of the model, e.g. `models/gemini-2.5-pro`.
    pub name: String,
    /// Version of the model.
    #[serde(default)]
    pub version: String,
    /// The display name of the model.
    #[serde(default)]
    pub display_name: String,
    /// A description of what the model does.
    #[serde(default)]
    pub description: String,
    /// Maximum number of tokens allowed for input.
    #[serde(default)]
    pub input_token_limit: i64,
    /// Maximum number of tokens allowed for output.
    #[serde(default)]
    pub output_token_limit: i64,
    /// List of supported generation methods (e.g., generateContent, countTokens).
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
    /// Default temperature for sampling from output distribution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Default top_p for nucleus sampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Default top_k for sampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<i64>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModelInfo {
    /// Whether `generateContent` is among the supported methods.
    pub fn supports_generate_content(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|method| method == "generateContent")
    }
}
