//! Request models for the Gemini AI API.

use serde::Serialize;

use super::{GenerationConfig, Part, SafetySetting, Tool};

/// Body of a `generateContent` call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerateContentRequest {
    /// Optional system instruction for the model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    /// The contents of the request; at most one block is produced by the CLI
    pub contents: Vec<Content>,
    /// Tools the model may use
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
    /// Per-category safety overrides
    #[serde(rename = "safetySettings", skip_serializing_if = "Option::is_none")]
    pub safety_settings: Option<Vec<SafetySetting>>,
    /// Sampling and output controls
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// A content object containing parts of the request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    /// The parts that make up the content.
    pub parts: Vec<Part>,
}

impl Content {
    /// Wraps a single text part, as used for system instructions.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::text(text)],
        }
    }
}
