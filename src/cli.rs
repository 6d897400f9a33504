//! Command-line definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::builder::{GenerationOptions, ToolSelection};

const PART_HELP: &str = "\
Part Types and Values:
  text \"your text string\"
  file \"@/path/to/local/file\"
  file \"http(s)://url/to/file\"
  file \"file:///path/to/local/file\"
  file \"data:mime/type;base64,ABC...\"

Example:
  gemini-cli generate --model gemini-2.5-flash text \"Describe this image\" file \"@/path/to/image.jpg\"";

/// Top-level arguments.
#[derive(Parser, Debug)]
#[command(name = "gemini-cli")]
#[command(version)]
#[command(about = "Command-line client for the Google Gemini API", long_about = None)]
pub struct Cli {
    /// Path to the API key file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log request details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set the Gemini API key
    SetConfig {
        /// Gemini API key
        #[arg(long)]
        key: String,
    },
    /// Generate content using a Gemini model
    #[command(after_help = PART_HELP)]
    Generate(GenerateArgs),
    /// List available Gemini models
    ListModels,
}

/// Generate content using a Gemini model
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Model name (e.g., gemini-2.5-flash or models/gemini-2.5-flash)
    #[arg(long)]
    pub model: String,

    /// System instruction text
    #[arg(long, default_value = "")]
    pub system_instruction: String,

    /// Temperature for generation (e.g., 0.7)
    #[arg(long, value_parser = non_negative_f64)]
    pub temperature: Option<f64>,

    /// Max output tokens
    #[arg(long)]
    pub max_output_tokens: Option<u32>,

    /// Top-P sampling
    #[arg(long, value_parser = non_negative_f64)]
    pub top_p: Option<f64>,

    /// Top-K sampling
    #[arg(long)]
    pub top_k: Option<u32>,

    /// A single stop sequence string
    #[arg(long)]
    pub stop_sequence: Option<String>,

    /// Response MIME type (e.g., application/json)
    #[arg(long)]
    pub response_mime_type: Option<String>,

    /// OpenAPI subset schema as JSON string or @/path/to/schema.json
    #[arg(long)]
    pub response_schema: Option<String>,

    /// Thinking budget for 2.5 models (-1 lets the model decide)
    #[arg(long, allow_negative_numbers = true)]
    pub thinking_budget: Option<i32>,

    /// Include thought summaries
    #[arg(long)]
    pub include_thoughts: bool,

    /// Enable URL context tool
    #[arg(long)]
    pub tool_url_context: bool,

    /// Enable Google Search tool
    #[arg(long)]
    pub tool_google_search: bool,

    /// Enable Google Search Retrieval tool (for 1.5 models)
    #[arg(long)]
    pub tool_google_search_retrieval: bool,

    /// Mode for Google Search Retrieval (e.g., MODE_DYNAMIC)
    #[arg(long)]
    pub tool_gsr_mode: Option<String>,

    /// Threshold for dynamic Google Search Retrieval
    #[arg(long, value_parser = non_negative_f64)]
    pub tool_gsr_threshold: Option<f64>,

    /// Comma-separated safety settings, e.g. "HARM_CATEGORY_HARASSMENT:BLOCK_ONLY_HIGH"
    #[arg(long, default_value = "")]
    pub safety_settings: String,

    /// Alternating part types and values
    #[arg(
        value_name = "PART_TYPE PART_VALUE",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub parts: Vec<String>,
}

impl GenerateArgs {
    /// Generation overrides carried by the flags.
    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
            top_p: self.top_p,
            top_k: self.top_k,
            stop_sequence: self.stop_sequence.clone(),
            response_mime_type: self.response_mime_type.clone(),
            response_schema: self.response_schema.clone(),
            thinking_budget: self.thinking_budget,
            include_thoughts: self.include_thoughts,
        }
    }

    /// Tool toggles carried by the flags.
    pub fn tool_selection(&self) -> ToolSelection {
        ToolSelection {
            url_context: self.tool_url_context,
            google_search: self.tool_google_search,
            google_search_retrieval: self.tool_google_search_retrieval,
            retrieval_mode: self.tool_gsr_mode.clone(),
            retrieval_threshold: self.tool_gsr_threshold,
        }
    }
}

fn non_negative_f64(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("expected a non-negative number, got {s}"))
    }
}
