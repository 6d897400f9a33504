//! Data structures for the Gemini AI API requests and responses.

mod generation_config;
mod info;
mod part;
mod request;
mod request_type;
mod response;
mod safety;
mod tool;

pub use generation_config::{GenerationConfig, ThinkingConfig};
pub use info::ModelInfo;
pub use part::{InlineData, Part};
pub use request::{Content, GenerateContentRequest};
pub use request_type::RequestType;
pub use response::{ListModelsResponse, ModelSummary};
pub use safety::SafetySetting;
pub use tool::{DynamicRetrievalConfig, EmptyConfig, GoogleSearchRetrieval, Tool};
