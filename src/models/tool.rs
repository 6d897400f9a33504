use serde::{Deserialize, Serialize};

/// Tools data sent as part of the request.
///
/// Each variant serialises as a single-key object, e.g. `{"url_context": {}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tool {
    /// Lets the model read URLs mentioned in the prompt.
    UrlContext {
        /// Always empty
        url_context: EmptyConfig,
    },
    /// Grounding with Google Search.
    GoogleSearch {
        /// Always empty
        google_search: EmptyConfig,
    },
    /// Legacy Google Search retrieval used by 1.5 models.
    GoogleSearchRetrieval {
        /// Retrieval configuration, possibly empty
        google_search_retrieval: GoogleSearchRetrieval,
    },
}

impl Tool {
    /// Creates the URL context tool.
    pub fn url_context() -> Self {
        Self::UrlContext {
            url_context: EmptyConfig {},
        }
    }

    /// Creates the Google Search tool.
    pub fn google_search() -> Self {
        Self::GoogleSearch {
            google_search: EmptyConfig {},
        }
    }

    /// Creates the Google Search retrieval tool.
    pub fn google_search_retrieval(config: GoogleSearchRetrieval) -> Self {
        Self::GoogleSearchRetrieval {
            google_search_retrieval: config,
        }
    }
}

/// Marker for tools that take no options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmptyConfig {}

/// Configuration for Google search retrieval.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoogleSearchRetrieval {
    /// Dynamic retrieval settings; omitted to use the API defaults.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_retrieval_config: Option<DynamicRetrievalConfig>,
}

/// When and how eagerly retrieval is triggered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DynamicRetrievalConfig {
    /// Retrieval mode, e.g. `MODE_DYNAMIC`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Threshold above which retrieval is used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_threshold: Option<f64>,
}
