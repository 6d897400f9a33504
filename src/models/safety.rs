use serde::{Deserialize, Serialize};

/// Safety setting for a specific harm category.
///
/// Category and threshold are kept as the raw API strings
/// (`HARM_CATEGORY_HARASSMENT`, `BLOCK_ONLY_HIGH`, ...) so values the API
/// adds later pass straight through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    /// The category of harm to filter
    pub category: String,
    /// The threshold level for filtering
    pub threshold: String,
}

impl SafetySetting {
    /// Creates a new safety setting.
    pub fn new(category: impl Into<String>, threshold: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            threshold: threshold.into(),
        }
    }
}
