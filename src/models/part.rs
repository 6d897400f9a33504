//! Content parts carried inside a request.

use serde::{Deserialize, Serialize};

/// One fragment of a content block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    /// A text part containing a string value
    Text {
        /// The text content of the part
        text: String,
    },
    /// A part containing base64-encoded bytes
    InlineData {
        /// The inline data content of the part
        inline_data: InlineData,
    },
}

impl Part {
    /// Creates a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Creates an inline data part from an already base64-encoded payload.
    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            },
        }
    }
}

/// Base64 payload with its media type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineData {
    /// The MIME type of the inline data
    pub mime_type: String,
    /// Standard base64 encoding of the bytes
    pub data: String,
}
