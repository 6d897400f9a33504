//! Error types for the Gemini CLI.

use std::path::PathBuf;

use thiserror::Error;

use crate::parts::PartError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GeminiCliError>;

const STORE_HINT: &str = "Run 'set-config --key YOUR_KEY' first";

/// Errors that can occur while building, sending or shaping a request.
#[derive(Debug, Error)]
pub enum GeminiCliError {
    /// The credential file does not exist yet.
    #[error("config file not found at {}. {}", .path.display(), STORE_HINT)]
    ConfigNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// The credential file exists but is unusable.
    #[error("{message} ({}). {}", .path.display(), STORE_HINT)]
    Config {
        /// Path of the credential file
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// Malformed command-line input.
    #[error("{0}")]
    Validation(String),

    /// A `text`/`file` argument could not be turned into a request part.
    #[error("failed to process file argument '{argument}'")]
    PartResolution {
        /// The offending argument as given on the command line
        argument: String,
        /// Underlying cause
        #[source]
        source: PartError,
    },

    /// The request could not be encoded as JSON.
    #[error("failed to encode request")]
    Serialization(#[from] serde_json::Error),

    /// The HTTP exchange itself failed.
    #[error("failed to execute request")]
    Transport(#[source] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error: {status}, Body: {body}")]
    Api {
        /// Status line, e.g. `400 Bad Request`
        status: String,
        /// Raw response body
        body: String,
    },

    /// The API response did not match the expected shape.
    #[error("failed to decode response. Raw response: {body}")]
    Decode {
        /// Decoder error
        #[source]
        source: serde_json::Error,
        /// Raw response body
        body: String,
    },

    /// Local filesystem failure outside part resolution.
    #[error("IO error")]
    Io(#[from] std::io::Error),
}

impl GeminiCliError {
    /// Creates a new validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }
}
