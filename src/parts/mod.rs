//! Turning `text`/`file` command-line arguments into request parts.
//!
//! File values are dispatched on their prefix:
//!
//! * `@path` - a local file
//! * `file:///path` - a local file given as a URI
//! * `http://...`, `https://...` - fetched with a GET request
//! * `data:<mime>;base64,<payload>` - an inline data URI

pub mod mime;

use std::io;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::error::{GeminiCliError, Result};
use crate::models::Part;

/// Errors raised while resolving a single `file` value.
#[derive(Error, Debug)]
pub enum PartError {
    /// Failed to read a local file.
    #[error("failed to read file '{path}'")]
    FileReadError {
        /// Path that was read
        path: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },
    /// The `file://` URI could not be mapped to a local path.
    #[error("invalid file URI '{0}'")]
    InvalidFileUri(String),
    /// Error occurred during the HTTP fetch.
    #[error("failed to fetch URL '{url}'")]
    FetchError {
        /// URL that was fetched
        url: String,
        /// Transport error
        #[source]
        source: reqwest::Error,
    },
    /// The remote server answered with a non-success status.
    #[error("failed to fetch URL '{url}': status {status}")]
    FetchStatus {
        /// URL that was fetched
        url: String,
        /// Status line returned
        status: String,
    },
    /// Malformed data URI.
    #[error("invalid data URI format: {0}")]
    InvalidDataUri(String),
    /// Data URI that is not base64 encoded.
    #[error("data URI not specified as base64 encoded (e.g., data:image/png;base64,...). Only base64 is supported for file data")]
    NotBase64,
    /// Data URI payload that does not decode.
    #[error("invalid base64 data in data URI")]
    InvalidBase64(#[from] base64::DecodeError),
    /// The value has none of the supported prefixes.
    #[error("unsupported file argument format: {0}. Use @/path, file://, http(s)://, or data:")]
    UnsupportedFormat(String),
}

/// Kind of a positional part argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    /// Literal text
    Text,
    /// File reference or inline data
    File,
}

impl FromStr for PartKind {
    type Err = GeminiCliError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(Self::Text),
            "file" => Ok(Self::File),
            other => Err(GeminiCliError::validation(format!(
                "invalid part type: {}. Must be 'text' or 'file'",
                other
            ))),
        }
    }
}

/// A type/value pair taken from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPart {
    /// What the value holds
    pub kind: PartKind,
    /// The raw value
    pub value: String,
}

impl ParsedPart {
    /// Creates a text part.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            kind: PartKind::Text,
            value: value.into(),
        }
    }

    /// Creates a file part.
    pub fn file(value: impl Into<String>) -> Self {
        Self {
            kind: PartKind::File,
            value: value.into(),
        }
    }
}

/// Splits positional arguments into type/value pairs.
pub fn parse_input_parts<S: AsRef<str>>(args: &[S]) -> Result<Vec<ParsedPart>> {
    if args.len() % 2 != 0 {
        return Err(GeminiCliError::validation(
            "input parts must be in pairs of type and value (e.g., text \"hello\")",
        ));
    }

    args.chunks_exact(2)
        .map(|pair| {
            Ok(ParsedPart {
                kind: pair[0].as_ref().parse()?,
                value: pair[1].as_ref().to_string(),
            })
        })
        .collect()
}

/// Resolves every part in order, stopping at the first failure.
pub async fn resolve_parts(http: &reqwest::Client, parts: &[ParsedPart]) -> Result<Vec<Part>> {
    let mut resolved = Vec::with_capacity(parts.len());
    for part in parts {
        resolved.push(resolve_part(http, part).await?);
    }
    Ok(resolved)
}

/// Resolves one parsed part into a request part.
pub async fn resolve_part(http: &reqwest::Client, part: &ParsedPart) -> Result<Part> {
    match part.kind {
        PartKind::Text => Ok(Part::text(part.value.clone())),
        PartKind::File => {
            let (mime_type, data) = process_file_argument(http, &part.value)
                .await
                .map_err(|source| GeminiCliError::PartResolution {
                    argument: part.value.clone(),
                    source,
                })?;
            debug!(mime_type = %mime_type, encoded_len = data.len(), "resolved file part");
            Ok(Part::inline_data(mime_type, data))
        }
    }
}

/// Returns `(mime_type, base64_data)` for a `file` value.
pub async fn process_file_argument(
    http: &reqwest::Client,
    arg: &str,
) -> std::result::Result<(String, String), PartError> {
    if let Some(path) = arg.strip_prefix('@') {
        read_file_as_base64(path).await
    } else if arg.starts_with("file://") {
        let path = file_uri_to_path(arg)?;
        read_file_as_base64(&path).await
    } else if arg.starts_with("http://") || arg.starts_with("https://") {
        read_url_as_base64(http, arg).await
    } else if arg.starts_with("data:") {
        parse_data_uri(arg)
    } else {
        Err(PartError::UnsupportedFormat(arg.to_string()))
    }
}

fn file_uri_to_path(uri: &str) -> std::result::Result<String, PartError> {
    let invalid = || PartError::InvalidFileUri(uri.to_string());
    let url = Url::parse(uri).map_err(|_| invalid())?;
    // to_file_path drops the leading '/' before a drive letter on Windows
    let path = url.to_file_path().map_err(|_| invalid())?;
    path.to_str().map(str::to_string).ok_or_else(invalid)
}

async fn read_file_as_base64(path: &str) -> std::result::Result<(String, String), PartError> {
    let data = tokio::fs::read(path)
        .await
        .map_err(|source| PartError::FileReadError {
            path: path.to_string(),
            source,
        })?;

    let mime_type = mime::for_local_file(path, &data);
    debug!(path, bytes = data.len(), "read local file");
    Ok((mime_type, STANDARD.encode(&data)))
}

async fn read_url_as_base64(
    http: &reqwest::Client,
    url: &str,
) -> std::result::Result<(String, String), PartError> {
    let fetch_error = |source: reqwest::Error| PartError::FetchError {
        url: url.to_string(),
        source: source.without_url(),
    };

    let response = http.get(url).send().await.map_err(fetch_error)?;
    let status = response.status();
    if !status.is_success() {
        return Err(PartError::FetchStatus {
            url: url.to_string(),
            status: status.to_string(),
        });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);
    let url_path = response.url().path().to_string();
    let data = response.bytes().await.map_err(fetch_error)?;

    let mime_type = mime::for_remote_file(&url_path, content_type.as_deref(), &data);
    debug!(url, bytes = data.len(), "fetched remote file");
    Ok((mime_type, STANDARD.encode(&data)))
}

/// Parses `data:[<mime>][;params];base64,<payload>`.
///
/// The payload is checked but returned exactly as given.
pub fn parse_data_uri(uri: &str) -> std::result::Result<(String, String), PartError> {
    let (header, payload) = uri
        .split_once(',')
        .ok_or_else(|| PartError::InvalidDataUri("missing comma separator".into()))?;

    let header = header
        .strip_prefix("data:")
        .ok_or_else(|| PartError::InvalidDataUri("must start with 'data:'".into()))?;

    let mut params = header.split(';');
    let mime_type = match params.next() {
        Some(mime) if !mime.trim().is_empty() => mime.trim().to_string(),
        _ => "text/plain".to_string(),
    };

    let is_base64 = params
        .last()
        .is_some_and(|param| param.trim().eq_ignore_ascii_case("base64"));
    if !is_base64 {
        return Err(PartError::NotBase64);
    }

    STANDARD.decode(payload)?;
    Ok((mime_type, payload.to_string()))
}
