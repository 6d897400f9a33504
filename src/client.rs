//! Client implementation for the Gemini AI API.

use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::{
    error::{GeminiCliError, Result},
    models::{GenerateContentRequest, ListModelsResponse, RequestType},
};

/// Default API endpoint for Google's Generative AI service
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Default API version
const DEFAULT_API_VERSION: &str = "v1beta";
/// Environment variable that overrides the base URL
pub const BASE_URL_ENV: &str = "GOOGLE_BASE_URL";
/// Namespace prepended to bare model names
pub const MODEL_PREFIX: &str = "models/";

/// A client for the Gemini REST API authenticated with a static key.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Creates a client for the public endpoint, honouring `GOOGLE_BASE_URL`.
    ///
    /// # Arguments
    ///
    /// * `api_key` - The API key for authentication
    pub fn new(api_key: impl Into<String>) -> Self {
        let base_url = std::env::var(BASE_URL_ENV)
            .unwrap_or_else(|_| format!("{}/{}", DEFAULT_BASE_URL, DEFAULT_API_VERSION));
        Self::with_http_client(api_key, base_url, reqwest::Client::new())
    }

    /// Creates a client with an explicit base URL and HTTP client.
    pub fn with_http_client(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Replaces the base URL, e.g. to point at a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The underlying HTTP client, shared with remote part fetching.
    pub fn http(&self) -> &reqwest::Client {
        &self.client
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Performs one request and returns the raw response body.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiCliError::Api`] with the status line and body verbatim
    /// when the API does not answer with a success status.
    pub async fn call_raw<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, url = %url, "sending request");

        let mut request = self
            .client
            .request(method, &url)
            .query(&[("key", &self.api_key)]);
        if let Some(body) = body {
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(body)?);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(transport_error)?;
        debug!(status = %status, bytes = bytes.len(), "received response");

        if !status.is_success() {
            return Err(GeminiCliError::Api {
                status: status.to_string(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(bytes.to_vec())
    }

    /// Performs one request and decodes the body into `R`.
    ///
    /// # Errors
    ///
    /// Decoding failures carry the raw body in [`GeminiCliError::Decode`].
    pub async fn call<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<R> {
        let bytes = self.call_raw(method, path, body).await?;
        serde_json::from_slice(&bytes).map_err(|source| GeminiCliError::Decode {
            source,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }

    /// Sends a `generateContent` request and returns the provider's JSON untouched.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<Vec<u8>> {
        let path = format!("/{}:{}", qualify_model_name(model), RequestType::GenerateContent);
        self.call_raw(Method::POST, &path, Some(request)).await
    }

    /// Lists the models available to the key.
    pub async fn list_models(&self) -> Result<ListModelsResponse> {
        self.call::<(), _>(Method::GET, "/models", None).await
    }
}

/// The request URL carries the API key, so it is stripped from transport errors.
fn transport_error(err: reqwest::Error) -> GeminiCliError {
    GeminiCliError::Transport(err.without_url())
}

/// Prefixes `models/` unless the name already carries it.
pub fn qualify_model_name(model: &str) -> String {
    if model.starts_with(MODEL_PREFIX) {
        model.to_string()
    } else {
        format!("{}{}", MODEL_PREFIX, model)
    }
}
