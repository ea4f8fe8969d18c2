//! Gemini text-generation client
//!
//! The model is used as an opaque text-in/text-out service: one prompt goes in, the
//! concatenated text parts of the response come out.

use serde_json::{json, Value};

/// Model used for every request
pub const MODEL: &str = "gemini-2.0-flash";

const ENDPOINT_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// The key travels in a header so it never shows up in a URL
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected API response format")]
    MalformedResponse,
    #[error("no text received from API")]
    EmptyResponse,
}

impl GeminiError {
    /// Transport or status failure, as opposed to a response that could not be used
    pub fn is_request_error(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Status { .. })
    }
}

pub type Result<T> = std::result::Result<T, GeminiError>;

/// Anything that turns a prompt into generated text
pub trait LanguageModel {
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Blocking HTTP client for the Gemini `generateContent` endpoint
pub struct GeminiClient {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(
            format!("{}/{}:generateContent", ENDPOINT_BASE, MODEL),
            api_key,
        )
    }

    /// Client for a different `generateContent` URL
    pub fn with_endpoint(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

impl LanguageModel for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String> {
        tracing::debug!(endpoint = %self.endpoint, prompt_len = prompt.len(), "calling language model");

        let response = self
            .client
            .post(self.endpoint.as_str())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&request_body(prompt))
            .send()
            .map_err(strip_url)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GeminiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = response.json().map_err(strip_url)?;
        extract_text(&value)
    }
}

fn strip_url(error: reqwest::Error) -> GeminiError {
    GeminiError::Http(error.without_url())
}

/// JSON body carrying a single text prompt
pub fn request_body(prompt: &str) -> Value {
    json!({
        "contents": [{
            "parts": [{ "text": prompt }]
        }]
    })
}

/// Concatenate the text parts of a response
///
/// The API answers with `candidates[].content.parts[].text`; a bare
/// `contents[].parts[].text` shape is accepted as well.
pub fn extract_text(response: &Value) -> Result<String> {
    let contents: Vec<&Value> = if let Some(candidates) =
        response.get("candidates").and_then(|v| v.as_array())
    {
        candidates.iter().filter_map(|c| c.get("content")).collect()
    } else if let Some(contents) = response.get("contents").and_then(|v| v.as_array()) {
        contents.iter().collect()
    } else {
        return Err(GeminiError::MalformedResponse);
    };

    if contents.is_empty() {
        return Err(GeminiError::MalformedResponse);
    }

    let text: String = contents
        .iter()
        .filter_map(|content| content.get("parts").and_then(|p| p.as_array()))
        .flatten()
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect();

    if text.is_empty() {
        Err(GeminiError::EmptyResponse)
    } else {
        Ok(text)
    }
}
