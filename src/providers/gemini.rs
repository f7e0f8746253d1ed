use std::time::Duration;
use serde::{Deserialize, Serialize};
use reqwest::Client;
use log::error;

use crate::errors::ProviderError;

/// Gemini client for interacting with the Generative Language API
pub struct Gemini {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to the public API)
    endpoint: String,
}

/// A single part of a request or response content block.
///
/// Exactly one of the fields is populated: plain text, or inline binary data
/// (base64) for audio payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiPart {
    /// Text content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Inline binary content
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<GeminiInlineData>,
}

/// Inline base64 payload for binary content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiInlineData {
    /// MIME type of the payload (e.g. "audio/aac")
    #[serde(rename = "mimeType")]
    pub mime_type: String,

    /// Base64-encoded data
    pub data: String,
}

/// Content block holding an ordered list of parts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiContent {
    /// Parts of this content block
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

/// Generation parameters
#[derive(Debug, Clone, Default, Serialize)]
pub struct GeminiGenerationConfig {
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Requested response MIME type (e.g. "application/json")
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

/// Gemini generateContent request
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    /// The model to use; part of the request URL, not the body
    #[serde(skip)]
    model: String,

    /// The content blocks for the request
    contents: Vec<GeminiContent>,

    /// Generation parameters
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

impl GeminiRequest {
    /// Create a new request for the given model with a single content block
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            contents: vec![GeminiContent { parts: Vec::new() }],
            generation_config: None,
        }
    }

    /// Append a text part to the request content
    pub fn add_text(mut self, text: impl Into<String>) -> Self {
        self.contents[0].parts.push(GeminiPart {
            text: Some(text.into()),
            inline_data: None,
        });
        self
    }

    /// Append an inline base64 data part to the request content
    pub fn add_inline_data(mut self, mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        self.contents[0].parts.push(GeminiPart {
            text: None,
            inline_data: Some(GeminiInlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
        });
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.generation_config
            .get_or_insert_with(GeminiGenerationConfig::default)
            .temperature = Some(temperature);
        self
    }

    /// Request a structured response MIME type
    pub fn response_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.generation_config
            .get_or_insert_with(GeminiGenerationConfig::default)
            .response_mime_type = Some(mime_type.into());
        self
    }

    /// The model this request targets
    pub fn model(&self) -> &str {
        &self.model
    }
}

/// A response candidate
#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    /// Generated content
    pub content: Option<GeminiContent>,
}

/// Token usage information
#[derive(Debug, Deserialize)]
pub struct GeminiUsageMetadata {
    /// Number of input tokens
    #[serde(rename = "promptTokenCount")]
    pub prompt_token_count: Option<u64>,

    /// Number of output tokens
    #[serde(rename = "candidatesTokenCount")]
    pub candidates_token_count: Option<u64>,
}

/// Gemini generateContent response
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    /// Response candidates; the first one carries the generated text
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,

    /// Token usage information
    #[serde(rename = "usageMetadata")]
    pub usage_metadata: Option<GeminiUsageMetadata>,
}

impl Gemini {
    /// Create a new Gemini client with the default request timeout - used by
    /// tests and external consumers
    #[allow(dead_code)]
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::with_timeout(api_key, endpoint, 120)
    }

    /// Create a new Gemini client with an explicit request timeout
    pub fn with_timeout(api_key: impl Into<String>, endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Complete a generateContent request
    pub async fn complete(&self, request: GeminiRequest) -> Result<GeminiResponse, ProviderError> {
        let base = if self.endpoint.is_empty() {
            "https://generativelanguage.googleapis.com".to_string()
        } else {
            self.endpoint.trim_end_matches('/').to_string()
        };
        let api_url = format!("{}/v1beta/models/{}:generateContent", base, request.model());

        let response = self
            .client
            .post(&api_url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ProviderError::ConnectionError(e.to_string())
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Gemini API error ({}): {}", status, error_text);
            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(ProviderError::AuthenticationError(error_text));
            }
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        response
            .json::<GeminiResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse Gemini API response: {}", e)))
    }

    /// Test the connection to the Gemini API
    pub async fn test_connection(&self, model: &str) -> Result<(), ProviderError> {
        let request = GeminiRequest::new(model).add_text("Hello");
        self.complete(request).await?;
        Ok(())
    }

    /// Extract the generated text from a response, concatenating the text
    /// parts of the first candidate
    pub fn extract_text_from_response(response: &GeminiResponse) -> String {
        response
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}
