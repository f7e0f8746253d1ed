/*!
 * Core translation service implementation.
 *
 * This module defines the collaborator seam the batch orchestrator depends on,
 * and the production implementation backed by the Gemini provider client.
 */

use anyhow::Result;
use async_trait::async_trait;
use log::debug;

use crate::app_config::TranslationConfig;
use crate::errors::ProviderError;
use crate::language_utils::language_display_name;
use crate::providers::gemini::{Gemini, GeminiRequest};

/// External translation collaborator.
///
/// Takes an ordered batch of source strings and returns an ordered batch of
/// translated strings of the same length, or fails as a whole. The transport
/// behind the trait is irrelevant to callers; only the ordered-batch-in,
/// ordered-batch-out contract matters. Implementations must not reorder.
#[async_trait]
pub trait TranslationCollaborator: Send + Sync {
    /// Translate one batch of texts
    async fn translate_batch(
        &self,
        texts: &[String],
        source_language: &str,
        target_language: &str,
    ) -> Result<Vec<String>, ProviderError>;
}

/// Main translation service backed by the Gemini API
pub struct TranslationService {
    /// Provider client
    client: Gemini,

    /// Configuration for the translation service
    pub config: TranslationConfig,
}

impl TranslationService {
    /// Create a new translation service with the given configuration
    pub fn new(config: TranslationConfig) -> Result<Self> {
        let client = Gemini::with_timeout(config.api_key(), &config.endpoint, config.timeout_secs);
        Ok(Self { client, config })
    }

    /// Smoke-test the provider connection with a minimal request
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        self.client.test_connection(&self.config.model).await
    }

    /// Build the line-translation prompt for one batch.
    ///
    /// The contract with the model: keep the exact number of lines and return
    /// nothing but a JSON array of strings, so the response can be mapped back
    /// onto the batch positionally.
    fn build_prompt(texts: &[String], source_language: &str, target_language: &str) -> Result<String, ProviderError> {
        let lines = serde_json::to_string(texts)
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to serialize batch: {}", e)))?;

        Ok(format!(
            "Translate the following {} subtitle lines into natural, idiomatic {}.\n\
             Maintain the exact same number of lines as provided.\n\
             Return only a JSON array of strings.\n\n\
             Lines to translate:\n{}",
            language_display_name(source_language),
            language_display_name(target_language),
            lines
        ))
    }
}

#[async_trait]
impl TranslationCollaborator for TranslationService {
    async fn translate_batch(
        &self,
        texts: &[String],
        source_language: &str,
        target_language: &str,
    ) -> Result<Vec<String>, ProviderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let prompt = Self::build_prompt(texts, source_language, target_language)?;

        let request = GeminiRequest::new(&self.config.model)
            .add_text(prompt)
            .response_mime_type("application/json");

        let response = self.client.complete(request).await?;

        if let Some(usage) = &response.usage_metadata {
            debug!(
                "Gemini token usage: prompt={:?} completion={:?}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        let output = Gemini::extract_text_from_response(&response);

        serde_json::from_str::<Vec<String>>(&output).map_err(|e| {
            ProviderError::ParseError(format!("Expected a JSON array of strings, got parse error: {}", e))
        })
    }
}
