/*!
 * Speech-to-text path: turn an extracted audio track into an English SRT.
 *
 * Unlike the batch translation path, the whole audio payload goes to the model
 * in a single request and the model is asked to emit a complete SRT document
 * directly. The caller runs the output through the SRT codec afterwards; a
 * document that parses to zero entries is treated as a failed transcription.
 */

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::{debug, info};

use crate::app_config::TranslationConfig;
use crate::errors::ProviderError;
use crate::providers::gemini::{Gemini, GeminiRequest};

/// Instruction prompt for the transcription request
const TRANSCRIBE_PROMPT: &str = "\
TASK: Japanese-to-English subtitle extraction from audio.

CONTEXT: The provided audio is from a video file. It may contain background noise or music.

INSTRUCTIONS:
1. Identify all spoken Japanese dialogue.
2. Transcribe the Japanese text accurately.
3. Translate the transcription into natural, high-quality conversational English.
4. Format the final output EXCLUSIVELY as a valid .srt file.
5. Ensure timestamps are relative to the audio start (00:00:00,000).

STRICT RULE: Return ONLY the SRT text. No preambles, no conversational filler.";

/// Audio transcription service backed by the Gemini API
pub struct Transcriber {
    /// Provider client
    client: Gemini,

    /// Model to use for transcription
    model: String,
}

impl Transcriber {
    /// Create a new transcriber from the translation configuration
    pub fn new(config: &TranslationConfig) -> Self {
        Self {
            client: Gemini::with_timeout(config.api_key(), &config.endpoint, config.timeout_secs),
            model: config.model.clone(),
        }
    }

    /// Transcribe and translate an audio payload into raw SRT text.
    ///
    /// The audio is sent inline, base64-encoded, together with a fixed
    /// instruction prompt. A response without a single `-->` timing separator
    /// is rejected outright; finer-grained validation is left to the SRT
    /// parser on the caller's side.
    pub async fn transcribe_to_srt(&self, audio: &[u8], mime_type: &str) -> Result<String, ProviderError> {
        info!("Transcribing {} bytes of {} audio", audio.len(), mime_type);

        let encoded = STANDARD.encode(audio);
        debug!("Inline audio payload is {} base64 characters", encoded.len());

        let request = GeminiRequest::new(&self.model)
            .add_text(TRANSCRIBE_PROMPT)
            .add_inline_data(mime_type, encoded)
            .temperature(0.1);

        let response = self.client.complete(request).await?;
        let srt_content = Gemini::extract_text_from_response(&response);

        if !srt_content.contains("-->") {
            return Err(ProviderError::ParseError(
                "Transcription response contains no SRT timing blocks".to_string(),
            ));
        }

        Ok(srt_content)
    }
}
