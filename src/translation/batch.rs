/*!
 * Batch translation orchestration.
 *
 * Splits subtitle texts into fixed-size batches, sends each batch to the
 * translation collaborator strictly in sequence, and stitches the results back
 * together so that the output always has the same length and order as the
 * input. A failed batch degrades into sentinel placeholders instead of
 * aborting the run; a partial subtitle translation is considered more useful
 * than an aborted pipeline.
 */

use log::{error, warn};

use super::core::TranslationCollaborator;

/// Default number of texts per collaborator request
pub const DEFAULT_BATCH_SIZE: usize = 25;

/// Placeholder for a position the collaborator left untranslated
pub const MISSING_TRANSLATION: &str = "[Missing Translation]";

/// Placeholder substituted for every position of a failed batch
pub const TRANSLATION_ERROR: &str = "[Translation Error]";

/// Observer notified once after every batch, success or failure.
///
/// Percentages are monotonically non-decreasing and bounded to 100; the
/// batch's own results are passed so a caller can render incremental output
/// without waiting for the whole run.
pub trait TranslationObserver: Send + Sync {
    /// Called exactly once per processed batch
    fn on_batch_complete(&self, percent: u8, batch_results: &[String]);
}

impl<F> TranslationObserver for F
where
    F: Fn(u8, &[String]) + Send + Sync,
{
    fn on_batch_complete(&self, percent: u8, batch_results: &[String]) {
        self(percent, batch_results)
    }
}

/// Batch translator driving a collaborator over an ordered text sequence.
///
/// The collaborator handle is passed in by the caller; the translator holds no
/// global client state and no shared mutable state beyond the accumulating
/// result sequence it owns for the duration of one call.
pub struct BatchTranslator<'a> {
    /// The translation collaborator to use
    collaborator: &'a dyn TranslationCollaborator,

    /// Maximum number of texts per batch, always at least 1
    batch_size: usize,
}

impl<'a> BatchTranslator<'a> {
    /// Create a new batch translator with the default batch size
    pub fn new(collaborator: &'a dyn TranslationCollaborator) -> Self {
        Self::with_batch_size(collaborator, DEFAULT_BATCH_SIZE)
    }

    /// Create a new batch translator with an explicit batch size
    pub fn with_batch_size(collaborator: &'a dyn TranslationCollaborator, batch_size: usize) -> Self {
        Self {
            collaborator,
            batch_size: batch_size.max(1),
        }
    }

    /// Translate all texts, batch by batch.
    ///
    /// Batches run one after another, never concurrently: progress stays
    /// monotonic and the external service's rate limits are respected. The
    /// returned sequence has exactly the same length as `texts`, with
    /// `result[i]` corresponding to `texts[i]`. No error escapes this method;
    /// collaborator failures are converted into [`TRANSLATION_ERROR`]
    /// placeholders for the affected batch only, and short responses are
    /// padded with [`MISSING_TRANSLATION`].
    pub async fn translate_texts(
        &self,
        texts: &[String],
        source_language: &str,
        target_language: &str,
        observer: &dyn TranslationObserver,
    ) -> Vec<String> {
        let total = texts.len();
        let mut results: Vec<String> = Vec::with_capacity(total);
        if total == 0 {
            return results;
        }

        for (batch_index, batch) in texts.chunks(self.batch_size).enumerate() {
            let batch_results = match self
                .collaborator
                .translate_batch(batch, source_language, target_language)
                .await
            {
                Ok(translations) => {
                    if translations.len() < batch.len() {
                        warn!(
                            "Batch {} returned {} translations for {} texts, padding the rest",
                            batch_index + 1,
                            translations.len(),
                            batch.len()
                        );
                    }
                    // Positional alignment is the invariant that keeps
                    // subtitles in sync: missing or empty positions are
                    // padded, surplus positions are ignored.
                    (0..batch.len())
                        .map(|idx| {
                            translations
                                .get(idx)
                                .filter(|t| !t.is_empty())
                                .cloned()
                                .unwrap_or_else(|| MISSING_TRANSLATION.to_string())
                        })
                        .collect::<Vec<_>>()
                }
                Err(e) => {
                    error!("Translation failed for batch {}: {}", batch_index + 1, e);
                    vec![TRANSLATION_ERROR.to_string(); batch.len()]
                }
            };

            results.extend_from_slice(&batch_results);

            let percent = ((results.len() as f64 / total as f64) * 100.0).round() as u8;
            observer.on_batch_complete(percent.min(100), &batch_results);
        }

        debug_assert_eq!(results.len(), total);
        results
    }
}
