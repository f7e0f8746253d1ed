/*!
 * Translation services for subtitle translation using AI providers.
 *
 * This module is split into two submodules:
 *
 * - `core`: The collaborator seam and the Gemini-backed translation service
 * - `batch`: Batch orchestration with sentinel recovery and progress reporting
 */

// Re-export main types for easier usage
pub use self::batch::{BatchTranslator, TranslationObserver, DEFAULT_BATCH_SIZE, MISSING_TRANSLATION, TRANSLATION_ERROR};
pub use self::core::{TranslationCollaborator, TranslationService};

// Submodules
pub mod batch;
pub mod core;
