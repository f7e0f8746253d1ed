/*!
 * Provider client implementations.
 *
 * This module contains the HTTP client for the Gemini API, which backs both
 * the batch text translation service and the audio transcription path.
 */

pub mod gemini;
