/*!
 * End-to-end subtitle processing tests: parse, translate in batches through a
 * mock collaborator, rebuild and write the document.
 */

use anyhow::Result;
use subglot::app_config::Config;
use subglot::app_controller::Controller;
use subglot::srt::SubtitleDocument;
use subglot::translation::{BatchTranslator, TRANSLATION_ERROR};
use crate::common;
use crate::common::mock_collaborators::{MockCollaborator, RecordingObserver};

/// Full pipeline over a file: parse -> translate -> rebuild -> write -> reread
#[tokio::test]
async fn test_workflow_withWorkingCollaborator_shouldProduceTranslatedFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input_path = common::create_test_subtitle(temp_dir.path(), "episode.srt")?;

    let document = SubtitleDocument::from_file(&input_path)?;
    assert_eq!(document.len(), 3);

    let collaborator = MockCollaborator::uppercase();
    let observer = RecordingObserver::new();
    let translator = BatchTranslator::with_batch_size(&collaborator, 2);
    let translated = translator
        .translate_texts(&document.texts(), "ja", "en", &observer)
        .await;

    let output = document.with_texts(&translated)?;
    let output_path = temp_dir.path().join("episode.en.srt");
    output.write_to_file(&output_path)?;

    let reread = SubtitleDocument::from_file(&output_path)?;
    assert_eq!(reread.len(), 3);
    assert_eq!(reread.entries[0].text, "THIS IS A TEST SUBTITLE.");
    assert_eq!(reread.entries[2].text, "FOR TESTING PURPOSES.");
    // Timings and ids survive the round trip untouched
    assert_eq!(reread.entries[0].id, 1);
    assert_eq!(reread.entries[0].start_time, "00:00:01,000");
    assert_eq!(reread.entries[2].end_time, "00:00:14,000");

    // ceil(3 / 2) batches, final progress at 100
    assert_eq!(observer.percents(), vec![67, 100]);
    Ok(())
}

/// Total collaborator unavailability still completes with a full-length,
/// sentinel-filled document
#[tokio::test]
async fn test_workflow_withUnavailableCollaborator_shouldCompleteWithSentinels() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input_path = common::create_test_subtitle(temp_dir.path(), "episode.srt")?;

    let document = SubtitleDocument::from_file(&input_path)?;
    let collaborator = MockCollaborator::failing();
    let observer = RecordingObserver::new();
    let translator = BatchTranslator::with_batch_size(&collaborator, 2);

    let translated = translator
        .translate_texts(&document.texts(), "ja", "en", &observer)
        .await;

    assert_eq!(translated.len(), document.len());
    assert!(translated.iter().all(|t| t == TRANSLATION_ERROR));

    // The rebuilt document still carries every entry
    let output = document.with_texts(&translated)?;
    assert_eq!(output.len(), 3);
    assert!(output.to_srt_string().contains(TRANSLATION_ERROR));
    Ok(())
}

/// Garbage input parses to an empty document, the caller's fatal signal
#[test]
fn test_workflow_withUnparseableInput_shouldYieldEmptyDocument() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input_path = common::create_test_file(
        temp_dir.path(),
        "broken.srt",
        "this file has\nno subtitle blocks\nat all",
    )?;

    let document = SubtitleDocument::from_file(&input_path)?;
    assert!(document.is_empty());
    Ok(())
}

/// The controller refuses input types it does not understand
#[tokio::test]
async fn test_controller_withUnknownInputType_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input_path = common::create_test_file(temp_dir.path(), "notes.txt", "hello")?;

    let controller = Controller::with_config(Config::default())?;
    let result = controller
        .run(input_path, temp_dir.path().to_path_buf(), false, None)
        .await;

    assert!(result.is_err());
    Ok(())
}

/// An existing output is skipped unless overwrite is forced
#[tokio::test]
async fn test_controller_withExistingOutput_shouldSkip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input_path = common::create_test_subtitle(temp_dir.path(), "episode.srt")?;
    // Pre-create the output the controller would write
    common::create_test_file(temp_dir.path(), "episode.en.srt", "already here")?;

    let controller = Controller::with_config(Config::default())?;
    controller
        .run(input_path, temp_dir.path().to_path_buf(), false, None)
        .await?;

    // Untouched: the run returned before translating anything
    let existing = std::fs::read_to_string(temp_dir.path().join("episode.en.srt"))?;
    assert_eq!(existing, "already here");
    Ok(())
}
