use anyhow::{Context, Result, anyhow};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::errors::SubtitleError;
use crate::file_utils::{FileManager, FileType};
use crate::media::{self, TrackKind};
use crate::srt::SubtitleDocument;
use crate::transcribe::Transcriber;
use crate::translation::{BatchTranslator, TRANSLATION_ERROR, TranslationService};

// @module: Application controller driving the upload-to-SRT workflow

/// Main application controller for subtitle translation.
///
/// Drives the whole pipeline: classify the input, probe and extract a track
/// when the input is a video, then parse, translate in batches and regenerate
/// the SRT document. The translation service is constructed once here and
/// passed into the orchestrator by parameter.
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Translation collaborator shared across batches
    service: TranslationService,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        info!(
            "Using {} provider, model {}",
            config.translation.provider.display_name(),
            config.translation.model
        );
        let service = TranslationService::new(config.translation.clone())?;
        Ok(Self { config, service })
    }

    /// Run the main workflow for one input file.
    ///
    /// `track` forces a specific stream index for video inputs; without it the
    /// best track for the configured source language is selected
    /// automatically.
    pub async fn run(
        &self,
        input_file: PathBuf,
        output_dir: PathBuf,
        force_overwrite: bool,
        track: Option<usize>,
    ) -> Result<()> {
        let start_time = Instant::now();

        if !input_file.exists() {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        FileManager::ensure_dir(&output_dir)?;

        let output_path = FileManager::generate_output_path(
            &input_file,
            &output_dir,
            &self.config.target_language,
            "srt",
        );
        if output_path.exists() && !force_overwrite {
            warn!("Skipping file, translation already exists (use -f to force overwrite)");
            return Ok(());
        }

        match FileManager::detect_file_type(&input_file) {
            FileType::Subtitle => {
                info!("Detected subtitle file, skipping extraction");
                let document = SubtitleDocument::from_file(&input_file)?;
                self.translate_document(document, &output_path).await?;
            }
            FileType::Video => {
                self.process_video(&input_file, &output_path, track).await?;
            }
            FileType::Unknown => {
                return Err(anyhow!(
                    "Unsupported input file type: {:?} (expected a video container or .srt)",
                    input_file
                ));
            }
        }

        info!(
            "Completed in {} -> {:?}",
            Self::format_duration(start_time.elapsed()),
            output_path
        );
        Ok(())
    }

    /// Probe a video and select a track, then route to the subtitle or audio
    /// pipeline
    async fn process_video(&self, input_file: &Path, output_path: &Path, track: Option<usize>) -> Result<()> {
        // Fire-and-forget provider check; a dead provider surfaces later per
        // batch anyway, this just gets the warning out before extraction
        let translation_config = self.config.translation.clone();
        tokio::spawn(async move {
            if let Ok(service) = TranslationService::new(translation_config) {
                if let Err(e) = service.test_connection().await {
                    warn!("Provider connection check failed: {}", e);
                }
            }
        });

        info!("Probing media streams in {:?}", input_file);
        let tracks = media::probe_tracks(input_file).await?;

        if tracks.is_empty() {
            return Err(anyhow!("No audio or subtitle streams found in the container"));
        }

        for t in &tracks {
            info!(
                "  Stream 0:{} [{:?}] codec={} language={} {}",
                t.index,
                t.kind,
                t.codec_name,
                t.language.as_deref().unwrap_or("und"),
                t.title.as_deref().unwrap_or("")
            );
        }

        let selected = match track {
            Some(index) => tracks
                .iter()
                .find(|t| t.index == index)
                .ok_or_else(|| anyhow!("No audio or subtitle stream with index {}", index))?,
            None => media::select_track(&tracks, &self.config.source_language)
                .ok_or_else(|| anyhow!("No usable track found for language: {}", self.config.source_language))?,
        };

        if selected.is_bitmap_subtitle() {
            return Err(anyhow!(
                "Stream 0:{} is a bitmap subtitle ({}) and cannot be converted to text without OCR",
                selected.index,
                selected.codec_name
            ));
        }

        info!(
            "Selected stream 0:{} ({:?}, {})",
            selected.index,
            selected.kind,
            selected.language.as_deref().unwrap_or("und")
        );

        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;

        match selected.kind {
            TrackKind::Subtitle => {
                let extracted = temp_dir.path().join("extracted.srt");
                media::extract_subtitle_track(input_file, selected.index, extracted.as_path()).await?;
                let document = SubtitleDocument::from_file(&extracted)?;
                self.translate_document(document, output_path).await
            }
            TrackKind::Audio => {
                let extracted = temp_dir.path().join("isolated_audio.aac");
                media::extract_audio_track(input_file, selected.index, extracted.as_path()).await?;
                let audio = FileManager::read_to_bytes(&extracted)?;

                let transcriber = Transcriber::new(&self.config.translation);
                let srt_content = transcriber.transcribe_to_srt(&audio, "audio/aac").await?;

                // Normalize the model output through the codec; an empty parse
                // means the transcription did not produce usable subtitles.
                let document = SubtitleDocument::parse(&srt_content);
                if document.is_empty() {
                    return Err(SubtitleError::NoEntries)
                        .context("Could not read subtitle data from the transcription output");
                }
                info!("Transcription produced {} subtitle entries", document.len());

                document.write_to_file(output_path)
            }
        }
    }

    /// Translate a parsed document batch by batch and write the rebuilt
    /// document
    async fn translate_document(&self, document: SubtitleDocument, output_path: &Path) -> Result<()> {
        if document.is_empty() {
            return Err(SubtitleError::NoEntries).context("Could not read subtitle data from input");
        }
        info!("Parsed {} subtitle entries", document.len());

        let texts = document.texts();
        let progress = Self::build_progress_bar(texts.len() as u64);
        let progress_for_observer = progress.clone();

        let observer = move |percent: u8, batch_results: &[String]| {
            progress_for_observer.inc(batch_results.len() as u64);
            progress_for_observer.set_message(format!("{}%", percent));
        };

        let translator = BatchTranslator::with_batch_size(&self.service, self.config.translation.batch_size);
        let translated = translator
            .translate_texts(
                &texts,
                &self.config.source_language,
                &self.config.target_language,
                &observer,
            )
            .await;

        progress.finish_and_clear();

        let failed = translated.iter().filter(|t| t.as_str() == TRANSLATION_ERROR).count();
        if failed > 0 {
            warn!(
                "{} of {} entries could not be translated and carry placeholder text",
                failed,
                translated.len()
            );
        }

        let output = document.with_texts(&translated)?;
        output.write_to_file(output_path)
    }

    /// Progress bar for the translation phase
    fn build_progress_bar(total: u64) -> ProgressBar {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        bar
    }

    /// Format a duration as a compact human-readable string
    fn format_duration(duration: Duration) -> String {
        let total_secs = duration.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        if minutes > 0 {
            format!("{}m {:02}s", minutes, seconds)
        } else {
            format!("{}.{}s", seconds, duration.subsec_millis() / 100)
        }
    }
}
