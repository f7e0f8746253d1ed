use std::path::Path;
use anyhow::{Result, anyhow};
use serde_json::{Value, from_str};
use log::{debug, error, warn};
use tokio::process::Command;

use crate::language_utils;

// @module: Media container probing and stream extraction via ffmpeg/ffprobe

/// Kind of stream a track represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    /// Audio stream
    Audio,
    /// Subtitle stream
    Subtitle,
}

/// One audio or subtitle stream discovered in a media container
#[derive(Debug, Clone)]
pub struct MediaTrack {
    /// Stream index within the container
    pub index: usize,

    /// Stream kind
    pub kind: TrackKind,

    /// Codec name as reported by ffprobe
    pub codec_name: String,

    /// Language tag, when the container carries one
    pub language: Option<String>,

    /// Stream title, when the container carries one
    pub title: Option<String>,

    /// Channel layout for audio streams (e.g. "stereo")
    pub channels: Option<String>,
}

impl MediaTrack {
    /// True for subtitle codecs that are bitmap images and cannot be
    /// converted to text SRT without OCR
    pub fn is_bitmap_subtitle(&self) -> bool {
        self.kind == TrackKind::Subtitle
            && matches!(
                self.codec_name.as_str(),
                "hdmv_pgs_subtitle" | "dvd_subtitle" | "dvb_subtitle" | "xsub"
            )
    }

    /// True when this track's language tag or title matches the given code
    pub fn matches_language(&self, language: &str) -> bool {
        if let Some(tag) = &self.language {
            if language_utils::language_codes_match(tag, language) {
                return true;
            }
        }
        if let Some(title) = &self.title {
            let title_lower = title.to_lowercase();
            if title_lower.contains(&language.to_lowercase()) {
                return true;
            }
            let name = language_utils::language_display_name(language).to_lowercase();
            if title_lower.contains(&name) {
                return true;
            }
        }
        false
    }
}

/// List the audio and subtitle streams in a media container
pub async fn probe_tracks<P: AsRef<Path>>(video_path: P) -> Result<Vec<MediaTrack>> {
    let video_path = video_path.as_ref();

    if !video_path.exists() {
        return Err(anyhow!("Video file not found: {:?}", video_path));
    }

    // Add timeout to prevent hanging on problematic files
    let ffprobe_future = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_streams",
            video_path.to_str().unwrap_or(""),
        ])
        .output();

    let timeout_duration = std::time::Duration::from_secs(60);
    let output = tokio::select! {
        result = ffprobe_future => {
            result.map_err(|e| anyhow!("Failed to execute ffprobe command: {}", e))?
        },
        _ = tokio::time::sleep(timeout_duration) => {
            return Err(anyhow!("ffprobe command timed out after 60 seconds"));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        error!("ffprobe failed: {}", stderr);
        return Err(anyhow!("ffprobe command failed: {}", stderr));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if stdout.trim().is_empty() {
        return Ok(Vec::new());
    }

    let json: Value = from_str(&stdout)?;

    let mut tracks = Vec::new();
    if let Some(streams) = json.get("streams").and_then(|s| s.as_array()) {
        for stream in streams {
            let kind = match stream.get("codec_type").and_then(|v| v.as_str()) {
                Some("audio") => TrackKind::Audio,
                Some("subtitle") => TrackKind::Subtitle,
                _ => continue,
            };

            let index = stream
                .get("index")
                .and_then(|v| v.as_u64())
                .map(|v| v as usize)
                .unwrap_or(0);

            let codec_name = stream
                .get("codec_name")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown")
                .to_string();

            let language = stream
                .get("tags")
                .and_then(|t| t.get("language"))
                .and_then(|l| l.as_str())
                .map(|s| s.to_string());

            let title = stream
                .get("tags")
                .and_then(|t| t.get("title"))
                .and_then(|l| l.as_str())
                .map(|s| s.to_string());

            let channels = stream
                .get("channel_layout")
                .and_then(|c| c.as_str())
                .map(|s| s.to_string());

            tracks.push(MediaTrack {
                index,
                kind,
                codec_name,
                language,
                title,
                channels,
            });
        }
    }

    debug!("Probe found {} audio/subtitle stream(s)", tracks.len());
    Ok(tracks)
}

/// Pick the track to process for the given source language.
///
/// Text subtitle tracks win over audio tracks since they skip the
/// transcription step entirely; within each kind, a language match wins over
/// the first available track. Bitmap subtitle tracks are never selectable.
pub fn select_track<'a>(tracks: &'a [MediaTrack], source_language: &str) -> Option<&'a MediaTrack> {
    let text_subtitles: Vec<&MediaTrack> = tracks
        .iter()
        .filter(|t| t.kind == TrackKind::Subtitle && !t.is_bitmap_subtitle())
        .collect();
    let audio: Vec<&MediaTrack> = tracks.iter().filter(|t| t.kind == TrackKind::Audio).collect();

    let bitmap_count = tracks.iter().filter(|t| t.is_bitmap_subtitle()).count();
    if bitmap_count > 0 {
        warn!(
            "Skipping {} bitmap subtitle track(s) (PGS/VobSub) that cannot be converted to text",
            bitmap_count
        );
    }

    text_subtitles
        .iter()
        .find(|t| t.matches_language(source_language))
        .or_else(|| audio.iter().find(|t| t.matches_language(source_language)))
        .or_else(|| text_subtitles.first())
        .or_else(|| audio.first())
        .copied()
}

/// Extract an audio stream to a standalone AAC file
pub async fn extract_audio_track<P: AsRef<Path>>(video_path: P, track_index: usize, output_path: P) -> Result<()> {
    let video_path = video_path.as_ref();
    let output_path = output_path.as_ref();

    let args = [
        "-y",
        "-i",
        video_path.to_str().unwrap_or_default(),
        "-map",
        &format!("0:{}", track_index),
        "-vn",
        "-acodec",
        "aac",
        "-b:a",
        "128k",
        output_path.to_str().unwrap_or_default(),
    ];

    run_ffmpeg(&args, "audio extraction").await
}

/// Extract a text subtitle stream to an SRT file
pub async fn extract_subtitle_track<P: AsRef<Path>>(video_path: P, track_index: usize, output_path: P) -> Result<()> {
    let video_path = video_path.as_ref();
    let output_path = output_path.as_ref();

    let args = [
        "-y",
        "-i",
        video_path.to_str().unwrap_or_default(),
        "-map",
        &format!("0:{}", track_index),
        "-c:s",
        "srt",
        output_path.to_str().unwrap_or_default(),
    ];

    run_ffmpeg(&args, "subtitle extraction").await
}

/// Run an ffmpeg command with a timeout, surfacing a filtered stderr on failure
async fn run_ffmpeg(args: &[&str], what: &str) -> Result<()> {
    let ffmpeg_future = Command::new("ffmpeg").args(args).output();

    let timeout_duration = std::time::Duration::from_secs(120);
    let result = tokio::select! {
        result = ffmpeg_future => {
            result.map_err(|e| anyhow!("Failed to execute ffmpeg command for {}: {}", what, e))?
        },
        _ = tokio::time::sleep(timeout_duration) => {
            return Err(anyhow!("ffmpeg command for {} timed out after 2 minutes", what));
        }
    };

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        let filtered = filter_ffmpeg_stderr(&stderr);
        error!("ffmpeg {} failed: {}", what, filtered);
        return Err(anyhow!("ffmpeg {} failed: {}", what, filtered));
    }

    Ok(())
}

/// Strip the ffmpeg version banner, build configuration and stream metadata
/// noise from stderr, keeping only lines that can explain a failure
fn filter_ffmpeg_stderr(stderr: &str) -> String {
    let noise_prefixes = [
        "ffmpeg version",
        "built with",
        "configuration:",
        "lib",
        "Input #",
        "Output #",
        "Metadata:",
        "Duration:",
        "Stream #",
        "Stream mapping:",
        "Press [q]",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !noise_prefixes.iter().any(|p| line.starts_with(p)))
        .collect();

    if meaningful.is_empty() {
        "unknown ffmpeg error (stderr was empty after filtering)".to_string()
    } else {
        meaningful.join("\n")
    }
}
