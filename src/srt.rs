use std::fmt;
use std::fs;
use std::path::Path;
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use log::debug;

use crate::errors::SubtitleError;

// @module: SRT parsing and generation

// @const: SRT timing line regex
static TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}:\d{2}:\d{2},\d{3}) --> (\d{2}:\d{2}:\d{2},\d{3})").unwrap()
});

// @const: Block separator (one or more blank lines)
static BLOCK_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Single subtitle entry.
///
/// Timestamps are kept verbatim in `HH:MM:SS,mmm` form. The codec never
/// validates that start <= end; ids are unique in practice but not required
/// to be contiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEntry {
    /// Sequence number as it appeared in the source
    pub id: u32,

    /// Start timestamp, `HH:MM:SS,mmm`
    pub start_time: String,

    /// End timestamp, `HH:MM:SS,mmm`
    pub end_time: String,

    /// Dialogue text, possibly multi-line
    pub text: String,
}

impl SubtitleEntry {
    /// Creates a new subtitle entry - used by tests and external consumers
    #[allow(dead_code)]
    pub fn new(id: u32, start_time: impl Into<String>, end_time: impl Into<String>, text: impl Into<String>) -> Self {
        SubtitleEntry {
            id,
            start_time: start_time.into(),
            end_time: end_time.into(),
            text: text.into(),
        }
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.id)?;
        writeln!(f, "{} --> {}", self.start_time, self.end_time)?;
        writeln!(f, "{}", self.text)
    }
}

/// Ordered collection of subtitle entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtitleDocument {
    /// Entries in source order
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleDocument {
    /// Parse raw SRT text into a document.
    ///
    /// Line endings are normalized, outer whitespace is trimmed, and the input
    /// is split into blocks separated by one or more blank lines. A block
    /// qualifies as an entry only if it has at least three lines: an integer
    /// id line, a timing line, and one or more text lines. Blocks failing the
    /// id or timing check are dropped without error; parsing itself never
    /// fails. An empty document is the caller's signal that the input held no
    /// usable subtitles.
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.replace("\r\n", "\n");
        let trimmed = normalized.trim();

        let mut entries = Vec::new();
        let mut dropped = 0usize;

        for block in BLOCK_SEPARATOR.split(trimmed) {
            let lines: Vec<&str> = block.split('\n').collect();
            if lines.len() < 3 {
                if !block.trim().is_empty() {
                    dropped += 1;
                }
                continue;
            }

            let id = match lines[0].trim().parse::<u32>() {
                Ok(id) => id,
                Err(_) => {
                    dropped += 1;
                    continue;
                }
            };

            let Some(caps) = TIMING_REGEX.captures(lines[1].trim()) else {
                dropped += 1;
                continue;
            };

            let text = lines[2..].join("\n").trim().to_string();

            entries.push(SubtitleEntry {
                id,
                start_time: caps[1].to_string(),
                end_time: caps[2].to_string(),
                text,
            });
        }

        if dropped > 0 {
            debug!("Dropped {} malformed subtitle block(s) while parsing", dropped);
        }

        SubtitleDocument { entries }
    }

    /// Read and parse an SRT file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read subtitle file: {:?}", path.as_ref()))?;
        Ok(Self::parse(&content))
    }

    /// Serialize the document back to SRT text.
    ///
    /// Exact left inverse of [`SubtitleDocument::parse`] for any document that
    /// parse produced: each entry is emitted as its id line, timing line and
    /// text lines followed by a blank separator line. Entries are assumed
    /// well-formed and are not validated here.
    pub fn to_srt_string(&self) -> String {
        let mut output = String::new();
        for entry in &self.entries {
            output.push_str(&entry.to_string());
            output.push('\n');
        }
        output
    }

    /// Write the document to an SRT file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(path, self.to_srt_string())
            .with_context(|| format!("Failed to write subtitle file: {}", path.display()))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the document holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The dialogue texts, in entry order
    pub fn texts(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.text.clone()).collect()
    }

    /// Rebuild the document with the same ids and timings but new texts.
    ///
    /// The replacement texts must align positionally with the entries.
    pub fn with_texts(&self, texts: &[String]) -> Result<Self, SubtitleError> {
        if texts.len() != self.entries.len() {
            return Err(SubtitleError::LengthMismatch {
                entries: self.entries.len(),
                translations: texts.len(),
            });
        }

        let entries = self
            .entries
            .iter()
            .zip(texts)
            .map(|(entry, text)| SubtitleEntry {
                id: entry.id,
                start_time: entry.start_time.clone(),
                end_time: entry.end_time.clone(),
                text: text.clone(),
            })
            .collect();

        Ok(SubtitleDocument { entries })
    }
}
