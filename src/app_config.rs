use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            target_language: default_target_language(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to open config file: {:?}", path.as_ref()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write config to file: {:?}", path.as_ref()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.source_language.trim().is_empty() {
            return Err(anyhow!("Source language cannot be empty"));
        }
        if self.target_language.trim().is_empty() {
            return Err(anyhow!("Target language cannot be empty"));
        }
        self.translation.validate()
    }
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Gemini
    #[default]
    Gemini,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Gemini => "Gemini",
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gemini => write!(f, "gemini"),
        }
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    // @field: Provider type identifier
    #[serde(default)]
    pub provider: TranslationProvider,

    // @field: Model name
    #[serde(default = "default_model")]
    pub model: String,

    // @field: API key (falls back to the GEMINI_API_KEY environment variable)
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL override (empty means the public API)
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Texts per translation request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    // @field: Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            model: default_model(),
            api_key: String::new(),
            endpoint: String::new(),
            batch_size: default_batch_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TranslationConfig {
    /// Resolve the API key: the configured value, or the GEMINI_API_KEY
    /// environment variable when the config carries none
    pub fn api_key(&self) -> String {
        if !self.api_key.is_empty() {
            return self.api_key.clone();
        }
        std::env::var("GEMINI_API_KEY").unwrap_or_default()
    }

    /// Validate the translation configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(anyhow!("Model name cannot be empty"));
        }
        if self.batch_size == 0 {
            return Err(anyhow!("Batch size must be at least 1"));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("Request timeout must be at least 1 second"));
        }
        if !self.endpoint.is_empty() {
            Url::parse(&self.endpoint)
                .map_err(|e| anyhow!("Invalid endpoint URL '{}': {}", self.endpoint, e))?;
        }
        if self.api_key().is_empty() {
            return Err(anyhow!(
                "No API key configured: set translation.api_key in the config file or the GEMINI_API_KEY environment variable"
            ));
        }
        Ok(())
    }
}

/// Log level configuration
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Errors and warnings
    Warn,
    /// Normal output
    #[default]
    Info,
    /// Verbose output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert to a log crate level filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "ja".to_string()
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_model() -> String {
    "gemini-3-pro-preview".to_string()
}

fn default_batch_size() -> usize {
    crate::translation::DEFAULT_BATCH_SIZE
}

fn default_timeout_secs() -> u64 {
    120
}
