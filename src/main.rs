// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::app_controller::Controller;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod language_utils;
mod media;
mod providers;
mod srt;
mod transcribe;
mod translation;

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a video or SRT file into an English subtitle file (default command)
    Translate(TranslateArgs),

    /// List the audio and subtitle streams in a video file
    Probe {
        /// Video file to probe
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,
    },

    /// Generate shell completions for subglot
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input video or .srt file to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Stream index to process (skips automatic track selection)
    #[arg(long)]
    track: Option<usize>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Source language code (e.g. 'ja')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g. 'en')
    #[arg(short, long)]
    target_language: Option<String>,

    /// API key for the translation provider
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subglot - Japanese-to-English subtitle translation
///
/// Takes a video container or an .srt file, extracts the relevant subtitle or
/// audio track, translates the dialogue with an AI provider, and writes a
/// translated SRT file next to the input.
#[derive(Parser, Debug)]
#[command(name = "subglot")]
#[command(version = "0.1.0")]
#[command(about = "AI-powered Japanese-to-English subtitle translation")]
#[command(long_about = "subglot translates video dialogue into an English SRT subtitle file.

EXAMPLES:
    subglot movie.mkv                    # Probe, pick the Japanese track, translate
    subglot episode.srt                  # Translate an existing subtitle file
    subglot --track 2 movie.mkv          # Use stream 0:2 explicitly
    subglot probe movie.mkv              # List audio/subtitle streams
    subglot completions bash             # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the config file does
    not exist, a default one is created automatically. The API key can also be
    supplied via the GEMINI_API_KEY environment variable.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input video or .srt file to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Stream index to process (skips automatic track selection)
    #[arg(long)]
    track: Option<usize>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Source language code (e.g. 'ja')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g. 'en')
    #[arg(short, long)]
    target_language: Option<String>,

    /// API key for the translation provider
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default; the level is
    // updated after the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subglot", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Probe { input_path }) => run_probe(&input_path).await,
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            let translate_args = TranslateArgs {
                input_path,
                force_overwrite: cli.force_overwrite,
                track: cli.track,
                model: cli.model,
                source_language: cli.source_language,
                target_language: cli.target_language,
                api_key: cli.api_key,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_translate(translate_args).await
        }
    }
}

/// List the streams of a media container on stdout
async fn run_probe(input_path: &Path) -> Result<()> {
    let tracks = media::probe_tracks(input_path).await?;

    if tracks.is_empty() {
        println!("No audio or subtitle streams found.");
        return Ok(());
    }

    for track in tracks {
        let kind = match track.kind {
            media::TrackKind::Audio => "audio",
            media::TrackKind::Subtitle => "subtitle",
        };
        let mut details = vec![format!("codec={}", track.codec_name)];
        if let Some(language) = &track.language {
            details.push(format!("language={}", language));
        }
        if let Some(channels) = &track.channels {
            details.push(format!("channels={}", channels));
        }
        if let Some(title) = &track.title {
            details.push(format!("title={:?}", title));
        }
        println!("0:{}  {:<8} {}", track.index, kind, details.join(" "));
    }

    Ok(())
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // If the log level is set via the command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config
            .save(config_path)
            .context("Failed to write default config file")?;
        config
    };

    // Override config with CLI options if provided
    if let Some(model) = &options.model {
        config.translation.model = model.clone();
    }
    if let Some(api_key) = &options.api_key {
        config.translation.api_key = api_key.clone();
    }
    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }
    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If the log level was not set via the command line, take it from the config
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let output_dir = options
        .input_path
        .parent()
        .unwrap_or(Path::new("."))
        .to_path_buf();

    let controller = Controller::with_config(config)?;
    controller
        .run(options.input_path, output_dir, options.force_overwrite, options.track)
        .await
}
