//! Logging configuration and initialization
//!
//! All catalog components log through `tracing`. This module owns the one
//! place where a global subscriber is installed, so binaries only have to
//! load a [`LogConfig`] and call [`init_logging`].
//!
//! Supported settings:
//!
//! - Output target: console, daily rolling file, or both
//! - Format: human-readable text or JSON
//! - Minimum level plus extra `EnvFilter` directives (e.g. `sqlx=warn`)
//!
//! Use structured fields rather than formatted strings:
//!
//! ```rust
//! use tracing::info;
//!
//! let slug = "image-resize";
//! info!(processor_slug = %slug, "Processor published");
//! ```
//!
//! # Example
//!
//! ```no_run
//! use procat_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = LogConfig::from_env()?;
//!     // Keep the guard alive so buffered file output is flushed on exit
//!     let _guard = init_logging(&config)?;
//!     tracing::info!("Application started");
//!     Ok(())
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, MakeWriter},
    layer::SubscriberExt,
    registry::Registry,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Prefix shared by every logging environment variable
const ENV_PREFIX: &str = "PROCAT_LOG_";

/// Log level for filtering messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(anyhow::anyhow!("Invalid log level: {}", s)),
        }
    }
}

/// Where log lines are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Console,
    File,
    Both,
}

impl LogOutput {
    fn writes_console(self) -> bool {
        matches!(self, LogOutput::Console | LogOutput::Both)
    }

    fn writes_file(self) -> bool {
        matches!(self, LogOutput::File | LogOutput::Both)
    }
}

impl std::str::FromStr for LogOutput {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" | "stdout" => Ok(LogOutput::Console),
            "file" => Ok(LogOutput::File),
            "both" | "all" => Ok(LogOutput::Both),
            _ => Err(anyhow::anyhow!("Invalid log output: {}", s)),
        }
    }
}

/// Line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: LogLevel,
    pub output: LogOutput,
    pub format: LogFormat,

    /// Directory for rolling log files (only used when output includes file)
    pub log_dir: PathBuf,

    /// File name prefix, e.g. "procat" -> "procat.2026-01-18"
    pub log_file_prefix: String,

    /// Extra filter directives such as "sqlx=warn,procat_catalog=debug"
    pub filter_directives: Option<String>,

    pub include_location: bool,
    pub include_targets: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            output: LogOutput::Console,
            format: LogFormat::Text,
            log_dir: PathBuf::from("./logs"),
            log_file_prefix: "procat".to_string(),
            filter_directives: None,
            include_location: false,
            include_targets: true,
        }
    }
}

impl LogConfig {
    /// Load configuration from `PROCAT_LOG_*` environment variables
    ///
    /// - `PROCAT_LOG_LEVEL`: trace, debug, info, warn, error
    /// - `PROCAT_LOG_OUTPUT`: console, file, both
    /// - `PROCAT_LOG_FORMAT`: text, json
    /// - `PROCAT_LOG_DIR`: directory for log files
    /// - `PROCAT_LOG_FILE_PREFIX`: prefix for log files
    /// - `PROCAT_LOG_FILTER`: additional filter directives
    /// - `PROCAT_LOG_INCLUDE_LOCATION`: true/false
    /// - `PROCAT_LOG_INCLUDE_TARGETS`: true/false
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(level) = env_var("LEVEL") {
            config.level = level.parse()?;
        }
        if let Some(output) = env_var("OUTPUT") {
            config.output = output.parse()?;
        }
        if let Some(format) = env_var("FORMAT") {
            config.format = format.parse()?;
        }
        if let Some(dir) = env_var("DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(prefix) = env_var("FILE_PREFIX") {
            config.log_file_prefix = prefix;
        }
        config.filter_directives = env_var("FILTER");
        if let Some(val) = env_var("INCLUDE_LOCATION") {
            config.include_location = val.parse().unwrap_or(false);
        }
        if let Some(val) = env_var("INCLUDE_TARGETS") {
            config.include_targets = val.parse().unwrap_or(true);
        }

        Ok(config)
    }

    /// Build the `EnvFilter` for this configuration
    pub fn env_filter(&self) -> Result<EnvFilter> {
        let mut filter =
            EnvFilter::from_default_env().add_directive(self.level.to_tracing_level().into());

        if let Some(ref directives) = self.filter_directives {
            for directive in directives.split(',').map(str::trim).filter(|d| !d.is_empty()) {
                filter = filter.add_directive(
                    directive
                        .parse()
                        .with_context(|| format!("Failed to parse filter directive '{}'", directive))?,
                );
            }
        }

        Ok(filter)
    }
}

fn env_var(suffix: &str) -> Option<String> {
    std::env::var(format!("{}{}", ENV_PREFIX, suffix)).ok()
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

fn fmt_layer<W>(config: &LogConfig, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(config.include_targets)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_span_events(FmtSpan::CLOSE);

    match config.format {
        LogFormat::Text => layer.boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

/// Install the global subscriber
///
/// Must be called once at startup. When file output is enabled the returned
/// guard flushes the background writer on drop and has to be held for the
/// lifetime of the program.
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let filter = config.env_filter()?;
    let mut layers: Vec<BoxedLayer> = Vec::new();
    let mut guard = None;

    if config.output.writes_console() {
        layers.push(fmt_layer(config, std::io::stdout, true));
    }

    if config.output.writes_file() {
        std::fs::create_dir_all(&config.log_dir).with_context(|| {
            format!("Failed to create log directory {}", config.log_dir.display())
        })?;
        let appender = tracing_appender::rolling::daily(&config.log_dir, &config.log_file_prefix);
        let (writer, file_guard) = tracing_appender::non_blocking(appender);
        layers.push(fmt_layer(config, writer, false));
        guard = Some(file_guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .context("Failed to install global tracing subscriber")?;

    Ok(guard)
}
