//! Structured logging bootstrap for applications embedding lingo.
//!
//! The library crates only emit `tracing` events; installing a subscriber is
//! left to the host binary, which can use [`init_logging`] for a ready-made one.

use std::fs::OpenOptions;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Boxed error returned by the logging initializers.
pub type LoggingError = Box<dyn std::error::Error + Send + Sync>;

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "lingo_i18n=debug")
    pub level: String,
    /// Whether to emit compact machine-friendly lines
    pub compact_format: bool,
    /// Whether to enable pretty formatting with colors
    pub pretty_format: bool,
    /// Optional file path for log output
    pub file_path: Option<String>,
    /// Whether to include span open/close events
    pub include_spans: bool,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            compact_format: false,
            pretty_format: true,
            file_path: None,
            include_spans: false,
            include_targets: true,
        }
    }
}

impl LoggingConfig {
    fn span_events(&self) -> FmtSpan {
        if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    /// Builds the level filter, falling back to `info` when `level` does not parse.
    pub fn env_filter(&self) -> Result<EnvFilter, LoggingError> {
        let filter = EnvFilter::try_new(&self.level).or_else(|_| EnvFilter::try_new("info"))?;
        Ok(filter)
    }
}

/// Initialize the global tracing subscriber with the given configuration
pub fn init_logging(config: LoggingConfig) -> Result<(), LoggingError> {
    let registry = tracing_subscriber::registry().with(config.env_filter()?);
    let span_events = config.span_events();

    if config.compact_format {
        let layer = fmt::layer()
            .with_span_events(span_events)
            .with_target(config.include_targets)
            .compact();

        if let Some(file_path) = &config.file_path {
            let file = OpenOptions::new().create(true).append(true).open(file_path)?;
            registry.with(layer.with_ansi(false).with_writer(file)).try_init()?;
        } else {
            registry.with(layer).try_init()?;
        }
    } else if config.pretty_format {
        let layer = fmt::layer()
            .pretty()
            .with_span_events(span_events)
            .with_target(config.include_targets);

        if let Some(file_path) = &config.file_path {
            let file = OpenOptions::new().create(true).append(true).open(file_path)?;
            registry.with(layer.with_ansi(false).with_writer(file)).try_init()?;
        } else {
            registry.with(layer).try_init()?;
        }
    } else {
        let layer = fmt::layer()
            .with_span_events(span_events)
            .with_target(config.include_targets);

        if let Some(file_path) = &config.file_path {
            let file = OpenOptions::new().create(true).append(true).open(file_path)?;
            registry.with(layer.with_ansi(false).with_writer(file)).try_init()?;
        } else {
            registry.with(layer).try_init()?;
        }
    }

    tracing::debug!("Logging initialized at level {}", config.level);
    Ok(())
}

/// Initialize logging with default configuration
pub fn init_default_logging() -> Result<(), LoggingError> {
    init_logging(LoggingConfig::default())
}

/// Initialize logging for development (pretty, debug level)
pub fn init_dev_logging() -> Result<(), LoggingError> {
    init_logging(LoggingConfig {
        level: "debug".to_string(),
        pretty_format: true,
        compact_format: false,
        include_spans: true,
        ..LoggingConfig::default()
    })
}
