//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! All diagnostics of the encoder are emitted through `tracing`; this module
//! decides where they go and how they look.
//!
//! # Log Levels
//!
//! - `error`: fatal failures
//! - `warn`: empty inputs, all-zero patterns, values unknown in the second pass
//! - `info`: pass progress and summary counts
//! - `debug`: collected domains
//! - `trace`: every extracted pattern
//!
//! # Usage
//!
//! ```ignore
//! use binpat_cli::logging::{init_logging, LogConfig};
//! use tracing::level_filters::LevelFilter;
//!
//! let config = LogConfig::default().with_level(LevelFilter::INFO);
//! init_logging(&config).expect("init logging");
//! ```

use std::fs::{File, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level applied to this workspace's crates.
    pub level_filter: LevelFilter,
    /// Whether `RUST_LOG` may override the configured level.
    pub use_env_filter: bool,
    /// Whether to use ANSI colors in output.
    pub with_ansi: bool,
    /// Output format.
    pub format: LogFormat,
    /// Optional log file path. When set, logs are appended to the file.
    pub log_file: Option<PathBuf>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-field format.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON lines, with an event when each pass span closes.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn with_level(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self
    }

    /// Let `RUST_LOG` override the level (on by default).
    #[must_use]
    pub fn with_env_filter(mut self, enable: bool) -> Self {
        self.use_env_filter = enable;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Append logs to `path` instead of stderr.
    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }
}

/// Install the global subscriber described by `config`.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let layer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            // log files never carry color codes
            let config = config.clone().with_ansi(false);
            format_layer(&config, Arc::<File>::new(file))
        }
        None => format_layer(config, io::stderr),
    };
    tracing_subscriber::registry()
        .with(layer.with_filter(build_env_filter(
            config.level_filter,
            config.use_env_filter,
        )))
        .init();
    Ok(())
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Formatting layer for the configured format, writing to `writer`.
fn format_layer<W>(config: &LogConfig, writer: W) -> BoxedLayer
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(config.with_ansi)
        .with_target(false)
        .without_time();
    match config.format {
        LogFormat::Pretty => layer.boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Json => layer
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .boxed(),
    }
}

/// Directive string applying `level` to this workspace's crates.
fn default_directives(level_filter: LevelFilter) -> String {
    let level = level_filter.to_string().to_lowercase();
    format!("warn,binpat_cli={level},binpat_core={level},genbinpats={level}")
}

/// Build an `EnvFilter`, letting `RUST_LOG` win when `use_env` is set.
fn build_env_filter(level_filter: LevelFilter, use_env: bool) -> EnvFilter {
    let fallback = || EnvFilter::new(default_directives(level_filter));
    if use_env {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
    } else {
        fallback()
    }
}
