//! Tracing setup for roomfinder
//!
//! Logs always go to stderr, so `--json` output on stdout stays parseable.
//! The filter defaults to the `roomfinder` target prefix, which covers every
//! crate of the workspace and keeps HTTP client internals quiet until
//! `RUST_LOG` asks for them.
//!
//! ```ignore
//! use roomfinder_core::tracing::{init_tracing, TracingConfig};
//!
//! init_tracing(TracingConfig::for_verbosity(2))?;
//! ```

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

#[derive(Debug, Error)]
pub enum TracingError {
    #[error("failed to install tracing subscriber: {0}")]
    Install(#[from] TryInitError),

    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
}

/// How log lines are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One short human-readable line per event.
    #[default]
    Compact,
    /// One JSON object per line, with timestamps.
    Json,
}

/// Logging options for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Level of the default `roomfinder=<level>` directive.
    pub level: Level,
    pub format: LogFormat,
    /// Print the source file and line of each event.
    pub show_location: bool,
    /// Print the module path of each event.
    pub show_target: bool,
    /// Explicit filter directive; wins over `RUST_LOG` and `level`.
    pub directive: Option<String>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::for_verbosity(0)
    }
}

impl TracingConfig {
    /// Config for `-v` repeated `count` times.
    ///
    /// From `-vv` on, log lines carry their target and source location.
    #[must_use]
    pub fn for_verbosity(count: u8) -> Self {
        let detailed = count >= 2;
        Self {
            level: level_for_verbosity(count),
            format: LogFormat::Compact,
            show_location: detailed,
            show_target: detailed,
            directive: None,
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directive = Some(directive.into());
        self
    }

    fn env_filter(&self) -> Result<EnvFilter, TracingError> {
        match self.directive {
            Some(ref directive) => Ok(EnvFilter::try_new(directive)?),
            None => Ok(EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directive(self.level)))),
        }
    }
}

/// Maps a `-v` repetition count to a level: none is WARN, then INFO, DEBUG
/// and TRACE.
pub fn level_for_verbosity(count: u8) -> Level {
    match count {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Filter directive used when neither `directive` nor `RUST_LOG` is set.
pub fn default_directive(level: Level) -> String {
    format!("roomfinder={}", level)
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Fails if a subscriber is already installed or the directive does not
/// parse.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let filter = config.env_filter()?;

    let layer = match config.format {
        LogFormat::Compact => fmt::layer()
            .compact()
            .without_time()
            .with_target(config.show_target)
            .with_file(config.show_location)
            .with_line_number(config.show_location)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(config.show_target)
            .with_file(config.show_location)
            .with_line_number(config.show_location)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_by_default() {
        let config = TracingConfig::default();
        assert_eq!(config.level, Level::WARN);
        assert_eq!(config.format, LogFormat::Compact);
        assert!(!config.show_location);
        assert!(!config.show_target);
        assert!(config.directive.is_none());
    }

    #[test]
    fn verbose_runs_show_where_logs_come_from() {
        let info = TracingConfig::for_verbosity(1);
        assert_eq!(info.level, Level::INFO);
        assert!(!info.show_location);

        let debug = TracingConfig::for_verbosity(2);
        assert_eq!(debug.level, Level::DEBUG);
        assert!(debug.show_location);
        assert!(debug.show_target);
    }

    #[test]
    fn builders() {
        let config = TracingConfig::default()
            .with_level(Level::ERROR)
            .with_format(LogFormat::Json)
            .with_directive("roomfinder_providers=trace");

        assert_eq!(config.level, Level::ERROR);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.directive.as_deref(), Some("roomfinder_providers=trace"));
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for_verbosity(0), Level::WARN);
        assert_eq!(level_for_verbosity(1), Level::INFO);
        assert_eq!(level_for_verbosity(2), Level::DEBUG);
        assert_eq!(level_for_verbosity(9), Level::TRACE);
    }

    #[test]
    fn directive_names_the_workspace_prefix() {
        assert_eq!(default_directive(Level::DEBUG), "roomfinder=DEBUG");
    }
}
