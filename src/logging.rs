//! Logging subscriber initialisation.

use std::io;

use thiserror::Error;
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingConfig};

/// Errors raised while initialising logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to initialise tracing subscriber.
    #[error("failed to initialise tracing subscriber: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Installs the global subscriber. Logs go to stderr so stdout stays clean
/// for price output.
///
/// # Errors
///
/// Returns [`LoggingError::TracingSubscriber`] if a global subscriber is
/// already installed.
pub fn init_subscriber(config: &LoggingConfig) -> Result<(), LoggingError> {
    match config.log_format {
        LogFormat::Compact => init_with_layer(
            config,
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_writer(io::stderr),
        ),
        LogFormat::Json => init_with_layer(
            config,
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(true)
                .with_writer(io::stderr),
        ),
    }
}

fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_new(&config.log_level).unwrap_or_else(|err| {
        report_invalid_filter(&config.log_level, &err);

        EnvFilter::new("warn")
    })
}

#[expect(
    clippy::print_stderr,
    reason = "logging is not initialised yet, so report the bad filter directly"
)]
fn report_invalid_filter(level: &str, err: &tracing_subscriber::filter::ParseError) {
    eprintln!("invalid log level {level:?} ({err}); using \"warn\"");
}

fn init_with_layer<L>(config: &LoggingConfig, fmt_layer: L) -> Result<(), LoggingError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(build_env_filter(config))
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(level: &str) -> LoggingConfig {
        LoggingConfig {
            log_level: level.to_string(),
            log_format: LogFormat::Compact,
        }
    }

    #[test]
    fn builds_filter_from_level() {
        let filter = build_env_filter(&config("debug"));

        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn invalid_level_falls_back_to_warn() {
        let filter = build_env_filter(&config("sarraf=loud"));

        assert_eq!(filter.to_string(), "warn");
    }
}
