//! Tracing/logging initialization.
//!
//! Filtering comes from `RUST_LOG` (default `info`). Output is JSON unless
//! `STOCKROUTE_LOG_FORMAT=pretty`.

use std::str::FromStr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub const ENV_LOG_FORMAT: &str = "STOCKROUTE_LOG_FORMAT";

/// Log line format.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event, with timestamps.
    #[default]
    Json,
    /// Human-readable, multi-line.
    Pretty,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown log format '{0}' (expected 'json' or 'pretty')")]
pub struct LogFormatError(String);

impl FromStr for LogFormat {
    type Err = LogFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(LogFormatError(other.to_string())),
        }
    }
}

impl LogFormat {
    /// Format named by `STOCKROUTE_LOG_FORMAT`; JSON when unset.
    pub fn from_env() -> Result<Self, LogFormatError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, LogFormatError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(ENV_LOG_FORMAT) {
            Some(raw) => raw.parse(),
            None => Ok(LogFormat::default()),
        }
    }
}

/// Initialize tracing for the process with the format from the environment.
///
/// An unrecognized `STOCKROUTE_LOG_FORMAT` falls back to JSON and is reported
/// as a warning once the subscriber is installed.
pub fn init() {
    match LogFormat::from_env() {
        Ok(format) => init_with(format),
        Err(err) => {
            init_with(LogFormat::Json);
            tracing::warn!(error = %err, "STOCKROUTE_LOG_FORMAT ignored, using JSON logs");
        }
    }
}

/// Initialize tracing with an explicit format.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init_with(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stderr keeps stdout free for reports
    let _ = match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .pretty()
            .with_writer(std::io::stderr)
            .try_init(),
    };
    tracing::debug!(?format, "logging initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_formats() {
        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!(" Pretty ".parse::<LogFormat>(), Ok(LogFormat::Pretty));
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn unset_env_defaults_to_json() {
        assert_eq!(LogFormat::from_lookup(|_| None), Ok(LogFormat::Json));
        assert_eq!(LogFormat::from_lookup(|_| Some("pretty".into())), Ok(LogFormat::Pretty));
    }

    #[test]
    fn mistyped_env_value_is_reported() {
        let err = LogFormat::from_lookup(|_| Some("prety".into())).unwrap_err();
        assert_eq!(err, LogFormatError("prety".to_string()));
        assert!(err.to_string().contains("unknown log format 'prety'"));
    }

    #[test]
    fn init_twice_is_harmless() {
        init_with(LogFormat::Pretty);
        init_with(LogFormat::Json);
    }
}
