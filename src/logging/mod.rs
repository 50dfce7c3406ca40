//! Structured logging configuration for tatami

use std::str::FromStr;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Logging configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter directive (`TATAMI_LOG`, e.g. "debug" or "tatami=trace")
    pub filter: String,
    /// Output format (`TATAMI_LOG_FORMAT`: pretty, compact, json)
    pub format: LogFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogFormat {
    Pretty,
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("invalid log format: {}", s)),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            filter: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        let defaults = LogConfig::default();
        LogConfig {
            filter: std::env::var("TATAMI_LOG").unwrap_or(defaults.filter),
            format: std::env::var("TATAMI_LOG_FORMAT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.format),
        }
    }
}

/// Install the global tracing subscriber. Errors if called twice, which
/// only tests do deliberately.
pub fn init_logging(config: &LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = match config.format {
        LogFormat::Pretty => fmt::layer().pretty().boxed(),
        LogFormat::Compact => fmt::layer().compact().boxed(),
        LogFormat::Json => fmt::layer().json().boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()?;

    Ok(())
}
