//! Activity log threshold taken from `RUST_LOG`
//!
//! Only the default directive matters here: `regime_dash=debug,reqwest=warn`
//! and `debug,reqwest=warn` both lower the activity log to debug. Module
//! filters are not applied to the dashboard's own events.

pub use crate::error_classifier::LogLevel;
use log::LevelFilter;
use std::str::FromStr;

const RUST_LOG: &str = "RUST_LOG";

/// Current activity log threshold. Unset or unreadable values mean `Info`.
pub fn display_threshold() -> LogLevel {
    std::env::var(RUST_LOG)
        .map(|value| threshold_from_directives(&value))
        .unwrap_or(LogLevel::Info)
}

/// First directive's level, with `module=` prefixes ignored.
pub fn threshold_from_directives(directives: &str) -> LogLevel {
    directives
        .split(',')
        .next()
        .and_then(|first| first.rsplit('=').next())
        .map(|level| match level.trim() {
            "warning" => "warn",
            other => other,
        })
        .and_then(|level| LevelFilter::from_str(level).ok())
        .map(LogLevel::from_filter)
        .unwrap_or(LogLevel::Info)
}

impl LogLevel {
    /// `off` still lets errors through: a failed fetch is never hidden.
    pub fn from_filter(filter: LevelFilter) -> Self {
        match filter {
            LevelFilter::Trace => LogLevel::Trace,
            LevelFilter::Debug => LogLevel::Debug,
            LevelFilter::Info => LogLevel::Info,
            LevelFilter::Warn => LogLevel::Warn,
            LevelFilter::Error | LevelFilter::Off => LogLevel::Error,
        }
    }
}
