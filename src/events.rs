//! Event System
//!
//! Types and implementations for fetch events and logging

use crate::logging::{LogLevel, display_threshold};
use chrono::Local;
use std::fmt::Display;

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum Origin {
    /// Fetches the price and log-return series for the selected range.
    #[strum(to_string = "series")]
    SeriesFetcher,
    /// Fetches the change-point index.
    #[strum(to_string = "change point")]
    ChangePointFetcher,
    /// Fetches the before/after summary statistics.
    #[strum(to_string = "stats")]
    StatsFetcher,
    /// Range changes, refresh triggers and discarded responses.
    #[strum(to_string = "dashboard")]
    Controller,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    /// A response that arrived after its generation was superseded.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub origin: Origin,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    pub fn new(origin: Origin, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            origin,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
        }
    }

    pub fn controller(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Origin::Controller, msg, event_type, log_level)
    }

    /// Successes and anything at `Info` or above always show. Quieter events
    /// follow `RUST_LOG`.
    pub fn should_display(&self) -> bool {
        self.should_display_at(display_threshold())
    }

    pub fn should_display_at(&self, threshold: LogLevel) -> bool {
        self.event_type == EventType::Success
            || self.log_level >= LogLevel::Info
            || self.log_level >= threshold
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.event_type, self.timestamp, self.origin, self.msg
        )
    }
}
