//! Dashboard state update logic
//!
//! Ticks, queued events, date entry and refresh triggers

use super::state::{DashboardState, RangeField, RangeInput};

use crate::backend::DateRange;
use crate::backend::types::{DATE_FORMAT, parse_date_input};
use crate::events::{Event, EventType};
use crate::logging::LogLevel;

/// Longest possible `YYYY-MM-DD` entry.
const MAX_INPUT_LEN: usize = 10;

impl DashboardState {
    /// Advance one UI tick: log queued events, apply arrived resolutions, auto-refresh.
    pub fn update(&mut self) {
        self.tick += 1;

        while let Some(event) = self.pending_events.pop_front() {
            self.add_to_activity_log(event);
        }

        self.controller.poll();

        if let Some(period) = self.refresh_every() {
            if self.last_refresh().elapsed() >= period {
                self.refresh();
            }
        }
    }

    /// Explicit refresh trigger.
    pub fn refresh(&mut self) {
        self.controller.refresh();
        self.mark_refreshed();
    }

    /// Drop both bounds.
    pub fn clear_range(&mut self) {
        if self.controller.set_range(DateRange::default()).is_some() {
            self.mark_refreshed();
        }
    }

    /// Start editing a bound, prefilled with its current value.
    pub fn begin_input(&mut self, field: RangeField) {
        let range = self.controller.range();
        let current = match field {
            RangeField::Start => range.start,
            RangeField::End => range.end,
        };
        *self.input_mut() = Some(RangeInput {
            field,
            buffer: current
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
        });
    }

    pub fn push_input_char(&mut self, c: char) {
        if let Some(input) = self.input_mut() {
            if (c.is_ascii_digit() || c == '-') && input.buffer.len() < MAX_INPUT_LEN {
                input.buffer.push(c);
            }
        }
    }

    pub fn pop_input_char(&mut self) {
        if let Some(input) = self.input_mut() {
            input.buffer.pop();
        }
    }

    pub fn cancel_input(&mut self) {
        *self.input_mut() = None;
    }

    /// Apply the typed date. An empty entry opens that side of the range.
    pub fn commit_input(&mut self) {
        let Some(input) = self.input_mut().take() else {
            return;
        };

        match parse_date_input(&input.buffer) {
            Ok(date) => {
                let refreshed = match input.field {
                    RangeField::Start => self.controller.set_start(date),
                    RangeField::End => self.controller.set_end(date),
                };
                if refreshed.is_some() {
                    self.mark_refreshed();
                }
            }
            Err(_) => {
                self.add_to_activity_log(Event::controller(
                    format!(
                        "Invalid {} date '{}': expected YYYY-MM-DD",
                        input.field, input.buffer
                    ),
                    EventType::Error,
                    LogLevel::Warn,
                ));
            }
        }
    }
}
