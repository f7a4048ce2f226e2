//! Selected date range

use crate::backend::DateRange;
use chrono::NaiveDate;

/// Holds the user's current start/end selection.
///
/// Setters report whether the value actually changed; the controller only
/// refreshes on a change.
#[derive(Debug, Clone, Default)]
pub struct RangeState {
    current: DateRange,
}

impl RangeState {
    pub fn new(initial: DateRange) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> DateRange {
        self.current
    }

    pub fn set_start(&mut self, start: Option<NaiveDate>) -> bool {
        let changed = self.current.start != start;
        self.current.start = start;
        changed
    }

    pub fn set_end(&mut self, end: Option<NaiveDate>) -> bool {
        let changed = self.current.end != end;
        self.current.end = end;
        changed
    }

    pub fn set(&mut self, range: DateRange) -> bool {
        let changed = self.current != range;
        self.current = range;
        changed
    }
}
