//! Dashboard state container
//!
//! Holds the three fetched slices plus the loading phase. Fetch results come
//! back as [`Resolution`]s tagged with the generation that issued them;
//! [`DashboardData::apply`] is the only way a slice changes.

use crate::backend::{ChangePointIndex, SeriesPoint, SummaryStats};
use serde::Serialize;

/// Refresh cycle phase.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, strum::Display)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
}

/// Freshness of one slice relative to the current generation.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, strum::Display)]
pub enum SliceStatus {
    /// Never fetched.
    #[default]
    Empty,
    /// Request in flight for the current generation.
    Pending,
    /// Holds the current generation's value.
    Fresh,
    /// Current generation's request failed; the previous value is kept.
    Failed,
}

impl SliceStatus {
    pub fn is_settled(&self) -> bool {
        !matches!(self, SliceStatus::Pending)
    }
}

/// Result of one fetch, already logged at the fetch boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Updated(T),
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Series(Fetched<Vec<SeriesPoint>>),
    ChangePoint(Fetched<ChangePointIndex>),
    Stats(Fetched<SummaryStats>),
}

/// A fetch outcome tagged with the generation that requested it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub generation: u64,
    pub outcome: Outcome,
}

impl Resolution {
    pub fn new(generation: u64, outcome: Outcome) -> Self {
        Self {
            generation,
            outcome,
        }
    }
}

/// What [`DashboardData::apply`] did with a resolution.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Applied {
    Accepted,
    /// From a superseded generation; state left untouched.
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    generation: u64,
    phase: Phase,
    series: Vec<SeriesPoint>,
    change_point: ChangePointIndex,
    stats: Option<SummaryStats>,
    series_status: SliceStatus,
    change_point_status: SliceStatus,
    stats_status: SliceStatus,
}

impl DashboardData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter Loading for a new generation and return its number.
    ///
    /// Previous values stay in place until their replacements arrive.
    pub fn begin_refresh(&mut self) -> u64 {
        self.generation += 1;
        self.phase = Phase::Loading;
        self.series_status = SliceStatus::Pending;
        self.change_point_status = SliceStatus::Pending;
        self.stats_status = SliceStatus::Pending;
        self.generation
    }

    pub fn apply(&mut self, resolution: Resolution) -> Applied {
        if resolution.generation != self.generation {
            return Applied::Stale;
        }

        match resolution.outcome {
            Outcome::Series(fetched) => {
                self.series_status = match fetched {
                    Fetched::Updated(series) => {
                        self.series = series;
                        SliceStatus::Fresh
                    }
                    Fetched::Failed => SliceStatus::Failed,
                };
                // Only the series gates the loading indicator.
                self.phase = Phase::Ready;
            }
            Outcome::ChangePoint(fetched) => {
                self.change_point_status = match fetched {
                    Fetched::Updated(index) => {
                        self.change_point = index;
                        SliceStatus::Fresh
                    }
                    Fetched::Failed => SliceStatus::Failed,
                };
            }
            Outcome::Stats(fetched) => {
                self.stats_status = match fetched {
                    Fetched::Updated(stats) => {
                        self.stats = Some(stats);
                        SliceStatus::Fresh
                    }
                    Fetched::Failed => SliceStatus::Failed,
                };
            }
        }
        Applied::Accepted
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// All three slices of the current generation have resolved.
    pub fn is_settled(&self) -> bool {
        self.series_status.is_settled()
            && self.change_point_status.is_settled()
            && self.stats_status.is_settled()
    }

    pub fn series(&self) -> &[SeriesPoint] {
        &self.series
    }

    pub fn change_point(&self) -> ChangePointIndex {
        self.change_point
    }

    pub fn stats(&self) -> Option<&SummaryStats> {
        self.stats.as_ref()
    }

    pub fn series_status(&self) -> SliceStatus {
        self.series_status
    }

    pub fn change_point_status(&self) -> SliceStatus {
        self.change_point_status
    }

    pub fn stats_status(&self) -> SliceStatus {
        self.stats_status
    }
}
