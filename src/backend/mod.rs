use crate::backend::error::BackendError;

pub(crate) mod client;
pub use client::BackendClient;
pub mod error;
pub mod types;

pub use types::{ChangePointIndex, DateRange, Moments, SeriesPoint, SummaryStats};

#[cfg(test)]
use mockall::automock;

/// The three read-only endpoints of the analysis backend.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Price and log-return series restricted to `range`.
    async fn fetch_series(&self, range: &DateRange) -> Result<Vec<SeriesPoint>, BackendError>;

    /// Detected change point over the backend's own dataset.
    ///
    /// Not scoped to the selected range, so it may describe a different window
    /// than the series currently on screen.
    async fn fetch_change_point(&self) -> Result<ChangePointIndex, BackendError>;

    /// Moments of the returns before and after the change point.
    async fn fetch_summary_stats(&self) -> Result<SummaryStats, BackendError>;
}
