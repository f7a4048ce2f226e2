//! Dashboard controller
//!
//! Ties the selected range, the fetch workers and the state container together.
//! Range changes and refresh triggers start a new generation; resolutions are
//! applied on the caller's task, so [`DashboardData`] only ever has one writer.

pub mod range;
pub mod state;
pub mod view_model;

pub use range::RangeState;
pub use state::{Applied, DashboardData, Phase, Resolution, SliceStatus};
pub use view_model::{Marker, ViewModel};

use crate::backend::{Backend, DateRange};
use crate::consts::cli_consts::RESOLUTION_QUEUE_SIZE;
use crate::events::{Event, EventType};
use crate::logging::LogLevel;
use crate::workers::{EventSender, FetchCoordinator};
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct DashboardController {
    range: RangeState,
    data: DashboardData,
    fetcher: FetchCoordinator,
    resolutions: mpsc::Receiver<Resolution>,
    event_sender: EventSender,
}

impl DashboardController {
    pub fn new(backend: Arc<dyn Backend>, event_sender: EventSender, range: DateRange) -> Self {
        let (resolution_sender, resolutions) = mpsc::channel(RESOLUTION_QUEUE_SIZE);
        Self {
            range: RangeState::new(range),
            data: DashboardData::new(),
            fetcher: FetchCoordinator::new(backend, resolution_sender, event_sender.clone()),
            resolutions,
            event_sender,
        }
    }

    pub fn range(&self) -> DateRange {
        self.range.current()
    }

    pub fn data(&self) -> &DashboardData {
        &self.data
    }

    pub fn view_model(&self) -> ViewModel<'_> {
        ViewModel::from_data(&self.data)
    }

    /// Returns the new generation if the start bound changed.
    pub fn set_start(&mut self, start: Option<NaiveDate>) -> Option<u64> {
        self.range.set_start(start).then(|| self.refresh())
    }

    /// Returns the new generation if the end bound changed.
    pub fn set_end(&mut self, end: Option<NaiveDate>) -> Option<u64> {
        self.range.set_end(end).then(|| self.refresh())
    }

    /// Replace both bounds with a single refresh.
    pub fn set_range(&mut self, range: DateRange) -> Option<u64> {
        self.range.set(range).then(|| self.refresh())
    }

    /// Enter Loading and issue all three fetches for the current range.
    pub fn refresh(&mut self) -> u64 {
        let generation = self.data.begin_refresh();
        let range = self.range.current();
        log::info!("Refreshing dashboard for {} (generation {})", range, generation);
        self.event_sender.try_send_event(Event::controller(
            format!("Refreshing {}", range),
            EventType::Refresh,
            LogLevel::Info,
        ));
        // Handles are dropped on purpose; tasks report through the resolution channel.
        drop(self.fetcher.dispatch(generation, range));
        generation
    }

    /// Apply every resolution that has already arrived. Returns whether any was accepted.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(resolution) = self.resolutions.try_recv() {
            changed |= self.handle(resolution) == Applied::Accepted;
        }
        changed
    }

    /// Wait for the next resolution and apply it.
    pub async fn next_resolution(&mut self) -> Option<Applied> {
        let resolution = self.resolutions.recv().await?;
        Some(self.handle(resolution))
    }

    /// Wait until every slice of the current generation has resolved.
    pub async fn settle(&mut self) {
        while !self.data.is_settled() {
            if self.next_resolution().await.is_none() {
                break;
            }
        }
    }

    fn handle(&mut self, resolution: Resolution) -> Applied {
        let generation = resolution.generation;
        let applied = self.data.apply(resolution);
        if applied == Applied::Stale {
            let msg = format!(
                "Discarded response from generation {} (current {})",
                generation,
                self.data.generation()
            );
            log::debug!("{}", msg);
            self.event_sender
                .try_send_event(Event::controller(msg, EventType::Stale, LogLevel::Debug));
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::error::BackendError;
    use crate::backend::{ChangePointIndex, SeriesPoint, SummaryStats};
    use crate::reconciler::state::tests::{point, stats};
    use chrono::Datelike;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;
    use tokio::time::{sleep, timeout};

    /// Backend whose latency depends on the requested range, so arrival order can be scripted.
    struct ScriptedBackend {
        slow_year: i32,
        series_delay_ms: u64,
        fail_stats: AtomicBool,
    }

    impl ScriptedBackend {
        fn new(slow_year: i32, series_delay_ms: u64) -> Self {
            Self {
                slow_year,
                series_delay_ms,
                fail_stats: AtomicBool::new(false),
            }
        }
    }

    #[async_trait::async_trait]
    impl Backend for ScriptedBackend {
        async fn fetch_series(&self, range: &DateRange) -> Result<Vec<SeriesPoint>, BackendError> {
            let first = range
                .start
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "2020-01-01".to_string());
            let delay = match range.start {
                Some(start) if start.year() == self.slow_year => 200,
                _ => self.series_delay_ms,
            };
            sleep(Duration::from_millis(delay)).await;
            Ok(vec![point(&first, 50.0, 0.01), point("2030-01-01", 51.0, 0.02)])
        }

        async fn fetch_change_point(&self) -> Result<ChangePointIndex, BackendError> {
            Ok(Some(1))
        }

        async fn fetch_summary_stats(&self) -> Result<SummaryStats, BackendError> {
            if self.fail_stats.load(Ordering::SeqCst) {
                return Err(BackendError::Http {
                    status: 503,
                    message: "unavailable".to_string(),
                });
            }
            Ok(stats())
        }
    }

    fn controller(backend: Arc<dyn Backend>) -> (DashboardController, mpsc::Receiver<Event>) {
        let (event_tx, event_rx) = mpsc::channel(64);
        let controller =
            DashboardController::new(backend, EventSender::new(event_tx), DateRange::default());
        (controller, event_rx)
    }

    fn date(year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, 1, 1)
    }

    #[tokio::test]
    /// Setting an unchanged bound does not start a new cycle.
    async fn test_unchanged_bound_does_not_refresh() {
        let (mut controller, _events) = controller(Arc::new(ScriptedBackend::new(0, 0)));
        assert_eq!(controller.set_start(None), None);
        assert_eq!(controller.set_start(date(2020)), Some(1));
        assert_eq!(controller.set_start(date(2020)), None);
        assert_eq!(controller.set_end(date(2021)), Some(2));
        assert_eq!(
            controller.set_range(DateRange::new(date(2020), date(2021))),
            None
        );
        assert_eq!(controller.set_range(DateRange::default()), Some(3));
    }

    #[tokio::test]
    /// Loading flips on immediately and off with the series, whatever the other two do.
    async fn test_loading_follows_series() {
        let (mut controller, _events) = controller(Arc::new(ScriptedBackend::new(0, 100)));
        controller.refresh();
        assert!(controller.view_model().loading);

        // Change point and stats are immediate; the series takes 100ms.
        controller.next_resolution().await;
        controller.next_resolution().await;
        assert!(controller.view_model().loading);
        assert!(controller.view_model().stats.is_some());

        controller.next_resolution().await;
        let view = controller.view_model();
        assert!(!view.loading);
        assert_eq!(view.marker.map(|m| m.index), Some(1));
    }

    #[tokio::test]
    /// A superseded request that finishes last must not replace the newer series.
    async fn test_late_response_from_superseded_range_is_discarded() {
        let (mut controller, mut events) = controller(Arc::new(ScriptedBackend::new(2019, 10)));
        controller.set_start(date(2019));
        controller.set_start(date(2021));

        let mut outcomes = Vec::new();
        for _ in 0..6 {
            let applied = timeout(Duration::from_secs(5), controller.next_resolution())
                .await
                .expect("resolution should arrive")
                .expect("channel open");
            outcomes.push(applied);
        }

        assert_eq!(
            outcomes.iter().filter(|a| **a == Applied::Stale).count(),
            3
        );
        let view = controller.view_model();
        assert_eq!(view.series[0].date, date(2021).unwrap());
        assert!(!view.loading);

        let mut saw_stale = false;
        while let Ok(event) = events.try_recv() {
            saw_stale |= event.event_type == EventType::Stale;
        }
        assert!(saw_stale);
    }

    #[tokio::test]
    /// Stats failing on a later cycle keeps the earlier stats, series and marker.
    async fn test_failure_keeps_previous_slices() {
        let backend = Arc::new(ScriptedBackend::new(0, 0));
        let (mut controller, _events) = controller(backend.clone());

        controller.refresh();
        controller.settle().await;
        assert_eq!(controller.data().stats_status(), SliceStatus::Fresh);

        backend.fail_stats.store(true, Ordering::SeqCst);
        controller.refresh();
        controller.settle().await;

        let data = controller.data();
        assert_eq!(data.stats_status(), SliceStatus::Failed);
        assert_eq!(data.stats(), Some(&stats()));
        assert_eq!(data.series().len(), 2);
        assert_eq!(controller.view_model().marker.map(|m| m.index), Some(1));
    }

    #[tokio::test]
    /// poll() applies what has already arrived without blocking.
    async fn test_poll_is_non_blocking() {
        let (mut controller, _events) = controller(Arc::new(ScriptedBackend::new(0, 0)));
        assert!(!controller.poll());

        controller.refresh();
        sleep(Duration::from_millis(100)).await;
        assert!(controller.poll());
        assert!(controller.data().is_settled());
        assert_eq!(controller.data().phase(), Phase::Ready);
    }
}
