//! Concurrent fetching of the three dashboard slices

use crate::backend::error::BackendError;
use crate::backend::{Backend, ChangePointIndex, DateRange, SeriesPoint, SummaryStats};
use crate::error_classifier::ErrorClassifier;
use crate::events::{EventType, Origin};
use crate::logging::LogLevel;
use crate::reconciler::state::{Fetched, Outcome, Resolution};
use crate::workers::core::EventSender;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Issues the series, change-point and stats requests for one generation.
///
/// Every request runs in its own task and reports back through the resolution
/// channel as soon as it finishes; nothing waits on anything else. Failures
/// are logged here and reported as [`Fetched::Failed`].
#[derive(Clone)]
pub struct FetchCoordinator {
    backend: Arc<dyn Backend>,
    resolutions: mpsc::Sender<Resolution>,
    event_sender: EventSender,
    classifier: ErrorClassifier,
}

impl FetchCoordinator {
    pub fn new(
        backend: Arc<dyn Backend>,
        resolutions: mpsc::Sender<Resolution>,
        event_sender: EventSender,
    ) -> Self {
        Self {
            backend,
            resolutions,
            event_sender,
            classifier: ErrorClassifier::new(),
        }
    }

    /// Spawn all three fetches for `generation`. Must be called inside a tokio runtime.
    pub fn dispatch(&self, generation: u64, range: DateRange) -> Vec<JoinHandle<()>> {
        let series = {
            let this = self.clone();
            tokio::spawn(async move {
                let fetched = this
                    .settle(
                        Origin::SeriesFetcher,
                        this.backend.fetch_series(&range),
                        |series: &Vec<SeriesPoint>| {
                            format!("Loaded {} points for {}", series.len(), range)
                        },
                    )
                    .await;
                this.resolve(generation, Outcome::Series(fetched)).await;
            })
        };

        let change_point = {
            let this = self.clone();
            tokio::spawn(async move {
                let fetched = this
                    .settle(
                        Origin::ChangePointFetcher,
                        this.backend.fetch_change_point(),
                        |index: &ChangePointIndex| match index {
                            Some(index) => format!("Change point at index {}", index),
                            None => "No change point reported".to_string(),
                        },
                    )
                    .await;
                this.resolve(generation, Outcome::ChangePoint(fetched)).await;
            })
        };

        let stats = {
            let this = self.clone();
            tokio::spawn(async move {
                let fetched = this
                    .settle(
                        Origin::StatsFetcher,
                        this.backend.fetch_summary_stats(),
                        |_: &SummaryStats| "Summary statistics updated".to_string(),
                    )
                    .await;
                this.resolve(generation, Outcome::Stats(fetched)).await;
            })
        };

        vec![series, change_point, stats]
    }

    async fn settle<T, F>(
        &self,
        origin: Origin,
        request: F,
        describe: impl FnOnce(&T) -> String,
    ) -> Fetched<T>
    where
        F: Future<Output = Result<T, BackendError>>,
    {
        match request.await {
            Ok(value) => {
                let msg = describe(&value);
                log::debug!("{}: {}", origin, msg);
                self.event_sender
                    .send_fetch_event(origin, msg, EventType::Success, LogLevel::Info)
                    .await;
                Fetched::Updated(value)
            }
            Err(e) => {
                let log_level = self.classifier.classify_fetch_error(&e);
                let msg = format!("Failed to fetch {}: {}", origin, e);
                log::log!(log::Level::from(log_level), "{}", msg);
                self.event_sender
                    .send_fetch_event(origin, msg, EventType::Error, log_level)
                    .await;
                Fetched::Failed
            }
        }
    }

    async fn resolve(&self, generation: u64, outcome: Outcome) {
        // The controller may already be gone during shutdown.
        let _ = self
            .resolutions
            .send(Resolution::new(generation, outcome))
            .await;
    }
}
