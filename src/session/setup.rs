//! Session setup and initialization

use crate::backend::error::BackendError;
use crate::backend::{BackendClient, DateRange};
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::environment::Environment;
use crate::events::Event;
use crate::reconciler::DashboardController;
use crate::workers::EventSender;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Session data shared by the TUI, headless and snapshot modes
pub struct SessionData {
    /// Owns the range, the fetch coordinator and the reconciled state
    pub controller: DashboardController,
    /// Events from the fetch tasks and the controller
    pub event_receiver: mpsc::Receiver<Event>,
    pub environment: Environment,
    /// Per-request timeout the backend client was built with
    pub request_timeout: Duration,
}

/// Builds the backend client and the dashboard controller.
///
/// Nothing is fetched yet; each mode issues its first refresh itself.
pub fn setup_session(
    environment: Environment,
    range: DateRange,
    request_timeout: Duration,
) -> Result<SessionData, BackendError> {
    let client = BackendClient::with_timeout(environment.clone(), request_timeout)?;
    let (event_sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let controller =
        DashboardController::new(Arc::new(client), EventSender::new(event_sender), range);

    log::debug!(
        "Session ready: backend {}, range {}, timeout {:?}",
        environment.backend_url(),
        range,
        request_timeout
    );

    Ok(SessionData {
        controller,
        event_receiver,
        environment,
        request_timeout,
    })
}
