//! Core worker utilities

use crate::events::{Event, EventType, Origin};
use crate::logging::LogLevel;
use tokio::sync::mpsc;

/// Common event sending utilities for fetch tasks
#[derive(Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send a generic event
    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(event).await;
    }

    /// Send without waiting for queue space. Used from synchronous callers;
    /// the event is dropped if the queue is full.
    pub fn try_send_event(&self, event: Event) {
        let _ = self.sender.try_send(event);
    }

    pub async fn send_fetch_event(
        &self,
        origin: Origin,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_event(Event::new(origin, message, event_type, log_level))
            .await;
    }
}
