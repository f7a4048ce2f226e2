//! Dashboard state management
//!
//! Contains the main dashboard state struct and the date entry state

use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::environment::Environment;
use crate::events::Event;
use crate::reconciler::DashboardController;
use crate::ui::app::UIConfig;

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Which bound of the range is being edited.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum RangeField {
    #[strum(to_string = "start")]
    Start,
    #[strum(to_string = "end")]
    End,
}

/// In-progress date entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeInput {
    pub field: RangeField,
    pub buffer: String,
}

/// Terminal dashboard state: the controller plus everything only the UI needs.
pub struct DashboardState {
    /// The backend the controller talks to.
    pub environment: Environment,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Range, fetch coordination and reconciled data.
    pub controller: DashboardController,
    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<Event>,
    /// Activity logs for display
    pub activity_logs: VecDeque<Event>,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Animation tick counter
    pub tick: usize,

    /// Automatic refresh period, if any
    refresh_every: Option<Duration>,
    /// When the last refresh was triggered
    last_refresh: Instant,
    /// Date entry in progress, if any
    input: Option<RangeInput>,
}

impl DashboardState {
    /// Creates a new instance of the dashboard state.
    pub fn new(
        environment: Environment,
        start_time: Instant,
        controller: DashboardController,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            environment,
            start_time,
            controller,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            with_background_color: ui_config.with_background_color,
            tick: 0,
            refresh_every: ui_config.refresh_every,
            last_refresh: Instant::now(),
            input: None,
        }
    }

    pub fn input(&self) -> Option<&RangeInput> {
        self.input.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.input.is_some()
    }

    pub(super) fn input_mut(&mut self) -> &mut Option<RangeInput> {
        &mut self.input
    }

    pub fn refresh_every(&self) -> Option<Duration> {
        self.refresh_every
    }

    pub(super) fn last_refresh(&self) -> Instant {
        self.last_refresh
    }

    pub(super) fn mark_refreshed(&mut self) {
        self.last_refresh = Instant::now();
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: Event) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: Event) {
        self.pending_events.push_back(event);
    }
}
