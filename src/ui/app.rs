//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::consts::cli_consts::ui;
use crate::environment::Environment;
use crate::events::Event as DashboardEvent;
use crate::reconciler::DashboardController;
use crate::ui::dashboard::{DashboardState, RangeField, render_dashboard};
use crate::ui::splash::render_splash;
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    /// Re-issue all three fetches on this period.
    pub refresh_every: Option<Duration>,
}

impl UIConfig {
    pub fn new(with_background_color: bool, refresh_every: Option<Duration>) -> Self {
        Self {
            with_background_color,
            refresh_every,
        }
    }
}

/// The different screens in the application.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// Charts, statistics and the activity log.
    Dashboard,
}

/// What the loop should do after a key press.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum KeyAction {
    Continue,
    Quit,
}

/// Application state
pub struct App {
    current_screen: Screen,

    /// Loads in the background while the splash screen is up.
    dashboard: DashboardState,

    /// Receives events from the fetch tasks and the controller.
    event_receiver: mpsc::Receiver<DashboardEvent>,
}

impl App {
    pub fn new(
        environment: Environment,
        controller: DashboardController,
        event_receiver: mpsc::Receiver<DashboardEvent>,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            current_screen: Screen::Splash,
            dashboard: DashboardState::new(environment, Instant::now(), controller, ui_config),
            event_receiver,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyAction {
        if self.current_screen == Screen::Splash {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                return KeyAction::Quit;
            }
            // Any other key skips the splash screen
            self.current_screen = Screen::Dashboard;
            return KeyAction::Continue;
        }

        let state = &mut self.dashboard;
        if state.is_editing() {
            match key.code {
                KeyCode::Enter => state.commit_input(),
                KeyCode::Esc => state.cancel_input(),
                KeyCode::Backspace => state.pop_input_char(),
                KeyCode::Char(c) => state.push_input_char(c),
                _ => {}
            }
            return KeyAction::Continue;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return KeyAction::Quit,
            KeyCode::Char('s') => state.begin_input(RangeField::Start),
            KeyCode::Char('e') => state.begin_input(RangeField::End),
            KeyCode::Char('c') => state.clear_range(),
            KeyCode::Char('r') => state.refresh(),
            _ => {}
        }
        KeyAction::Continue
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();

    // First load starts behind the splash screen
    app.dashboard.refresh();

    loop {
        while let Ok(event) = app.event_receiver.try_recv() {
            app.dashboard.add_event(event);
        }
        app.dashboard.update();

        terminal.draw(|f| render(f, &app))?;

        if app.current_screen == Screen::Splash && splash_start.elapsed() >= ui::splash_duration() {
            app.current_screen = Screen::Dashboard;
            continue;
        }

        // crossterm's poll blocks; yield so fetch tasks on this worker keep running
        tokio::task::yield_now().await;
        if event::poll(ui::tick())? {
            if let Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }
                if app.handle_key(key) == KeyAction::Quit {
                    return Ok(());
                }
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, app: &App) {
    match app.current_screen {
        Screen::Splash => render_splash(f, &app.dashboard),
        Screen::Dashboard => render_dashboard(f, &app.dashboard),
    }
}
