//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::events::Event;
use crate::reconciler::Applied;
use std::error::Error;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::{Instant, Interval, interval_at};

/// One iteration of the headless loop.
enum Step {
    Event(Event),
    Resolved(Option<Applied>),
    Refresh,
    Shutdown,
}

/// Runs the dashboard without a terminal UI
///
/// Events are printed as they arrive, plus a summary line for every accepted
/// state change. Stops on Ctrl+C.
pub async fn run_headless_mode(
    mut session: SessionData,
    refresh_every: Option<Duration>,
) -> Result<(), Box<dyn Error>> {
    print_session_starting("headless", &session.environment, session.controller.range());

    // Trigger shutdown on Ctrl+C
    let (shutdown_sender, mut shutdown_receiver) = broadcast::channel::<()>(1);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_sender.send(());
        }
    });

    let mut refresh_timer =
        refresh_every.map(|period| interval_at(Instant::now() + period, period));

    session.controller.refresh();

    loop {
        let step = tokio::select! {
            Some(event) = session.event_receiver.recv() => Step::Event(event),
            applied = session.controller.next_resolution() => Step::Resolved(applied),
            _ = next_tick(&mut refresh_timer) => Step::Refresh,
            _ = shutdown_receiver.recv() => Step::Shutdown,
        };

        match step {
            Step::Event(event) => {
                if event.should_display() {
                    println!("{}", event);
                }
            }
            Step::Resolved(Some(Applied::Accepted)) => {
                let view = session.controller.view_model();
                let state = if view.loading { "loading" } else { "ready" };
                println!("[{}] {}", state, view.summary());
            }
            Step::Resolved(Some(Applied::Stale)) => {}
            Step::Resolved(None) | Step::Shutdown => break,
            Step::Refresh => {
                session.controller.refresh();
            }
        }
    }

    print_session_shutdown();
    print_session_exit_success();

    Ok(())
}

/// Resolves on the next timer tick, or never when no timer is configured.
async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
