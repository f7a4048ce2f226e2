//! Snapshot mode execution
//!
//! One refresh cycle, then the reconciled view is printed to stdout. Events and
//! warnings go to stderr so JSON output can be piped.

use super::SessionData;
use crate::consts::cli_consts::snapshot;
use crate::pretty::print_cmd_warn;
use std::error::Error;
use tokio::time::timeout;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

/// Fetches everything once and prints the result.
///
/// Fetch failures are reported on stderr but do not fail the command; the
/// printed view simply lacks the failed slices.
pub async fn run_snapshot_mode(
    mut session: SessionData,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    session.controller.refresh();

    let budget = session.request_timeout + snapshot::settle_grace();
    if timeout(budget, session.controller.settle()).await.is_err() {
        print_cmd_warn!(
            "Snapshot incomplete",
            "Not every request finished within {}s; printing what arrived.",
            budget.as_secs()
        );
    }

    while let Ok(event) = session.event_receiver.try_recv() {
        if event.should_display() {
            eprintln!("{}", event);
        }
    }

    let view = session.controller.view_model();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Text => println!("{}", view.render_text()),
    }

    Ok(())
}
