mod backend;
mod config;
mod consts;
mod environment;
mod error_classifier;
mod events;
mod logging;
mod pretty;
mod reconciler;
mod session;
mod ui;
mod workers;

use crate::backend::DateRange;
use crate::backend::types::DATE_FORMAT;
use crate::config::{Config, get_config_path};
use crate::consts::cli_consts::backend::{REQUEST_TIMEOUT_SECS, URL_ENV_VAR};
use crate::environment::{Environment, InvalidEnvironment};
use crate::pretty::{print_cmd_error, print_cmd_info, print_cmd_warn};
use crate::session::{
    OutputFormat, run_headless_mode, run_snapshot_mode, run_tui_mode, setup_session,
};
use crate::ui::UIConfig;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::Path;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Backend base URL (http:// or https://), or `local`
    #[arg(long, global = true, value_name = "URL")]
    backend_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, value_name = "SECS", default_value_t = REQUEST_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

/// Date window flags. Each given bound replaces the saved one.
#[derive(clap::Args, Debug, Clone, Copy, Default)]
struct RangeArgs {
    /// First date to include
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date_arg)]
    start_date: Option<NaiveDate>,

    /// Last date to include
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date_arg)]
    end_date: Option<NaiveDate>,

    /// Leave the start open, ignoring any saved start date
    #[arg(long, conflicts_with = "start_date")]
    no_start_date: bool,

    /// Leave the end open, ignoring any saved end date
    #[arg(long, conflicts_with = "end_date")]
    no_end_date: bool,
}

impl RangeArgs {
    fn over(self, saved: DateRange) -> DateRange {
        let start = if self.no_start_date {
            None
        } else {
            self.start_date.or(saved.start)
        };
        let end = if self.no_end_date {
            None
        } else {
            self.end_date.or(saved.end)
        };
        DateRange::new(start, end)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Open the dashboard
    Start {
        #[command(flatten)]
        range: RangeArgs,

        /// Run without the terminal UI, printing events and summaries
        #[arg(long)]
        headless: bool,

        /// Paint a dark background behind the dashboard
        #[arg(long = "with-background", action = clap::ArgAction::SetTrue)]
        with_background: bool,

        /// Re-fetch everything every N seconds
        #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
        refresh_secs: Option<u64>,
    },
    /// Fetch once and print the reconciled view
    Snapshot {
        #[command(flatten)]
        range: RangeArgs,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Remember a date range (and --backend-url, if given) for later runs
    SaveRange {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Delete the saved configuration
    Reset,
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

/// Backend precedence: flag, then environment variable, then config file.
fn resolve_environment(
    flag: Option<String>,
    env_var: Option<String>,
    config: &Config,
) -> Result<Environment, InvalidEnvironment> {
    flag.or(env_var.filter(|v| !v.trim().is_empty()))
        .or_else(|| config.backend_url.clone())
        .map(|raw| raw.parse())
        .unwrap_or(Ok(Environment::Local))
}

fn load_config(path: &Path) -> Config {
    match Config::load_or_default(path) {
        Ok(config) => config,
        Err(e) => {
            print_cmd_warn!(
                "Ignoring saved configuration",
                "Could not read {}: {}",
                path.display(),
                e
            );
            Config::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config_path = get_config_path()?;

    if let Command::Reset = args.command {
        println!("Clearing saved configuration...");
        return Config::clear(&config_path).map_err(Into::into);
    }

    let config = load_config(&config_path);
    let environment = match resolve_environment(
        args.backend_url.clone(),
        std::env::var(URL_ENV_VAR).ok(),
        &config,
    ) {
        Ok(environment) => environment,
        Err(e) => {
            print_cmd_error!("Invalid backend", "{}", e);
            return Err(e.into());
        }
    };
    let request_timeout = Duration::from_secs(args.timeout_secs.max(1));

    match args.command {
        Command::Start {
            range,
            headless,
            with_background,
            refresh_secs,
        } => {
            let session = setup_session(environment, range.over(config.range), request_timeout)?;
            let refresh_every = refresh_secs.map(Duration::from_secs);
            if headless {
                run_headless_mode(session, refresh_every).await
            } else {
                run_tui_mode(session, UIConfig::new(with_background, refresh_every)).await
            }
        }
        Command::Snapshot { range, format } => {
            let session = setup_session(environment, range.over(config.range), request_timeout)?;
            run_snapshot_mode(session, format).await
        }
        Command::SaveRange { range } => {
            let updated = Config::new(
                args.backend_url.or(config.backend_url),
                DateRange::new(range.start_date, range.end_date),
            );
            updated
                .save(&config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            print_cmd_info!(
                "Saved",
                "Range {} written to {}",
                updated.range,
                config_path.display()
            );
            Ok(())
        }
        Command::Reset => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_precedence() {
        let config = Config::new(Some("http://from-config:1".to_string()), DateRange::default());

        let env = resolve_environment(
            Some("http://from-flag:1".to_string()),
            Some("http://from-env:1".to_string()),
            &config,
        )
        .unwrap();
        assert_eq!(env.backend_url(), "http://from-flag:1");

        let env =
            resolve_environment(None, Some("http://from-env:1".to_string()), &config).unwrap();
        assert_eq!(env.backend_url(), "http://from-env:1");

        let env = resolve_environment(None, Some("  ".to_string()), &config).unwrap();
        assert_eq!(env.backend_url(), "http://from-config:1");

        let env = resolve_environment(None, None, &Config::default()).unwrap();
        assert_eq!(env, Environment::Local);

        assert!(resolve_environment(Some("ftp://nope".to_string()), None, &config).is_err());
    }

    #[test]
    fn test_range_flags_override_saved_bounds() {
        let saved = DateRange::new(
            NaiveDate::from_ymd_opt(2019, 1, 1),
            NaiveDate::from_ymd_opt(2019, 12, 31),
        );
        let flags = RangeArgs {
            start_date: NaiveDate::from_ymd_opt(2020, 1, 1),
            ..RangeArgs::default()
        };
        assert_eq!(
            flags.over(saved),
            DateRange::new(
                NaiveDate::from_ymd_opt(2020, 1, 1),
                NaiveDate::from_ymd_opt(2019, 12, 31)
            )
        );
        assert_eq!(RangeArgs::default().over(saved), saved);
    }

    #[test]
    fn test_range_flags_reopen_saved_bounds() {
        let saved = DateRange::new(
            NaiveDate::from_ymd_opt(2019, 1, 1),
            NaiveDate::from_ymd_opt(2019, 12, 31),
        );

        let args = Args::try_parse_from(["regime-dash", "snapshot", "--no-start-date"]).unwrap();
        let Command::Snapshot { range, .. } = args.command else {
            panic!("expected snapshot");
        };
        assert_eq!(
            range.over(saved),
            DateRange::new(None, NaiveDate::from_ymd_opt(2019, 12, 31))
        );

        let args = Args::try_parse_from([
            "regime-dash",
            "start",
            "--no-end-date",
            "--start-date",
            "2020-06-01",
        ])
        .unwrap();
        let Command::Start { range, .. } = args.command else {
            panic!("expected start");
        };
        assert_eq!(
            range.over(saved),
            DateRange::new(NaiveDate::from_ymd_opt(2020, 6, 1), None)
        );

        assert!(
            Args::try_parse_from([
                "regime-dash",
                "snapshot",
                "--start-date",
                "2020-01-01",
                "--no-start-date",
            ])
            .is_err()
        );
    }

    #[test]
    fn test_parse_date_arg() {
        assert_eq!(
            parse_date_arg("2020-02-29"),
            Ok(NaiveDate::from_ymd_opt(2020, 2, 29).unwrap())
        );
        assert!(parse_date_arg("2021-02-29").is_err());
        assert!(parse_date_arg("yesterday").is_err());
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Args::command().debug_assert();

        let args = Args::try_parse_from([
            "regime-dash",
            "snapshot",
            "--start-date",
            "2020-01-01",
            "--format",
            "text",
            "--backend-url",
            "http://localhost:5000",
        ])
        .unwrap();
        assert_eq!(args.backend_url.as_deref(), Some("http://localhost:5000"));
        match args.command {
            Command::Snapshot { range, format } => {
                assert_eq!(range.start_date, NaiveDate::from_ymd_opt(2020, 1, 1));
                assert_eq!(format, OutputFormat::Text);
            }
            _ => panic!("expected snapshot"),
        }
    }
}
