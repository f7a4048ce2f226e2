pub mod headless_mode;
pub mod messages;
pub mod setup;
pub mod snapshot_mode;
pub mod tui_mode;

pub use headless_mode::run_headless_mode;
pub use setup::{SessionData, setup_session};
pub use snapshot_mode::{OutputFormat, run_snapshot_mode};
pub use tui_mode::run_tui_mode;
