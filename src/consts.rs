pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! Grouped by functional area: queues, backend access, and the terminal UI.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum number of buffered events from fetch tasks
    pub const EVENT_QUEUE_SIZE: usize = 100;

    /// Maximum number of buffered fetch resolutions waiting to be applied
    pub const RESOLUTION_QUEUE_SIZE: usize = 32;

    // =============================================================================
    // BACKEND CONFIGURATION
    // =============================================================================

    pub mod backend {
        use std::time::Duration;

        /// Address of the analysis backend when nothing else is configured
        pub const DEFAULT_URL: &str = "http://127.0.0.1:5000";

        /// Environment variable overriding the backend URL
        pub const URL_ENV_VAR: &str = "REGIME_DASH_BACKEND_URL";

        pub const DATA_ENDPOINT: &str = "api/data";
        pub const CHANGE_POINT_ENDPOINT: &str = "api/change_point";
        pub const SUMMARY_STATS_ENDPOINT: &str = "api/summary_stats";

        /// Connection establishment timeout (seconds)
        pub const CONNECT_TIMEOUT_SECS: u64 = 10;

        /// Whole-request timeout (seconds). A hung request resolves as a failure after this.
        pub const REQUEST_TIMEOUT_SECS: u64 = 10;

        pub const fn connect_timeout() -> Duration {
            Duration::from_secs(CONNECT_TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // UI CONFIGURATION
    // =============================================================================

    pub mod ui {
        use std::time::Duration;

        /// Key polling interval, which is also the redraw cadence (milliseconds)
        pub const TICK_MS: u64 = 100;

        /// How long the splash screen stays up unless a key is pressed (seconds)
        pub const SPLASH_SECS: u64 = 2;

        pub const fn tick() -> Duration {
            Duration::from_millis(TICK_MS)
        }

        pub const fn splash_duration() -> Duration {
            Duration::from_secs(SPLASH_SECS)
        }
    }

    // =============================================================================
    // SNAPSHOT CONFIGURATION
    // =============================================================================

    pub mod snapshot {
        use std::time::Duration;

        /// Extra time granted on top of the request timeout for all three
        /// fetches to settle (seconds)
        pub const SETTLE_GRACE_SECS: u64 = 2;

        pub const fn settle_grace() -> Duration {
            Duration::from_secs(SETTLE_GRACE_SECS)
        }
    }
}
