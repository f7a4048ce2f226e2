//! Fetch workers

pub mod core;
pub mod fetcher;

pub use self::core::EventSender;
pub use self::fetcher::FetchCoordinator;
