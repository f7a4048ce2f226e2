//! Terminal dashboard
//!
//! State, update logic, and rendering for the main screen

pub mod components;
pub mod renderer;
pub mod state;
pub mod updaters;
pub mod utils;

pub use renderer::render_dashboard;
pub use state::{DashboardState, RangeField};
