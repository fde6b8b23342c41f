//! GUI module - User interface components

mod app;
mod dashboard;

pub use app::DashboardApp;
pub use dashboard::DashboardView;
