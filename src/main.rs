//! Pricedash - Vehicle Listing Price Dashboard
//!
//! Loads a CSV of vehicle listings, runs a fixed cleaning pipeline and
//! displays price KPIs and charts in a native window.

mod charts;
mod data;
mod gui;
mod pipeline;
mod stats;

use eframe::egui;
use gui::DashboardApp;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .try_init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 900.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Vehicle Price Dashboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Vehicle Price Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc)))),
    )
}
