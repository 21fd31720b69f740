//! Glucose Chart - Glucose Readings Viewer
//!
//! Loads glucose readings and shows them as a line chart with the normal range band.

use eframe::egui;
use glucose_chart::config::AppConfig;
use glucose_chart::gui::GlucoseApp;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    let filter = EnvFilter::from_default_env().add_directive("glucose_chart=debug".parse()?);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!(
        readings = ?config.readings_path,
        utc_offset = %config.utc_offset,
        "starting glucose chart viewer"
    );

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([900.0, 520.0])
            .with_title("Glucose Chart"),
        ..Default::default()
    };

    eframe::run_native(
        "Glucose Chart",
        options,
        Box::new(move |cc| Ok(Box::new(GlucoseApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
