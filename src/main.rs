//! Constellation Viewer - Constellation Browser & Interactive 3D Star Map

use anyhow::Context;
use clap::Parser;
use constellation_viewer::config::{self, Config};
use constellation_viewer::gui::ConstellationApp;
use constellation_viewer::logging;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    logging::init(&config.log_level).context("failed to set up logging")?;

    tracing::info!(
        data_dir = %config.data_dir.display(),
        background = %config.background.display(),
        "Starting constellation viewer"
    );

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config::WINDOW_SIZE)
            .with_min_inner_size(config::MIN_WINDOW_SIZE)
            .with_title(config::WINDOW_TITLE),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        config::WINDOW_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(ConstellationApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
