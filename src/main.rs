mod app;
mod color;
mod config;
mod data;
mod export;
mod format;
mod render;
mod state;
mod stats;
mod ui;

use app::RfmDashboardApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::default();
    log::info!("Reading segments from {}", config.data_path.display());

    let app_name = config.window_title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window_title.clone())
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        &app_name,
        options,
        Box::new(move |_cc| Ok(Box::new(RfmDashboardApp::new(&config)))),
    )
}
