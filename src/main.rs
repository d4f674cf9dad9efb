mod app;
mod chart;
mod color;
mod config;
mod data;
mod error;
mod pipeline;
mod state;
mod ui;

use app::LineScanApp;
use config::AppConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::load_or_default();
    chart::fonts::install_fonts(config.font_path.as_deref());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([640.0, 420.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "EDS Line Scan Analyzer",
        options,
        Box::new(|_cc| Ok(Box::new(LineScanApp::new(config)))),
    )
}
