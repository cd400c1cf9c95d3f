mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use app::DashboardApp;
use eframe::egui;
use rusty_dash::config::{Settings, SETTINGS_ENV};

fn main() -> eframe::Result {
    env_logger::init();

    let settings_path = std::env::var_os(SETTINGS_ENV).map(PathBuf::from);
    let settings = match Settings::load_or_default(settings_path.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Ignoring settings: {e:#}");
            Settings::default()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Dash – CSV Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(settings)))),
    )
}
