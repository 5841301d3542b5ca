mod app;
mod chart;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::Path;

use anyhow::Result;
use app::DashboardApp;
use config::DashboardConfig;
use data::model::LaunchDataset;
use eframe::egui;
use state::AppState;

/// Load the startup table. A missing file is not an error: the window opens
/// empty. A file that exists but cannot be read is.
fn load_startup_dataset(path: &Path) -> Result<Option<LaunchDataset>> {
    if !path.exists() {
        return Ok(None);
    }
    data::loader::load_file(path).map(Some)
}

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::default();
    let mut state = AppState::new(config.clone());

    match load_startup_dataset(&config.dataset_path) {
        Ok(Some(dataset)) => {
            if dataset.is_empty() {
                log::warn!("{} has no launches", config.dataset_path.display());
            }
            log::info!(
                "Loaded {} launches from {} sites, payload {:?} kg",
                dataset.len(),
                dataset.sites().len(),
                dataset.payload_bounds()
            );
            state.set_dataset(dataset, Some(config.dataset_path.clone()));
        }
        Ok(None) => {
            log::warn!(
                "{} not found; open a launch table from the File menu",
                config.dataset_path.display()
            );
        }
        Err(e) => {
            log::error!("Failed to load launch records: {e:#}");
            return Err(e);
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        &config.window_title,
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))
}
