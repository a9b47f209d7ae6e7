mod analysis;
mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::SellerClustersApp;
use eframe::egui;
use state::AppState;

/// Where the upstream clustering pipeline drops its output.
const DEFAULT_DATA_PATH: &str = "data/clustering_output.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let mut state = AppState::default();
    let default_path = Path::new(DEFAULT_DATA_PATH);
    if default_path.exists() {
        state.load_from_path(default_path);
    } else {
        log::info!("No dataset at {DEFAULT_DATA_PATH}; waiting for File → Open…");
    }

    eframe::run_native(
        "Seller Clusters – Segmentation Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(SellerClustersApp::with_state(state)))),
    )
}
