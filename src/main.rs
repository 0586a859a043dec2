mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use anyhow::Context;
use app::SalesDashApp;
use eframe::egui;
use state::AppState;

/// Dataset location, relative to the working directory.
const DATA_FILE: &str = "datas/sales.csv";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Loader failures are fatal: there is nothing to show without data.
    let path = Path::new(DATA_FILE);
    let table = data::loader::load(path).with_context(|| format!("loading {DATA_FILE}"))?;
    let file_size_kb =
        data::loader::file_size_kb(path).with_context(|| format!("sizing {DATA_FILE}"))?;
    log::info!(
        "Loaded {} sales records ({file_size_kb} kB on disk)",
        table.len()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "US Stores Sales",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(SalesDashApp::new(AppState::new(
                table,
                file_size_kb,
            ))))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(())
}
