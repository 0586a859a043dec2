use std::path::Path;

use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::data::loader;
use crate::data::model::CatColumn;
use crate::state::{AppState, View};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the sidebar filters.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Please Filter Here");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Area code range ----
            ui.strong("Area Code");
            let (domain_min, domain_max) = state.table.area_code_range;
            ui.add(
                Slider::new(&mut state.spec.area_code_min, domain_min..=domain_max).text("From"),
            );
            ui.add(Slider::new(&mut state.spec.area_code_max, domain_min..=domain_max).text("To"));
            // Keep the range well-formed while the user drags.
            if state.spec.area_code_max < state.spec.area_code_min {
                state.spec.area_code_max = state.spec.area_code_min;
            }
            ui.separator();

            // ---- Market filters ----
            ui.strong("Market Filters");
            for col in [CatColumn::State, CatColumn::Market, CatColumn::MarketSize] {
                column_filter(ui, state, col);
            }
            ui.separator();

            // ---- Product filters ----
            ui.strong("Product Filters");
            for col in [CatColumn::ProductType, CatColumn::Product, CatColumn::Flavor] {
                column_filter(ui, state, col);
            }
            ui.separator();

            if ui.button("Reset Filters").clicked() {
                state.reset_filters();
            }
        });

    // Recompute the visible rows after any widget changes.
    state.refilter();
}

/// One collapsible checkbox list for a categorical column.
fn column_filter(ui: &mut Ui, state: &mut AppState, col: CatColumn) {
    // Clone what we need so we can mutate state inside the closures.
    let all_values = state
        .table
        .unique_values
        .get(&col)
        .cloned()
        .unwrap_or_default();
    let n_selected = state.spec.selected.get(&col).map_or(0, |s| s.len());
    let header_text = format!("{}  ({}/{})", col.label(), n_selected, all_values.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(col.label())
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            // Select all / none buttons
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all(col);
                }
                if ui.small_button("None").clicked() {
                    state.select_none(col);
                }
            });

            // Re-borrow after potential mutation from All/None
            let selected = state.spec.selected.entry(col).or_default();

            for val in &all_values {
                let mut checked = selected.contains(val);
                if ui.checkbox(&mut checked, val.as_str()).changed() {
                    if checked {
                        selected.insert(val.clone());
                    } else {
                        selected.remove(val);
                    }
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu: file actions, the view switcher, and status.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        for view in View::ALL {
            if ui
                .selectable_label(state.view == view, view.label())
                .clicked()
            {
                state.view = view;
            }
        }

        ui.separator();

        ui.label(format!(
            "{} records, {} shown",
            state.table.len(),
            state.visible.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Load a replacement dataset. Unlike the startup load, failures here are
/// recoverable: they land in the status message.
pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sales data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match load_with_size(&path) {
            Ok((table, file_size_kb)) => {
                log::info!(
                    "Loaded {} sales records from {}",
                    table.len(),
                    path.display()
                );
                state.set_table(table, file_size_kb);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

fn load_with_size(path: &Path) -> Result<(crate::data::model::Table, f64), loader::LoadError> {
    let table = loader::load(path)?;
    let file_size_kb = loader::file_size_kb(path)?;
    Ok((table, file_size_kb))
}
