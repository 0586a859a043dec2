use eframe::egui;

use crate::state::{AppState, View};
use crate::ui::{panels, views};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalesDashApp {
    pub state: AppState,
}

impl SalesDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SalesDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: file menu + view switcher ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the selected view ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("🛍 US Stores Sales");
            ui.label("US stores sales between 2010 and 2011");
            ui.separator();

            match self.state.view {
                View::Dataset => views::dataset_view(ui, &self.state),
                View::Metrics => views::metrics_view(ui, &self.state),
                View::Dashboard => views::dashboard_view(ui, &mut self.state),
                View::Credits => views::credits_view(ui),
            }
        });
    }
}
