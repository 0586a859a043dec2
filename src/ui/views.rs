use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::ColorMap;
use crate::data::metrics::{compute_metrics, group_by};
use crate::data::model::{CatColumn, Table, COLUMNS};
use crate::state::{
    AppState, ChartStyle, BOX_BAR_FEATURES, MARKET_DIMENSIONS, PIE_FEATURES,
    REGRESSION_FEATURES, SOCIAL_LINKS,
};
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Dataset view
// ---------------------------------------------------------------------------

/// Per-column descriptions shown under the dataset table.
const FEATURE_NOTES: [(&str, &str); 20] = [
    ("Area Code", "Store's code"),
    ("State", "Store's state"),
    ("Market", "Store's region"),
    ("Market Size", "Store's size"),
    ("Profit", "Profit in dollars (U$)"),
    ("Margin", "Profit + total expenses (U$)"),
    ("Sales", "Value acquired in sales (U$)"),
    ("COGS", "Cost of goods sold (U$)"),
    ("Total Expenses", "Total expenses to get the product to selling (U$)"),
    ("Marketing", "Expenses in marketing (U$)"),
    ("Inventory", "Inventory value of the product in the sale moment (U$)"),
    ("Budget Profit", "Expected profit (U$)"),
    ("Budget COGS", "Expected COGS (U$)"),
    ("Budget Margin", "Expected profit + expected total expenses (U$)"),
    ("Budget Sales", "Expected value acquired in sales (U$)"),
    ("ProductID", "Product ID"),
    ("Date", "Sale date"),
    ("Product Type", "Product category"),
    ("Product", "Product description"),
    ("Type", "Flavor type"),
];

/// The filtered table plus headline cards and column descriptions.
pub fn dataset_view(ui: &mut Ui, state: &AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.columns(3, |cols| {
                metric_card(&mut cols[0], "Nº Registers", state.visible.len().to_string(), None);
                metric_card(
                    &mut cols[1],
                    "Nº Features",
                    Table::COLUMN_COUNT.to_string(),
                    None,
                );
                metric_card(
                    &mut cols[2],
                    "File Size",
                    format!("{:.2} kB", state.file_size_kb),
                    None,
                );
            });
            ui.add_space(8.0);

            dataset_table(ui, state);
            ui.add_space(8.0);

            egui::CollapsingHeader::new(RichText::new("🎯 Target Feature").strong())
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.strong("Sales");
                    ui.label("Value acquired in sales (U$)");
                });

            egui::CollapsingHeader::new(RichText::new("📝 Features").strong())
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    for (name, description) in FEATURE_NOTES {
                        ui.strong(name);
                        ui.label(description);
                        ui.add_space(6.0);
                    }
                });
        });
}

fn dataset_table(ui: &mut Ui, state: &AppState) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(70.0), Table::COLUMN_COUNT)
        .max_scroll_height(360.0)
        .header(20.0, |mut header| {
            for name in COLUMNS {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, state.visible.len(), |mut table_row| {
                let row = &state.table.rows[state.visible[table_row.index()]];
                for col in 0..Table::COLUMN_COUNT {
                    table_row.col(|ui| {
                        ui.label(row.cell(col));
                    });
                }
            });
        });
}

// ---------------------------------------------------------------------------
// Metrics view
// ---------------------------------------------------------------------------

/// Nine metric cards over the filtered view, or the empty-state message
/// when the filters match nothing.
pub fn metrics_view(ui: &mut Ui, state: &AppState) {
    let summary = match compute_metrics(&state.table, &state.visible) {
        Ok(summary) => summary,
        Err(_) => {
            empty_state(ui);
            return;
        }
    };

    ui.columns(3, |cols| {
        metric_card(
            &mut cols[0],
            "AVG Sales",
            format!("U$ {:.2}", summary.avg_sales),
            Some(summary.avg_sales),
        );
        metric_card(
            &mut cols[1],
            "AVG COGS",
            format!("U$ {:.2}", summary.avg_cogs),
            Some(-summary.avg_cogs),
        );
        metric_card(
            &mut cols[2],
            "AVG Margin",
            format!("U$ {:.2}", summary.avg_margin),
            Some(summary.avg_margin),
        );
    });
    ui.add_space(8.0);
    ui.columns(3, |cols| {
        metric_card(
            &mut cols[0],
            "AVG Total Expenses",
            format!("U$ {:.2}", summary.avg_total_expenses),
            Some(-summary.avg_total_expenses),
        );
        metric_card(
            &mut cols[1],
            "AVG Marketing",
            format!("U$ {:.2}", summary.avg_marketing),
            Some(-summary.avg_marketing),
        );
        metric_card(
            &mut cols[2],
            "AVG Profit",
            format!("U$ {:.2}", summary.avg_profit),
            Some(summary.avg_profit),
        );
    });
    ui.add_space(8.0);
    ui.columns(3, |cols| {
        metric_card(
            &mut cols[0],
            "AVG Inventory",
            format!("U$ {:.2}", summary.avg_inventory),
            Some(summary.avg_inventory),
        );
        metric_card(
            &mut cols[1],
            "% Small Markets",
            format!("{:.2} %", summary.pct_small_markets),
            Some(0.0),
        );
        metric_card(
            &mut cols[2],
            "% Large Markets",
            format!("{:.2} %", summary.pct_large_markets),
            Some(0.0),
        );
    });
}

// ---------------------------------------------------------------------------
// Dashboard view
// ---------------------------------------------------------------------------

/// Grouped market charts, the Marketing correlation scatter, and the share
/// pies. All chart math happens in [`crate::ui::plot`].
pub fn dashboard_view(ui: &mut Ui, state: &mut AppState) {
    if state.visible.is_empty() {
        empty_state(ui);
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Market Size, Region and State Analysis");
            ui.add_space(4.0);

            egui::ComboBox::from_label("What would you like to analyse?")
                .selected_text(state.box_bar_feature.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for feature in BOX_BAR_FEATURES {
                        ui.selectable_value(&mut state.box_bar_feature, feature, feature.label());
                    }
                });
            egui::ComboBox::from_label("What style do you like to see?")
                .selected_text(state.box_bar_style.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for style in ChartStyle::ALL {
                        ui.selectable_value(&mut state.box_bar_style, style, style.label());
                    }
                });

            for dimension in MARKET_DIMENSIONS {
                let groups =
                    group_by(&state.table, &state.visible, dimension, state.box_bar_feature);
                let colors = ColorMap::new(groups.keys().cloned());
                let id = format!("market_chart_{}", dimension.label());
                match state.box_bar_style {
                    ChartStyle::Box => plot::grouped_box_plot(
                        ui,
                        &id,
                        dimension.label(),
                        state.box_bar_feature.label(),
                        &groups,
                        &colors,
                    ),
                    ChartStyle::Bar => plot::grouped_bar_chart(
                        ui,
                        &id,
                        dimension.label(),
                        state.box_bar_feature.label(),
                        &groups,
                        &colors,
                    ),
                }
            }
            ui.separator();

            ui.strong("Marketing Correlations");
            ui.add_space(4.0);
            egui::ComboBox::from_label("What correlation would you like to analyse?")
                .selected_text(state.regression_feature.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for feature in REGRESSION_FEATURES {
                        ui.selectable_value(
                            &mut state.regression_feature,
                            feature,
                            feature.label(),
                        );
                    }
                });

            let points: Vec<[f64; 2]> = state
                .visible
                .iter()
                .map(|&i| {
                    let row = &state.table.rows[i];
                    [row.marketing, state.regression_feature.value(row)]
                })
                .collect();
            plot::scatter_with_trendline(
                ui,
                "marketing_correlation",
                "Marketing",
                state.regression_feature.label(),
                &points,
            );
            ui.separator();

            ui.strong("Market Size and Regions Percentages");
            ui.add_space(4.0);
            egui::ComboBox::from_label("What percentage would you like to see?")
                .selected_text(state.pie_feature.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for feature in PIE_FEATURES {
                        ui.selectable_value(&mut state.pie_feature, feature, feature.label());
                    }
                });

            for dimension in [CatColumn::MarketSize, CatColumn::Market] {
                ui.add_space(6.0);
                ui.label(RichText::new(format!("{} share of {}", dimension.label(),
                    state.pie_feature.label())).strong());
                let groups = group_by(&state.table, &state.visible, dimension, state.pie_feature);
                let colors = ColorMap::new(groups.keys().cloned());
                plot::pie_chart(ui, &groups, &colors);
            }
        });
}

// ---------------------------------------------------------------------------
// Credits view
// ---------------------------------------------------------------------------

pub fn credits_view(ui: &mut Ui) {
    ui.heading("📬 Reach Me");
    ui.add_space(8.0);
    ui.horizontal(|ui: &mut Ui| {
        for (platform, url) in SOCIAL_LINKS {
            ui.hyperlink_to(platform, url);
        }
    });
}

// ---------------------------------------------------------------------------
// Shared widgets
// ---------------------------------------------------------------------------

/// A metric card: small label, big value, optional signed delta accent.
fn metric_card(ui: &mut Ui, label: &str, value: String, delta: Option<f64>) {
    ui.group(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label(RichText::new(label).small());
            ui.label(RichText::new(value).heading().strong());
            if let Some(delta) = delta {
                let (text, color) = if delta > 0.0 {
                    (format!("▲ {delta:.2}"), Color32::GREEN)
                } else if delta < 0.0 {
                    (format!("▼ {:.2}", delta.abs()), Color32::RED)
                } else {
                    ("0.00".to_string(), Color32::GRAY)
                };
                ui.label(RichText::new(text).color(color).small());
            }
        });
    });
}

/// Rendered wherever the filter selection yields zero rows.
fn empty_state(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("No rows match the current filters. Loosen a selection to see data.");
    });
}
