use crate::data::filter::{default_spec, filtered_indices, FilterSpec};
use crate::data::model::{CatColumn, Feature, Table};

// ---------------------------------------------------------------------------
// View and chart selections
// ---------------------------------------------------------------------------

/// The horizontal menu's pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dataset,
    Metrics,
    Dashboard,
    Credits,
}

impl View {
    pub const ALL: [View; 4] = [View::Dataset, View::Metrics, View::Dashboard, View::Credits];

    pub fn label(self) -> &'static str {
        match self {
            View::Dataset => "Dataset",
            View::Metrics => "Metrics",
            View::Dashboard => "Dashboard",
            View::Credits => "Credits",
        }
    }
}

/// Style selector for the grouped market charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartStyle {
    Box,
    Bar,
}

impl ChartStyle {
    pub const ALL: [ChartStyle; 2] = [ChartStyle::Box, ChartStyle::Bar];

    pub fn label(self) -> &'static str {
        match self {
            ChartStyle::Box => "Box Plot",
            ChartStyle::Bar => "Bar Plot",
        }
    }
}

/// Features offered by the box/bar selector.
pub const BOX_BAR_FEATURES: [Feature; 7] = Feature::ALL;

/// Features offered by the Marketing-correlation selector. Marketing is
/// the x axis, so it is not offered against itself.
pub const REGRESSION_FEATURES: [Feature; 6] = [
    Feature::Profit,
    Feature::Margin,
    Feature::Sales,
    Feature::Cogs,
    Feature::TotalExpenses,
    Feature::Inventory,
];

/// Features offered by the pie selector.
pub const PIE_FEATURES: [Feature; 7] = Feature::ALL;

/// Grouping dimensions for the market analysis charts, in display order.
pub const MARKET_DIMENSIONS: [CatColumn; 3] =
    [CatColumn::MarketSize, CatColumn::Market, CatColumn::State];

/// Credits view links: platform → URL.
pub const SOCIAL_LINKS: [(&str, &str); 5] = [
    ("GitHub", "https://github.com/csfelix"),
    ("Kaggle", "https://www.kaggle.com/dsfelix"),
    ("Portfolio", "https://csfelix.github.io"),
    ("LinkedIn", "https://linkedin.com/in/csfelix"),
    ("Email", "mailto:csfelix08@gmail.com"),
];

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset. Read-only; replaced wholesale by File → Open.
    pub table: Table,

    /// On-disk size of the loaded file, for the Dataset view card.
    pub file_size_kb: f64,

    /// The sidebar's current selection.
    pub spec: FilterSpec,

    /// Indices of rows passing the current filters (cached).
    pub visible: Vec<usize>,

    /// Which page is showing.
    pub view: View,

    // Dashboard selections.
    pub box_bar_feature: Feature,
    pub box_bar_style: ChartStyle,
    pub regression_feature: Feature,
    pub pie_feature: Feature,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Wrap a freshly loaded dataset with all filters wide open.
    pub fn new(table: Table, file_size_kb: f64) -> Self {
        let spec = default_spec(&table);
        let visible = (0..table.len()).collect();
        Self {
            table,
            file_size_kb,
            spec,
            visible,
            view: View::Dataset,
            box_bar_feature: Feature::Profit,
            box_bar_style: ChartStyle::Box,
            regression_feature: Feature::Profit,
            pie_feature: Feature::Profit,
            status_message: None,
        }
    }

    /// Ingest a replacement dataset (File → Open), resetting the filters.
    pub fn set_table(&mut self, table: Table, file_size_kb: f64) {
        self.spec = default_spec(&table);
        self.visible = (0..table.len()).collect();
        self.table = table;
        self.file_size_kb = file_size_kb;
        self.status_message = None;
    }

    /// Recompute `visible` after a filter change.
    pub fn refilter(&mut self) {
        self.visible = filtered_indices(&self.table, &self.spec);
    }

    /// Back to the wide-open default spec.
    pub fn reset_filters(&mut self) {
        self.spec = default_spec(&self.table);
        self.refilter();
    }

    /// Select all values in a column.
    pub fn select_all(&mut self, column: CatColumn) {
        if let Some(all_vals) = self.table.unique_values.get(&column) {
            self.spec.selected.insert(column, all_vals.clone());
            self.refilter();
        }
    }

    /// Deselect all values in a column.
    pub fn select_none(&mut self, column: CatColumn) {
        self.spec.selected.insert(column, Default::default());
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{test_row, MAJOR_MARKET, SMALL_MARKET};

    fn state() -> AppState {
        let table = Table::from_rows(vec![
            test_row("Connecticut", "East", SMALL_MARKET, 203, 100.0, 60.0),
            test_row("Colorado", "West", MAJOR_MARKET, 970, 200.0, 90.0),
        ]);
        AppState::new(table, 1.0)
    }

    #[test]
    fn new_state_shows_everything() {
        let state = state();
        assert_eq!(state.visible, vec![0, 1]);
    }

    #[test]
    fn select_none_then_all_round_trips() {
        let mut state = state();
        state.select_none(CatColumn::State);
        assert!(state.visible.is_empty());
        state.select_all(CatColumn::State);
        assert_eq!(state.visible, vec![0, 1]);
    }

    #[test]
    fn reset_restores_the_default_spec() {
        let mut state = state();
        state.spec.area_code_min = 900;
        state.refilter();
        assert_eq!(state.visible, vec![1]);
        state.reset_filters();
        assert_eq!(state.visible, vec![0, 1]);
    }
}
