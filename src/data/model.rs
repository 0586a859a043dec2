use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Row – one sales record
// ---------------------------------------------------------------------------

/// A single sales record (one row of the source CSV).
///
/// Field order matches the dataset's column order; serde renames map the
/// CSV headers onto Rust naming.
#[derive(Debug, Clone, Deserialize)]
pub struct Row {
    #[serde(rename = "Area_Code")]
    pub area_code: i64,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Market")]
    pub market: String,
    #[serde(rename = "Market_Size")]
    pub market_size: String,
    #[serde(rename = "Profit")]
    pub profit: f64,
    #[serde(rename = "Margin")]
    pub margin: f64,
    #[serde(rename = "Sales")]
    pub sales: f64,
    #[serde(rename = "COGS")]
    pub cogs: f64,
    #[serde(rename = "Total_Expenses")]
    pub total_expenses: f64,
    #[serde(rename = "Marketing")]
    pub marketing: f64,
    #[serde(rename = "Inventory")]
    pub inventory: f64,
    #[serde(rename = "Budget_Profit")]
    pub budget_profit: f64,
    #[serde(rename = "Budget_COGS")]
    pub budget_cogs: f64,
    #[serde(rename = "Budget_Margin")]
    pub budget_margin: f64,
    #[serde(rename = "Budget_Sales")]
    pub budget_sales: f64,
    #[serde(rename = "ProductID")]
    pub product_id: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Product_Type")]
    pub product_type: String,
    #[serde(rename = "Product")]
    pub product: String,
    #[serde(rename = "Type")]
    pub flavor: String,
}

/// Column headers in dataset order. Also the required-column list checked
/// by the loader.
pub const COLUMNS: [&str; 20] = [
    "Area_Code",
    "State",
    "Market",
    "Market_Size",
    "Profit",
    "Margin",
    "Sales",
    "COGS",
    "Total_Expenses",
    "Marketing",
    "Inventory",
    "Budget_Profit",
    "Budget_COGS",
    "Budget_Margin",
    "Budget_Sales",
    "ProductID",
    "Date",
    "Product_Type",
    "Product",
    "Type",
];

/// Market_Size labels used by the percentage metrics. The dataset's labels
/// are asymmetric ("Small" vs "Major"); they are not interchangeable.
pub const SMALL_MARKET: &str = "Small Market";
pub const MAJOR_MARKET: &str = "Major Market";

impl Row {
    /// Cell text for the dataset table, by column index. Currency columns
    /// render with two decimals.
    pub fn cell(&self, col: usize) -> String {
        match COLUMNS[col] {
            "Area_Code" => self.area_code.to_string(),
            "State" => self.state.clone(),
            "Market" => self.market.clone(),
            "Market_Size" => self.market_size.clone(),
            "Profit" => format!("{:.2}", self.profit),
            "Margin" => format!("{:.2}", self.margin),
            "Sales" => format!("{:.2}", self.sales),
            "COGS" => format!("{:.2}", self.cogs),
            "Total_Expenses" => format!("{:.2}", self.total_expenses),
            "Marketing" => format!("{:.2}", self.marketing),
            "Inventory" => format!("{:.2}", self.inventory),
            "Budget_Profit" => format!("{:.2}", self.budget_profit),
            "Budget_COGS" => format!("{:.2}", self.budget_cogs),
            "Budget_Margin" => format!("{:.2}", self.budget_margin),
            "Budget_Sales" => format!("{:.2}", self.budget_sales),
            "ProductID" => self.product_id.clone(),
            "Date" => self.date.clone(),
            "Product_Type" => self.product_type.clone(),
            "Product" => self.product.clone(),
            "Type" => self.flavor.clone(),
            other => unreachable!("unknown column {other}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Column enums – the filterable / plottable columns
// ---------------------------------------------------------------------------

/// The categorical columns the sidebar filters on and the charts group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CatColumn {
    State,
    Market,
    MarketSize,
    ProductType,
    Product,
    Flavor,
}

impl CatColumn {
    pub const ALL: [CatColumn; 6] = [
        CatColumn::State,
        CatColumn::Market,
        CatColumn::MarketSize,
        CatColumn::ProductType,
        CatColumn::Product,
        CatColumn::Flavor,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CatColumn::State => "State",
            CatColumn::Market => "Market Region",
            CatColumn::MarketSize => "Market Size",
            CatColumn::ProductType => "Product Type",
            CatColumn::Product => "Product",
            CatColumn::Flavor => "Flavor Type",
        }
    }

    /// The row's value for this column.
    pub fn value(self, row: &Row) -> &str {
        match self {
            CatColumn::State => &row.state,
            CatColumn::Market => &row.market,
            CatColumn::MarketSize => &row.market_size,
            CatColumn::ProductType => &row.product_type,
            CatColumn::Product => &row.product,
            CatColumn::Flavor => &row.flavor,
        }
    }
}

/// The numeric (currency) columns the metrics average and the charts plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Profit,
    Margin,
    Sales,
    Cogs,
    TotalExpenses,
    Marketing,
    Inventory,
}

impl Feature {
    pub const ALL: [Feature; 7] = [
        Feature::Profit,
        Feature::Margin,
        Feature::Sales,
        Feature::Cogs,
        Feature::TotalExpenses,
        Feature::Marketing,
        Feature::Inventory,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Feature::Profit => "Profit",
            Feature::Margin => "Margin",
            Feature::Sales => "Sales",
            Feature::Cogs => "COGS",
            Feature::TotalExpenses => "Total_Expenses",
            Feature::Marketing => "Marketing",
            Feature::Inventory => "Inventory",
        }
    }

    /// The row's value for this column.
    pub fn value(self, row: &Row) -> f64 {
        match self {
            Feature::Profit => row.profit,
            Feature::Margin => row.margin,
            Feature::Sales => row.sales,
            Feature::Cogs => row.cogs,
            Feature::TotalExpenses => row.total_expenses,
            Feature::Marketing => row.marketing,
            Feature::Inventory => row.inventory,
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed column domains.
#[derive(Debug, Clone)]
pub struct Table {
    /// All records, in file order.
    pub rows: Vec<Row>,
    /// For each categorical column the sorted set of distinct values.
    pub unique_values: BTreeMap<CatColumn, BTreeSet<String>>,
    /// Observed (min, max) Area_Code across all rows; (0, 0) when empty.
    pub area_code_range: (i64, i64),
}

impl Table {
    /// Number of columns in the schema.
    pub const COLUMN_COUNT: usize = COLUMNS.len();

    /// Build column domains from the loaded rows.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut unique_values: BTreeMap<CatColumn, BTreeSet<String>> = CatColumn::ALL
            .iter()
            .map(|&col| (col, BTreeSet::new()))
            .collect();
        let mut range: Option<(i64, i64)> = None;

        for row in &rows {
            for &col in &CatColumn::ALL {
                if let Some(values) = unique_values.get_mut(&col) {
                    values.insert(col.value(row).to_string());
                }
            }
            range = Some(match range {
                None => (row.area_code, row.area_code),
                Some((lo, hi)) => (lo.min(row.area_code), hi.max(row.area_code)),
            });
        }

        Table {
            rows,
            unique_values,
            area_code_range: range.unwrap_or((0, 0)),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// Build a row with the fields the engine tests care about; everything else
/// gets a plausible constant. Tests mutate the public fields directly when
/// they need more.
#[cfg(test)]
pub(crate) fn test_row(
    state: &str,
    market: &str,
    market_size: &str,
    area_code: i64,
    sales: f64,
    cogs: f64,
) -> Row {
    Row {
        area_code,
        state: state.to_string(),
        market: market.to_string(),
        market_size: market_size.to_string(),
        profit: sales - cogs,
        margin: sales - cogs,
        sales,
        cogs,
        total_expenses: 0.0,
        marketing: 0.0,
        inventory: 0.0,
        budget_profit: 0.0,
        budget_cogs: 0.0,
        budget_margin: 0.0,
        budget_sales: 0.0,
        product_id: "1".to_string(),
        date: "2010-01-01".to_string(),
        product_type: "Coffee".to_string(),
        product: "Columbian".to_string(),
        flavor: "Regular".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_collects_domains() {
        let rows = vec![
            test_row("Ohio", "Central", SMALL_MARKET, 614, 100.0, 60.0),
            test_row("Ohio", "Central", MAJOR_MARKET, 216, 200.0, 90.0),
            test_row("Texas", "South", SMALL_MARKET, 915, 50.0, 20.0),
        ];
        let table = Table::from_rows(rows);

        assert_eq!(table.len(), 3);
        assert_eq!(table.area_code_range, (216, 915));
        let states = &table.unique_values[&CatColumn::State];
        assert_eq!(states.len(), 2);
        assert!(states.contains("Ohio") && states.contains("Texas"));
        let sizes = &table.unique_values[&CatColumn::MarketSize];
        assert_eq!(sizes.len(), 2);
    }

    #[test]
    fn empty_table_has_degenerate_range() {
        let table = Table::from_rows(Vec::new());
        assert!(table.is_empty());
        assert_eq!(table.area_code_range, (0, 0));
    }

    #[test]
    fn currency_cells_render_two_decimals() {
        let row = test_row("Ohio", "Central", SMALL_MARKET, 614, 219.5, 43.0);
        let sales_col = COLUMNS.iter().position(|&c| c == "Sales").unwrap();
        assert_eq!(row.cell(sales_col), "219.50");
    }
}
