use std::collections::{BTreeMap, BTreeSet};

use super::model::{CatColumn, Table};

// ---------------------------------------------------------------------------
// FilterSpec: the sidebar's current selection
// ---------------------------------------------------------------------------

/// Per-column selection state plus the Area_Code range. The default spec
/// accepts every value present in the table, so filtering is opt-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    /// Inclusive lower bound on Area_Code.
    pub area_code_min: i64,
    /// Inclusive upper bound on Area_Code.
    pub area_code_max: i64,
    /// For each categorical column the set of accepted values. An empty set
    /// accepts nothing; there is no "empty means all".
    pub selected: BTreeMap<CatColumn, BTreeSet<String>>,
}

/// Initialise a [`FilterSpec`] with the full domain of every column
/// (i.e., show everything).
pub fn default_spec(table: &Table) -> FilterSpec {
    let (area_code_min, area_code_max) = table.area_code_range;
    FilterSpec {
        area_code_min,
        area_code_max,
        selected: table.unique_values.clone(),
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return indices of rows that pass all active filters, preserving row
/// order.
///
/// A row passes when its Area_Code lies in `[min, max]` and, for every
/// categorical column, its value is in the accepted set. A column whose
/// accepted set is empty fails every row.
pub fn filtered_indices(table: &Table, spec: &FilterSpec) -> Vec<usize> {
    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            if row.area_code < spec.area_code_min || row.area_code > spec.area_code_max {
                return false;
            }
            for &col in &CatColumn::ALL {
                let Some(accepted) = spec.selected.get(&col) else {
                    // No entry behaves like an empty set: nothing accepted.
                    return false;
                };
                if accepted.is_empty() {
                    return false;
                }
                // All unique values accepted → no effective constraint.
                if let Some(all_vals) = table.unique_values.get(&col) {
                    if accepted.len() == all_vals.len() {
                        continue;
                    }
                }
                if !accepted.contains(col.value(row)) {
                    return false;
                }
            }
            true
        })
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{test_row, Table, MAJOR_MARKET, SMALL_MARKET};

    fn sample_table() -> Table {
        Table::from_rows(vec![
            test_row("Connecticut", "East", SMALL_MARKET, 203, 100.0, 60.0),
            test_row("Colorado", "West", MAJOR_MARKET, 970, 200.0, 90.0),
            test_row("Ohio", "Central", SMALL_MARKET, 614, 150.0, 70.0),
            test_row("Colorado", "West", SMALL_MARKET, 303, 120.0, 55.0),
        ])
    }

    #[test]
    fn default_spec_is_identity() {
        let table = sample_table();
        let spec = default_spec(&table);
        assert_eq!(filtered_indices(&table, &spec), vec![0, 1, 2, 3]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let mut table = sample_table();
        let mut spec = default_spec(&table);
        spec.selected
            .get_mut(&CatColumn::State)
            .unwrap()
            .remove("Ohio");

        let first = filtered_indices(&table, &spec);
        assert_eq!(first, vec![0, 1, 3]);

        // Re-apply the same spec to a table built from its own output.
        let rows = first.iter().map(|&i| table.rows[i].clone()).collect();
        table = Table::from_rows(rows);
        let second = filtered_indices(&table, &spec);
        assert_eq!(second, (0..first.len()).collect::<Vec<_>>());
    }

    #[test]
    fn area_code_range_is_inclusive() {
        let table = sample_table();
        let mut spec = default_spec(&table);
        spec.area_code_min = 303;
        spec.area_code_max = 614;
        assert_eq!(filtered_indices(&table, &spec), vec![2, 3]);
    }

    #[test]
    fn single_area_code_range_matches_only_that_code() {
        let table = sample_table();
        let mut spec = default_spec(&table);
        spec.area_code_min = 614;
        spec.area_code_max = 614;
        assert_eq!(filtered_indices(&table, &spec), vec![2]);
    }

    #[test]
    fn emptied_column_hides_everything() {
        let table = sample_table();
        let mut spec = default_spec(&table);
        spec.selected.get_mut(&CatColumn::Market).unwrap().clear();
        assert!(filtered_indices(&table, &spec).is_empty());
    }

    #[test]
    fn constraints_combine_with_and() {
        let table = sample_table();
        let mut spec = default_spec(&table);
        spec.selected
            .get_mut(&CatColumn::MarketSize)
            .unwrap()
            .remove(MAJOR_MARKET);
        spec.area_code_min = 300;
        // Small markets with Area_Code >= 300: rows 2 and 3.
        assert_eq!(filtered_indices(&table, &spec), vec![2, 3]);
    }
}
