use std::collections::BTreeMap;

use thiserror::Error;

use super::model::{CatColumn, Feature, Table, MAJOR_MARKET, SMALL_MARKET};
use super::round2;

// ---------------------------------------------------------------------------
// MetricsSummary – the Metrics view's aggregates
// ---------------------------------------------------------------------------

/// Aggregates over a filtered view. All values rounded to two decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub avg_sales: f64,
    pub avg_cogs: f64,
    pub avg_margin: f64,
    pub avg_total_expenses: f64,
    pub avg_marketing: f64,
    pub avg_profit: f64,
    pub avg_inventory: f64,
    /// 100 × share of rows whose Market_Size is "Small Market".
    pub pct_small_markets: f64,
    /// 100 × share of rows whose Market_Size is "Major Market".
    pub pct_large_markets: f64,
}

/// The current filter selection matches no rows, so the per-row averages
/// are undefined. Callers render an empty-state message instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no rows match the current filter selection")]
pub struct EmptyViewError;

/// Compute the summary aggregates over the view given by `indices`.
///
/// Fails with [`EmptyViewError`] on an empty view rather than producing
/// NaN.
pub fn compute_metrics(table: &Table, indices: &[usize]) -> Result<MetricsSummary, EmptyViewError> {
    if indices.is_empty() {
        return Err(EmptyViewError);
    }
    let n = indices.len() as f64;

    let mean = |feature: Feature| {
        round2(
            indices
                .iter()
                .map(|&i| feature.value(&table.rows[i]))
                .sum::<f64>()
                / n,
        )
    };
    let pct_of = |label: &str| {
        let count = indices
            .iter()
            .filter(|&&i| table.rows[i].market_size == label)
            .count();
        round2(count as f64 * 100.0 / n)
    };

    Ok(MetricsSummary {
        avg_sales: mean(Feature::Sales),
        avg_cogs: mean(Feature::Cogs),
        avg_margin: mean(Feature::Margin),
        avg_total_expenses: mean(Feature::TotalExpenses),
        avg_marketing: mean(Feature::Marketing),
        avg_profit: mean(Feature::Profit),
        avg_inventory: mean(Feature::Inventory),
        pct_small_markets: pct_of(SMALL_MARKET),
        pct_large_markets: pct_of(MAJOR_MARKET),
    })
}

// ---------------------------------------------------------------------------
// Grouping for the chart layer
// ---------------------------------------------------------------------------

/// Partition the view's `feature` values by the distinct values of
/// `dimension`, preserving row order within each group. The chart layer
/// owns everything downstream (quartiles, sums, shares, trendlines).
pub fn group_by(
    table: &Table,
    indices: &[usize],
    dimension: CatColumn,
    feature: Feature,
) -> BTreeMap<String, Vec<f64>> {
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for &i in indices {
        let row = &table.rows[i];
        groups
            .entry(dimension.value(row).to_string())
            .or_default()
            .push(feature.value(row));
    }
    groups
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::test_row;

    fn two_market_table() -> Table {
        Table::from_rows(vec![
            test_row("Connecticut", "East", SMALL_MARKET, 203, 100.0, 60.0),
            test_row("Colorado", "West", MAJOR_MARKET, 970, 200.0, 90.0),
        ])
    }

    #[test]
    fn empty_view_raises_instead_of_nan() {
        let table = two_market_table();
        assert_eq!(compute_metrics(&table, &[]), Err(EmptyViewError));
    }

    #[test]
    fn averages_and_market_shares() {
        let table = two_market_table();
        let summary = compute_metrics(&table, &[0, 1]).unwrap();
        assert_eq!(summary.avg_sales, 150.0);
        assert_eq!(summary.avg_cogs, 75.0);
        assert_eq!(summary.pct_small_markets, 50.0);
        assert_eq!(summary.pct_large_markets, 50.0);
    }

    #[test]
    fn market_shares_sum_below_100_with_other_sizes() {
        let mut rows = vec![
            test_row("Connecticut", "East", SMALL_MARKET, 203, 100.0, 60.0),
            test_row("Colorado", "West", MAJOR_MARKET, 970, 200.0, 90.0),
        ];
        rows.push(test_row("Ohio", "Central", "Regional Market", 614, 50.0, 20.0));
        rows.push(test_row("Texas", "South", "Regional Market", 915, 75.0, 30.0));
        let table = Table::from_rows(rows);

        let summary = compute_metrics(&table, &[0, 1, 2, 3]).unwrap();
        assert_eq!(summary.pct_small_markets, 25.0);
        assert_eq!(summary.pct_large_markets, 25.0);
        assert!(summary.pct_small_markets + summary.pct_large_markets < 100.0);
    }

    #[test]
    fn metrics_follow_the_view_not_the_table() {
        let table = two_market_table();
        let summary = compute_metrics(&table, &[1]).unwrap();
        assert_eq!(summary.avg_sales, 200.0);
        assert_eq!(summary.pct_small_markets, 0.0);
        assert_eq!(summary.pct_large_markets, 100.0);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        // Dyadic values keep the half exact in binary: mean of 0.0 and
        // 0.25 is exactly 0.125, which must round up to 0.13.
        let table = Table::from_rows(vec![
            test_row("Connecticut", "East", SMALL_MARKET, 203, 0.0, 0.0),
            test_row("Colorado", "West", MAJOR_MARKET, 970, 0.25, 0.0),
        ]);
        let summary = compute_metrics(&table, &[0, 1]).unwrap();
        assert_eq!(summary.avg_sales, 0.13);

        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(2.0), 2.0);
    }

    #[test]
    fn group_by_partitions_and_preserves_order() {
        let table = two_market_table();
        let groups = group_by(&table, &[0, 1], CatColumn::MarketSize, Feature::Sales);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[SMALL_MARKET], vec![100.0]);
        assert_eq!(groups[MAJOR_MARKET], vec![200.0]);

        // Two rows in the same group keep their original order.
        let table = Table::from_rows(vec![
            test_row("Connecticut", "East", SMALL_MARKET, 203, 100.0, 60.0),
            test_row("Ohio", "Central", SMALL_MARKET, 614, 40.0, 10.0),
        ]);
        let groups = group_by(&table, &[0, 1], CatColumn::MarketSize, Feature::Sales);
        assert_eq!(groups[SMALL_MARKET], vec![100.0, 40.0]);
    }

    #[test]
    fn group_by_respects_the_view() {
        let table = two_market_table();
        let groups = group_by(&table, &[1], CatColumn::Market, Feature::Cogs);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups["West"], vec![90.0]);
    }
}
