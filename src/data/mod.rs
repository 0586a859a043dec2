/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///   datas/sales.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  Vec<Row>, column domains
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply FilterSpec → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  metrics  │  averages, market shares, group-by
///   └──────────┘
/// ```
///
/// Everything below `loader` is pure: the same (Table, FilterSpec) always
/// yields the same view and summary.
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod model;

/// Round to two decimals, half away from zero. The single rounding
/// primitive for the whole engine (metric averages, market-share
/// percentages, file size display).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
