/// Data layer: core types, loading, filtering, aggregation.
///
/// Architecture:
/// ```text
///  .csv / .xlsx / .ods
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  headers, rows, unique values per column
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply predicates → row indices (the filtered view)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  summary  │  KPIs, group totals, top-N shares, describe
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
