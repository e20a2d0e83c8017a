/// Data layer: flight records, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  check required columns, parse rows → FlightTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  origin (+ airline) predicate → row indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ analysis  │  value counts, hourly volume, shares, route graph
///   └──────────┘
/// ```

pub mod analysis;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod routes;
