/// Data layer: core types, loading, caching, and filtering.
///
/// Architecture:
/// ```text
///  rfm_clusters.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  read once, share Arc<Dataset> across renders
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  segment == selected → FilteredView
///   └──────────┘
/// ```

pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
