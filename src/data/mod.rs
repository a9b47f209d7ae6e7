/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  clustering_output.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ClusterDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ ClusterDataset│  Vec<SellerRecord>, date/cluster index
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  select one reference date → DateView
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
