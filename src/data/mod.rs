/// Data layer: core types, loading, filtering and export.
///
/// Architecture:
/// ```text
///  data/hack_data_clustered.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file once → IncidentDataset (cached in DatasetStore)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────────┐
///   │ IncidentDataset  │  Vec<IncidentRecord>, header, cluster index
///   └─────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  cluster selection → FilteredView (row indices)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  FilteredView → CSV with the input schema
///   └──────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;

#[cfg(test)]
pub(crate) mod fixtures;
