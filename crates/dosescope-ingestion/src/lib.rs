//! dosescope-ingestion: the gather pass and the persisted-data loader.
//! - Remote fetchers (PubChem properties, ChEMBL bioactivities)
//! - Cleaning into the fixed DrugInfo / ActivityTable shapes
//! - Per-compound CSV persistence
//! - Manifest and persisted-data loading for the dashboard

pub mod sources;
pub mod normalise;
pub mod store;
pub mod manifest;
pub mod loader;
pub mod pipeline;

pub use loader::{load_persisted_data, load_unfiltered_activities, PersistedData};
pub use manifest::load_manifest;
pub use pipeline::{gather_and_clean, GatherSummary};
pub use store::StorePaths;
