//! dosescope-common: Shared types, errors, and the allowlisted HTTP client
//! used across all dosescope crates.

pub mod error;
pub mod compound;
pub mod activity;
pub mod sandbox;

// Re-export commonly used types
pub use activity::{ActivityRecord, ActivityTable, MeasurementKind};
pub use compound::{capitalize, Compound, DrugInfo};
pub use error::{DoseError, Result};
