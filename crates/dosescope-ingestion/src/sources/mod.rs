//! Remote data source clients.

pub mod pubchem;
pub mod chembl;

use async_trait::async_trait;
use dosescope_common::ActivityRecord;

pub use chembl::ChemblClient;
pub use pubchem::{MolecularProperties, PubChemClient};

/// Molecular-property lookup keyed by compound name.
///
/// Implementations never fail: any transport or parse problem is logged and
/// surfaces as `None`.
#[async_trait]
pub trait PropertySource: Send + Sync {
    async fn fetch_properties(&self, name: &str) -> Option<MolecularProperties>;
}

/// Bioactivity lookup keyed by ChEMBL molecule ID.
///
/// Implementations never fail: problems surface as an empty list.
#[async_trait]
pub trait BioactivitySource: Send + Sync {
    async fn fetch_activities(&self, chembl_id: &str) -> Vec<ActivityRecord>;
}

/// Appends path segments to a base URL, percent-encoding each segment.
pub(crate) fn join_segments(base: &str, segments: &[&str]) -> dosescope_common::Result<String> {
    let mut url = url::Url::parse(base)
        .map_err(|e| dosescope_common::DoseError::Config(format!("Invalid base URL {}: {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| dosescope_common::DoseError::Config(format!("Base URL cannot be a base: {}", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url.to_string())
}
