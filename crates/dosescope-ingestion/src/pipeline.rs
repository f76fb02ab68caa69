//! The gather pass.
//!
//! For each manifest row, strictly one at a time:
//!   1. Fetch molecular properties (PubChem) by compound name
//!   2. Fetch bioactivities (ChEMBL) by ChEMBL ID
//!   3. Clean into DrugInfo + ActivityTable
//!   4. Write `drug_info/{compound}_info.csv` (always)
//!   5. Write `data/{compound}_activity_data.csv` (only when non-empty)
//!
//! Fetch and write failures, including an output directory that cannot be
//! created, are logged and counted; they never abort the batch.

use serde::Serialize;
use tracing::{info, warn};

use dosescope_common::{Compound, Result};

use crate::normalise::clean;
use crate::sources::{BioactivitySource, PropertySource};
use crate::store::{write_activity_table, write_drug_info, StorePaths};

// ── Result summary ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GatherSummary {
    pub compounds: usize,
    pub with_properties: usize,
    pub info_files_written: usize,
    pub activity_files_written: usize,
    pub without_activities: usize,
    pub errors: Vec<String>,
}

// ── Pipeline orchestrator ─────────────────────────────────────────────────────

/// Gathers, cleans, and persists data for every compound.
pub async fn gather_and_clean(
    compounds: &[Compound],
    properties: &dyn PropertySource,
    bioactivity: &dyn BioactivitySource,
    paths: &StorePaths,
) -> Result<GatherSummary> {
    let mut summary = GatherSummary { compounds: compounds.len(), ..Default::default() };
    if let Err(e) = paths.ensure_dirs() {
        warn!(error = %e, "Could not create output directories");
        summary.errors.push(format!("output directories: {}", e));
    }

    for compound in compounds {
        info!("Processing {} (ChEMBL ID: {})...", compound.name, compound.chembl_id);

        let props = properties.fetch_properties(&compound.name).await;
        if props.is_some() {
            summary.with_properties += 1;
        }
        let activities = bioactivity.fetch_activities(&compound.chembl_id).await;

        let (drug_info, activity_table) = clean(props, activities);

        let info_path = paths.info_path(&compound.name);
        match write_drug_info(&info_path, &drug_info) {
            Ok(()) => {
                summary.info_files_written += 1;
                info!("Drug information for {} saved to {}.", compound.name, info_path.display());
            }
            Err(e) => {
                warn!(compound = %compound.name, error = %e, "Failed to save drug info");
                summary.errors.push(format!("{}: {}", compound.name, e));
            }
        }

        if activity_table.is_empty() {
            info!("No activity data for {}. Skipping save.", compound.name);
            summary.without_activities += 1;
            continue;
        }

        let activity_path = paths.activity_path(&compound.name);
        match write_activity_table(&activity_path, &activity_table) {
            Ok(()) => {
                summary.activity_files_written += 1;
                info!(
                    "Activity data for {} saved to {} ({} rows)",
                    compound.name,
                    activity_path.display(),
                    activity_table.len()
                );
            }
            Err(e) => {
                warn!(compound = %compound.name, error = %e, "Failed to save activity data");
                summary.errors.push(format!("{}: {}", compound.name, e));
            }
        }
    }

    info!(
        compounds = summary.compounds,
        activity_files = summary.activity_files_written,
        errors = summary.errors.len(),
        "Gather pass complete"
    );
    Ok(summary)
}
