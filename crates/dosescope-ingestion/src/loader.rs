//! Reloads persisted per-compound data for the dashboard.

use std::collections::BTreeMap;

use dosescope_common::{ActivityTable, DrugInfo, Result};
use tracing::{info, warn};

use crate::store::{read_activity_table, read_drug_info, StorePaths};

/// Activity tables (already filtered to ED50/TD50) and property records,
/// keyed by compound name.
#[derive(Debug, Clone, Default)]
pub struct PersistedData {
    pub activities: BTreeMap<String, ActivityTable>,
    pub drug_info: BTreeMap<String, DrugInfo>,
}

impl PersistedData {
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}

/// Loads every compound's activity and info files.
///
/// A missing activity file is a normal skip. A compound is kept only when
/// at least one ED50/TD50 row survives filtering. Info files are loaded
/// independently of the activity outcome. Read failures are logged and the
/// compound is treated as unavailable.
pub fn load_persisted_data(paths: &StorePaths, compounds: &[String]) -> PersistedData {
    info!("Starting to load data for each compound...");
    let mut data = PersistedData::default();

    for compound in compounds {
        match load_activity(paths, compound) {
            Ok(Some(table)) => {
                data.activities.insert(compound.clone(), table);
            }
            Ok(None) => {}
            Err(e) => warn!(compound = %compound, error = %e, "Error loading activity data"),
        }

        let info_path = paths.info_path(compound);
        if info_path.exists() {
            match read_drug_info(&info_path) {
                Ok(Some(record)) => {
                    data.drug_info.insert(compound.clone(), record);
                }
                Ok(None) => warn!(compound = %compound, "Drug info file has no rows"),
                Err(e) => warn!(compound = %compound, error = %e, "Error loading drug info"),
            }
        }
    }

    info!(
        compounds = data.activities.len(),
        with_info = data.drug_info.len(),
        "Data loading completed."
    );
    data
}

/// Every activity file in `data_dir`, unfiltered, for exploratory plots.
pub fn load_unfiltered_activities(paths: &StorePaths) -> Result<BTreeMap<String, ActivityTable>> {
    let mut tables = BTreeMap::new();
    for compound in paths.discover_compounds()? {
        match read_activity_table(&paths.activity_path(&compound)) {
            Ok(table) => {
                tables.insert(compound, table);
            }
            Err(e) => warn!(compound = %compound, error = %e, "Error loading activity data"),
        }
    }
    Ok(tables)
}

/// `Ok(None)` when the file is absent or nothing of interest remains.
fn load_activity(paths: &StorePaths, compound: &str) -> Result<Option<ActivityTable>> {
    let path = paths.activity_path(compound);
    if !path.exists() {
        info!("File not found: {}", path.display());
        return Ok(None);
    }

    let table = read_activity_table(&path)?;
    let filtered = table.filter_kinds_of_interest();
    info!(
        compound = compound,
        rows = table.len(),
        remaining = filtered.len(),
        "Filtered activity data"
    );

    Ok(if filtered.is_empty() { None } else { Some(filtered) })
}
