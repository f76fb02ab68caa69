//! Per-compound CSV persistence.
//!
//! Layout:
//!   {data_dir}/{compound}_activity_data.csv   one row per activity
//!   {info_dir}/{compound}_info.csv            a single DrugInfo row

use std::fs;
use std::path::{Path, PathBuf};

use dosescope_common::{ActivityRecord, ActivityTable, DrugInfo, Result};
use tracing::debug;

const ACTIVITY_SUFFIX: &str = "_activity_data.csv";

/// Directories the gather pass writes to and the run pass reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub data_dir: PathBuf,
    pub info_dir: PathBuf,
}

impl StorePaths {
    pub fn new(data_dir: impl Into<PathBuf>, info_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into(), info_dir: info_dir.into() }
    }

    pub fn activity_path(&self, compound: &str) -> PathBuf {
        self.data_dir.join(format!("{}{}", compound, ACTIVITY_SUFFIX))
    }

    pub fn info_path(&self, compound: &str) -> PathBuf {
        self.info_dir.join(format!("{}_info.csv", compound))
    }

    /// Compound names with an activity file in `data_dir`, sorted. A missing
    /// directory yields an empty list.
    pub fn discover_compounds(&self) -> Result<Vec<String>> {
        if !self.data_dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.data_dir)? {
            let file_name = entry?.file_name();
            if let Some(name) = file_name.to_str().and_then(|f| f.strip_suffix(ACTIVITY_SUFFIX)) {
                if !name.is_empty() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        fs::create_dir_all(&self.info_dir)?;
        Ok(())
    }
}

impl Default for StorePaths {
    fn default() -> Self {
        Self::new("data", "drug_info")
    }
}

pub fn write_activity_table(path: &Path, table: &ActivityTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in table.rows() {
        writer.serialize(row)?;
    }
    writer.flush()?;
    debug!(path = %path.display(), rows = table.len(), "Wrote activity table");
    Ok(())
}

pub fn read_activity_table(path: &Path) -> Result<ActivityTable> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for result in reader.deserialize::<ActivityRecord>() {
        rows.push(result?);
    }
    Ok(ActivityTable::new(rows))
}

pub fn write_drug_info(path: &Path, info: &DrugInfo) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.serialize(info)?;
    writer.flush()?;
    debug!(path = %path.display(), "Wrote drug info");
    Ok(())
}

/// First data row of an info file, or `None` if the file has no rows.
pub fn read_drug_info(path: &Path) -> Result<Option<DrugInfo>> {
    let mut reader = csv::Reader::from_path(path)?;
    let first = reader.deserialize::<DrugInfo>().next().transpose()?;
    Ok(first)
}
