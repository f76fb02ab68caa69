//! Compound manifest loading.
//!
//! The manifest is a CSV with `compound_name,chembl_id` headers, one row per
//! compound. It drives the gather pass and names the compounds the run pass
//! looks for.

use std::path::Path;

use dosescope_common::{Compound, DoseError, Result};
use tracing::info;

/// Reads the manifest, returning its rows and the compound names in file
/// order. A missing or malformed file is a `ManifestRead` error.
pub fn load_manifest(path: &Path) -> Result<(Vec<Compound>, Vec<String>)> {
    info!("Loading compound list from {}", path.display());

    let manifest_err = |reason: String| DoseError::ManifestRead {
        path: path.display().to_string(),
        reason,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| manifest_err(e.to_string()))?;

    let mut compounds = Vec::new();
    for (line, result) in reader.deserialize::<Compound>().enumerate() {
        let compound = result.map_err(|e| manifest_err(format!("row {}: {}", line + 1, e)))?;
        if compound.name.is_empty() {
            return Err(manifest_err(format!("row {}: empty compound_name", line + 1)));
        }
        compounds.push(compound);
    }

    let names = compounds.iter().map(|c| c.name.clone()).collect::<Vec<_>>();
    info!("Loaded {} compounds.", names.len());
    Ok((compounds, names))
}
