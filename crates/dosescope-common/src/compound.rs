//! Compound identity and the fixed-shape molecular property record.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Compound
// ---------------------------------------------------------------------------

/// One manifest row: a human-readable name plus its ChEMBL molecule ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compound {
    #[serde(rename = "compound_name")]
    pub name: String,
    pub chembl_id: String,
}

impl Compound {
    pub fn new(name: &str, chembl_id: &str) -> Self {
        Self {
            name: name.to_string(),
            chembl_id: chembl_id.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// DrugInfo
// ---------------------------------------------------------------------------

/// Molecular properties for a single compound.
///
/// Every field is optional: a property the remote service did not report is
/// kept as `None` and rendered as "N/A", never dropped. The serde names are
/// the column headers of `drug_info/{compound}_info.csv`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrugInfo {
    #[serde(rename = "Drug")]
    pub drug: Option<String>,
    #[serde(rename = "Molecular Formula")]
    pub molecular_formula: Option<String>,
    #[serde(rename = "Molecular Weight")]
    pub molecular_weight: Option<f64>,
    #[serde(rename = "XLogP")]
    pub xlogp: Option<f64>,
    #[serde(rename = "H-Bond Donor Count")]
    pub h_bond_donor_count: Option<u32>,
    #[serde(rename = "H-Bond Acceptor Count")]
    pub h_bond_acceptor_count: Option<u32>,
    #[serde(rename = "Exact Mass")]
    pub exact_mass: Option<f64>,
    #[serde(rename = "Topological Polar Surface Area (TPSA)")]
    pub tpsa: Option<f64>,
}

/// Placeholder shown for any property that is unavailable.
pub const NOT_AVAILABLE: &str = "N/A";

/// A labelled line of the property panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyLine {
    pub label: &'static str,
    pub value: String,
    pub unit: Option<&'static str>,
}

impl DrugInfo {
    /// A record with every property unavailable.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// The eight panel lines, each falling back to "N/A" independently.
    pub fn panel_lines(&self) -> Vec<PropertyLine> {
        fn show<T: ToString>(v: &Option<T>) -> String {
            v.as_ref()
                .map(|x| x.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        }

        vec![
            PropertyLine { label: "Drug",                 value: show(&self.drug),                  unit: None },
            PropertyLine { label: "Molecular Formula",    value: show(&self.molecular_formula),     unit: None },
            PropertyLine { label: "Molecular Weight",     value: show(&self.molecular_weight),      unit: Some("g/mol") },
            PropertyLine { label: "XLogP",                value: show(&self.xlogp),                 unit: None },
            PropertyLine { label: "H-Bond Donor Count",   value: show(&self.h_bond_donor_count),    unit: None },
            PropertyLine { label: "H-Bond Acceptor Count", value: show(&self.h_bond_acceptor_count), unit: None },
            PropertyLine { label: "Exact Mass",           value: show(&self.exact_mass),            unit: Some("g/mol") },
            PropertyLine { label: "Topological Polar Surface Area (TPSA)", value: show(&self.tpsa), unit: Some("Å²") },
        ]
    }
}

/// Upper-cases the first character and lower-cases the rest
/// ("phenytoin" -> "Phenytoin", "VPA" -> "Vpa").
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}
