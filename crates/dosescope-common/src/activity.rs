//! Bioactivity measurements and the per-compound activity table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Measurement kinds of interest
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MeasurementKind {
    #[serde(rename = "ED50")]
    Ed50,
    #[serde(rename = "TD50")]
    Td50,
}

impl MeasurementKind {
    pub const ALL: [MeasurementKind; 2] = [MeasurementKind::Ed50, MeasurementKind::Td50];

    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementKind::Ed50 => "ED50",
            MeasurementKind::Td50 => "TD50",
        }
    }

    /// Marker colour used for this kind on every chart.
    pub fn color(&self) -> &'static str {
        match self {
            MeasurementKind::Ed50 => "rgba(135, 206, 250, .9)",
            MeasurementKind::Td50 => "rgba(255, 99, 71, .9)",
        }
    }

    /// Exact, case-sensitive match on a ChEMBL `standard_type`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ED50" => Some(MeasurementKind::Ed50),
            "TD50" => Some(MeasurementKind::Td50),
            _ => None,
        }
    }
}

impl std::fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ActivityRecord
// ---------------------------------------------------------------------------

/// One ChEMBL activity row. Field names double as the persisted CSV headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub activity_id: String,
    pub assay_description: Option<String>,
    pub standard_type: Option<String>,
    pub standard_value: Option<f64>,
    pub standard_units: Option<String>,
    pub target_organism: Option<String>,
    pub target_pref_name: Option<String>,
}

impl ActivityRecord {
    pub fn kind(&self) -> Option<MeasurementKind> {
        self.standard_type.as_deref().and_then(MeasurementKind::parse)
    }
}

// ---------------------------------------------------------------------------
// ActivityTable
// ---------------------------------------------------------------------------

/// Ordered activity rows for one compound.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityTable {
    rows: Vec<ActivityRecord>,
}

impl ActivityTable {
    pub fn new(rows: Vec<ActivityRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ActivityRecord] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<ActivityRecord> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keeps only rows whose `standard_type` is ED50 or TD50.
    pub fn filter_kinds_of_interest(&self) -> ActivityTable {
        ActivityTable::new(
            self.rows.iter().filter(|r| r.kind().is_some()).cloned().collect(),
        )
    }

    pub fn of_kind(&self, kind: MeasurementKind) -> impl Iterator<Item = &ActivityRecord> {
        self.rows.iter().filter(move |r| r.kind() == Some(kind))
    }

    pub fn has_kind(&self, kind: MeasurementKind) -> bool {
        self.of_kind(kind).next().is_some()
    }

    /// True when at least one row of every kind of interest is present.
    pub fn has_all_kinds(&self) -> bool {
        MeasurementKind::ALL.iter().all(|k| self.has_kind(*k))
    }

    /// Row count per non-null target organism, ordered by count descending
    /// and then by organism name.
    pub fn organism_counts(&self) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for organism in self.rows.iter().filter_map(|r| r.target_organism.as_deref()) {
            *counts.entry(organism).or_default() += 1;
        }

        let mut counts: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(organism, n)| (organism.to_string(), n))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }
}

impl From<Vec<ActivityRecord>> for ActivityTable {
    fn from(rows: Vec<ActivityRecord>) -> Self {
        Self::new(rows)
    }
}
