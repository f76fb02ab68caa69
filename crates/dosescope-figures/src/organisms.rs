//! Organism test-count summary shared by the organism page and the API.

use std::collections::BTreeMap;

use dosescope_common::{capitalize, ActivityTable};
use serde::Serialize;

use crate::plot::{Axis, BarTrace, Figure, Layout, Trace};

/// One row of the summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrganismCount {
    #[serde(rename = "Compound")]
    pub compound: String,
    #[serde(rename = "Organism")]
    pub organism: String,
    #[serde(rename = "Test Count")]
    pub test_count: usize,
}

/// Counts rows per non-null target organism for every compound and returns
/// the flattened table plus a grouped bar chart with one trace per compound.
pub fn build_organism_summary(
    tables: &BTreeMap<String, ActivityTable>,
) -> (Vec<OrganismCount>, Figure) {
    let mut rows = Vec::new();
    let mut fig = Figure::new(Layout {
        title: Some("Test Counts by Organism and Drug".into()),
        xaxis: Some(Axis::titled("Organism")),
        yaxis: Some(Axis::titled("Test Count")),
        hovermode: None,
        barmode: Some("group".to_string()),
    });

    for (compound, table) in tables {
        let display = capitalize(compound);
        let counts = table.organism_counts();
        if counts.is_empty() {
            continue;
        }

        fig.add_trace(Trace::Bar(BarTrace {
            name: Some(display.clone()),
            x: counts.iter().map(|(organism, _)| organism.clone()).collect(),
            y: counts.iter().map(|(_, n)| *n).collect(),
        }));

        rows.extend(counts.into_iter().map(|(organism, test_count)| OrganismCount {
            compound: display.clone(),
            organism,
            test_count,
        }));
    }

    (rows, fig)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dosescope_common::ActivityRecord;

    fn row(id: usize, organism: Option<&str>) -> ActivityRecord {
        ActivityRecord {
            activity_id: id.to_string(),
            assay_description: None,
            standard_type: Some(if id % 2 == 0 { "ED50" } else { "TD50" }.to_string()),
            standard_value: Some(id as f64),
            standard_units: None,
            target_organism: organism.map(String::from),
            target_pref_name: None,
        }
    }

    #[test]
    fn test_counts_sum_to_rows_with_organism() {
        let organisms = [Some("Mus musculus"), None, Some("Rattus norvegicus"), Some("Mus musculus"), None];
        let table: ActivityTable = organisms
            .iter()
            .enumerate()
            .map(|(i, o)| row(i, *o))
            .collect::<Vec<_>>()
            .into();
        let tables = BTreeMap::from([("carbamazepine".to_string(), table)]);

        let (rows, fig) = build_organism_summary(&tables);
        let total: usize = rows.iter().map(|r| r.test_count).sum();
        assert_eq!(total, 3);
        assert_eq!(
            rows[0],
            OrganismCount {
                compound: "Carbamazepine".to_string(),
                organism: "Mus musculus".to_string(),
                test_count: 2,
            }
        );
        assert_eq!(fig.data.len(), 1);
        assert_eq!(fig.data[0].name(), Some("Carbamazepine"));
    }

    #[test]
    fn test_compound_without_organisms_gets_no_series() {
        let tables = BTreeMap::from([
            ("x".to_string(), ActivityTable::new(vec![row(0, None), row(1, None)])),
            ("y".to_string(), ActivityTable::new(vec![row(2, Some("Mus musculus"))])),
        ]);

        let (rows, fig) = build_organism_summary(&tables);
        assert_eq!(rows.len(), 1);
        assert_eq!(fig.data.len(), 1);
        assert_eq!(fig.data[0].name(), Some("Y"));
    }

    #[test]
    fn test_summary_is_independent_of_row_order() {
        let forward: Vec<ActivityRecord> = ["A", "B", "B", "C", "C", "C"]
            .iter()
            .enumerate()
            .map(|(i, o)| row(i, Some(o)))
            .collect();
        let mut reversed = forward.clone();
        reversed.reverse();

        let a = build_organism_summary(&BTreeMap::from([("x".to_string(), forward.into())]));
        let b = build_organism_summary(&BTreeMap::from([("x".to_string(), reversed.into())]));
        assert_eq!(a.0, b.0);
        assert_eq!(a.0.iter().map(|r| r.organism.as_str()).collect::<Vec<_>>(), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_row_serialises_with_display_headers() {
        let json = serde_json::to_value(OrganismCount {
            compound: "X".to_string(),
            organism: "Homo sapiens".to_string(),
            test_count: 4,
        })
        .unwrap();
        assert_eq!(json["Test Count"], 4);
        assert_eq!(json["Organism"], "Homo sapiens");
    }
}
