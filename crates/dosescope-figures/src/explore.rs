//! Exploratory views over a compound's unfiltered activity table.
//!
//! These are for a first look at freshly gathered data, so every
//! `standard_type` is plotted, not just ED50/TD50.

use std::collections::BTreeMap;

use dosescope_common::{ActivityRecord, ActivityTable};

use crate::plot::{Axis, BarTrace, BoxTrace, Figure, Layout, ScatterTrace, Trace};

const UNKNOWN_ORGANISM: &str = "Unknown";

/// A named exploratory figure; `name` is used as the export file stem.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorationFigure {
    pub name: String,
    pub figure: Figure,
}

pub fn build_exploration_figures(compound: &str, table: &ActivityTable) -> Vec<ExplorationFigure> {
    vec![
        ExplorationFigure {
            name: format!("{}_value_by_type", compound),
            figure: value_by_type_scatter(compound, table),
        },
        ExplorationFigure {
            name: format!("{}_value_distribution", compound),
            figure: value_distribution_box(compound, table),
        },
        ExplorationFigure {
            name: format!("{}_organism_counts", compound),
            figure: organism_count_bar(compound, table),
        },
    ]
}

fn organism_label(record: &ActivityRecord) -> &str {
    record.target_organism.as_deref().unwrap_or(UNKNOWN_ORGANISM)
}

fn type_label(record: &ActivityRecord) -> String {
    record.standard_type.clone().unwrap_or_default()
}

/// Rows grouped by organism label, groups in name order, rows in input order.
fn group_by_organism(table: &ActivityTable) -> BTreeMap<&str, Vec<&ActivityRecord>> {
    let mut groups: BTreeMap<&str, Vec<&ActivityRecord>> = BTreeMap::new();
    for record in table.rows() {
        groups.entry(organism_label(record)).or_default().push(record);
    }
    groups
}

fn value_by_type_scatter(compound: &str, table: &ActivityTable) -> Figure {
    let mut fig = Figure::new(Layout {
        title: Some(
            format!("Standard Value vs. Standard Type by Target Organism for {}", compound).into(),
        ),
        xaxis: Some(Axis::titled("Standard Value")),
        yaxis: Some(Axis::titled("Standard Type")),
        hovermode: Some("closest".to_string()),
        barmode: None,
    });

    for (organism, rows) in group_by_organism(table) {
        fig.add_trace(Trace::Scatter(ScatterTrace {
            name: organism.to_string(),
            x: rows.iter().map(|r| r.standard_value).collect(),
            y: rows.iter().map(|r| type_label(r)).collect(),
            mode: "markers".to_string(),
            marker: None,
            text: rows.iter().map(|r| r.assay_description.clone().unwrap_or_default()).collect(),
            hoverinfo: Some("text+x+y".to_string()),
        }));
    }

    fig
}

fn value_distribution_box(compound: &str, table: &ActivityTable) -> Figure {
    let mut fig = Figure::new(Layout {
        title: Some(
            format!("Distribution of Standard Values by Standard Type for {}", compound).into(),
        ),
        xaxis: Some(Axis::titled("Standard Type")),
        yaxis: Some(Axis::titled("Standard Value")),
        hovermode: None,
        barmode: None,
    });

    let rows = table.rows();
    fig.add_trace(Trace::Box(BoxTrace {
        name: compound.to_string(),
        x: rows.iter().map(type_label).collect(),
        y: rows.iter().map(|r| r.standard_value).collect(),
        boxpoints: None,
        jitter: None,
        pointpos: None,
        marker: None,
        text: Vec::new(),
        hoverinfo: None,
    }));

    fig
}

fn organism_count_bar(compound: &str, table: &ActivityTable) -> Figure {
    let mut fig = Figure::new(Layout {
        title: Some(format!("Count of Activities by Target Organism for {}", compound).into()),
        xaxis: Some(Axis::titled("Target Organism")),
        yaxis: Some(Axis::titled("Count")),
        hovermode: None,
        barmode: None,
    });

    let groups = group_by_organism(table);
    fig.add_trace(Trace::Bar(BarTrace {
        name: None,
        x: groups.keys().map(|k| k.to_string()).collect(),
        y: groups.values().map(Vec::len).collect(),
    }));

    fig
}
