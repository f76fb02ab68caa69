//! ED50/TD50 comparison and distribution figures.

use std::collections::BTreeMap;

use dosescope_common::{capitalize, ActivityRecord, ActivityTable, MeasurementKind};
use tracing::{debug, info};

use crate::key::FigureKey;
use crate::plot::{Axis, BoxTrace, Figure, Layout, Marker, ScatterTrace, Trace};

pub type FigureSet = BTreeMap<FigureKey, Figure>;

const VALUE_AXIS: &str = "Standard Value (mg/kg)";
const KIND_AXIS: &str = "Measurement Type";

/// Builds the comparison and distribution figure for every compound that has
/// both ED50 and TD50 rows. Other compounds are left out without comment.
pub fn build_figures(tables: &BTreeMap<String, ActivityTable>) -> FigureSet {
    info!("Starting to create visualizations...");
    let mut figures = FigureSet::new();

    for (compound, table) in tables {
        if !table.has_all_kinds() {
            debug!(compound = %compound, "Skipping figures: ED50 or TD50 missing");
            continue;
        }

        figures.insert(FigureKey::comparison(compound), comparison_figure(compound, table));
        figures.insert(FigureKey::distribution(compound), distribution_figure(compound, table));
        debug!(compound = %compound, "ED50/TD50 figures created");
    }

    info!(figures = figures.len(), "Visualizations created successfully.");
    figures
}

fn values(rows: &[&ActivityRecord]) -> Vec<Option<f64>> {
    rows.iter().map(|r| r.standard_value).collect()
}

fn hover_text(rows: &[&ActivityRecord]) -> Vec<String> {
    rows.iter()
        .map(|r| r.assay_description.clone().unwrap_or_default())
        .collect()
}

/// One marker series per kind; x is the dose, y the kind's fixed lane.
pub fn comparison_figure(compound: &str, table: &ActivityTable) -> Figure {
    let mut fig = Figure::new(Layout {
        title: Some(format!("{}: ED50 vs TD50 by Target Organism", capitalize(compound)).into()),
        xaxis: Some(Axis::titled(VALUE_AXIS)),
        yaxis: Some(Axis {
            title: Some(KIND_AXIS.into()),
            tickmode: Some("array".to_string()),
            tickvals: Some(MeasurementKind::ALL.iter().map(|k| k.to_string()).collect()),
        }),
        hovermode: Some("closest".to_string()),
        barmode: None,
    });

    for kind in MeasurementKind::ALL {
        let rows: Vec<&ActivityRecord> = table.of_kind(kind).collect();
        fig.add_trace(Trace::Scatter(ScatterTrace {
            name: kind.to_string(),
            x: values(&rows),
            y: vec![kind.to_string(); rows.len()],
            mode: "markers".to_string(),
            marker: Some(Marker { size: Some(10), color: Some(kind.color().to_string()) }),
            text: hover_text(&rows),
            hoverinfo: Some("text+x+y".to_string()),
        }));
    }

    fig
}

/// One box per kind with every raw point drawn, jittered, beside the box.
pub fn distribution_figure(compound: &str, table: &ActivityTable) -> Figure {
    let mut fig = Figure::new(Layout {
        title: Some(format!("{}: Distribution of ED50 and TD50", capitalize(compound)).into()),
        xaxis: Some(Axis::titled(KIND_AXIS)),
        yaxis: Some(Axis::titled(VALUE_AXIS)),
        hovermode: Some("closest".to_string()),
        barmode: None,
    });

    for kind in MeasurementKind::ALL {
        let rows: Vec<&ActivityRecord> = table.of_kind(kind).collect();
        fig.add_trace(Trace::Box(BoxTrace {
            name: kind.to_string(),
            x: vec![kind.to_string(); rows.len()],
            y: values(&rows),
            boxpoints: Some("all".to_string()),
            jitter: Some(0.3),
            pointpos: Some(-1.8),
            marker: Some(Marker { size: None, color: Some(kind.color().to_string()) }),
            text: hover_text(&rows),
            hoverinfo: Some("text+x+y".to_string()),
        }));
    }

    fig
}
