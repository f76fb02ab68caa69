//! Home page: figure selector, the selected figure and the property panel.

use axum::{
    extract::{Query, State},
    response::Html,
};
use dosescope_common::{capitalize, compound::NOT_AVAILABLE};
use dosescope_figures::{FigureKey, FigureView};
use minijinja::context;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Deserialize, Default)]
pub struct HomeQuery {
    pub figure: Option<String>,
}

#[derive(Debug, Serialize)]
struct SelectOption {
    value: String,
    label: String,
    selected: bool,
}

#[derive(Debug, Serialize)]
struct ToggleLink {
    key: String,
    label: &'static str,
}

/// Resolves the requested key, or the first comparison key when none is given.
pub fn resolve_key(state: &SharedState, requested: Option<&str>) -> Result<FigureKey, ApiError> {
    let key = match requested {
        Some(raw) => raw
            .parse::<FigureKey>()
            .map_err(|_| ApiError::UnknownFigure(raw.to_string()))?,
        None => state.default_key().cloned().ok_or(ApiError::NoFigures)?,
    };

    if state.figures.contains_key(&key) {
        Ok(key)
    } else {
        Err(ApiError::UnknownFigure(key.to_string()))
    }
}

/// GET /?figure={key}
pub async fn home_page(
    State(state): State<SharedState>,
    Query(query): Query<HomeQuery>,
) -> Result<Html<String>, ApiError> {
    let key = resolve_key(&state, query.figure.as_deref())?;
    let figure = state
        .figures
        .get(&key)
        .ok_or_else(|| ApiError::UnknownFigure(key.to_string()))?;
    debug!(figure = %key, "Rendering home page");

    // The dropdown always shows the compound, whichever view is open.
    let selected_compound = &key.compound;
    let options: Vec<SelectOption> = state
        .comparison_keys()
        .map(|k| SelectOption {
            value: k.to_string(),
            label: format!("{} - ED50 vs TD50", capitalize(&k.compound)),
            selected: &k.compound == selected_compound,
        })
        .collect();

    let toggle = ToggleLink {
        key: key.sibling().to_string(),
        label: match key.view {
            FigureView::Comparison => "Show distribution",
            FigureView::Distribution => "Show ED50 vs TD50",
        },
    };

    let panel = state.info_for(&key.compound).panel_lines();
    let title = figure
        .layout
        .title
        .as_ref()
        .map(|t| t.text.clone())
        .unwrap_or_else(|| key.to_string());

    let html = state.render(
        "home.html",
        context! {
            page => "home",
            title,
            options,
            toggle,
            panel,
            figure,
            na => NOT_AVAILABLE,
        },
    )?;
    Ok(Html(html))
}
