//! JSON endpoints over the same in-memory dataset as the pages.

use axum::{
    extract::{Path, State},
    Json,
};
use dosescope_common::DrugInfo;
use dosescope_figures::{build_organism_summary, Figure, FigureKey, OrganismCount};
use serde::Serialize;

use crate::error::ApiError;
use crate::handlers::home::resolve_key;
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct OrganismSummary {
    pub rows: Vec<OrganismCount>,
    pub figure: Figure,
}

/// GET /api/figures - all figure keys
pub async fn api_figures(State(state): State<SharedState>) -> Json<Vec<FigureKey>> {
    Json(state.figures.keys().cloned().collect())
}

/// GET /api/figures/{key}
pub async fn api_figure(
    State(state): State<SharedState>,
    Path(key): Path<String>,
) -> Result<Json<Figure>, ApiError> {
    let key = resolve_key(&state, Some(&key))?;
    state
        .figures
        .get(&key)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::UnknownFigure(key.to_string()))
}

/// GET /api/compounds/{name}/info - unavailable fields are null
pub async fn api_compound_info(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<DrugInfo>, ApiError> {
    if !state.knows_compound(&name) {
        return Err(ApiError::UnknownCompound(name));
    }
    Ok(Json(state.info_for(&name)))
}

/// GET /api/organisms
pub async fn api_organisms(State(state): State<SharedState>) -> Json<OrganismSummary> {
    let (rows, figure) = build_organism_summary(&state.activities);
    Json(OrganismSummary { rows, figure })
}
