//! Organism test-count page.

use axum::{extract::State, response::Html};
use dosescope_figures::build_organism_summary;
use minijinja::context;

use crate::error::ApiError;
use crate::state::SharedState;

/// GET /organisms
///
/// The summary is rebuilt from the loaded tables on every request.
pub async fn organisms_page(State(state): State<SharedState>) -> Result<Html<String>, ApiError> {
    let (rows, figure) = build_organism_summary(&state.activities);
    let html = state.render(
        "organisms.html",
        context! { page => "organisms", rows, figure },
    )?;
    Ok(Html(html))
}
