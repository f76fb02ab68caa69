//! Axum router: maps all URL paths to handlers.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    api::{api_compound_info, api_figure, api_figures, api_organisms},
    home::home_page,
    organisms::organisms_page,
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Pages
        .route("/",          get(home_page))
        .route("/organisms", get(organisms_page))

        // API endpoints
        .route("/api/figures",               get(api_figures))
        .route("/api/figures/{key}",         get(api_figure))
        .route("/api/compounds/{name}/info", get(api_compound_info))
        .route("/api/organisms",             get(api_organisms))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
