//! mcv-ui library - movie catalogue viewer service
//!
//! Serves the viewer page and the JSON/HTML endpoints it talks to.

use axum::Router;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod cli;
pub mod state;

pub use state::{AppState, RefreshOutcome};

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post, put};

    let api = Router::new()
        .route("/api/catalogue", get(api::get_catalogue))
        .route("/api/selection", put(api::put_selection))
        .route("/api/movies", get(api::list_movies))
        .route("/api/movies/:id", get(api::get_movie))
        .route("/api/refresh", post(api::refresh_catalogue))
        .route("/api/buildinfo", get(api::get_build_info))
        .route("/movies/:id", get(api::get_movie_detail));

    let ui = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .route("/static/placeholder.svg", get(api::serve_placeholder))
        .merge(api::health_routes());

    Router::new()
        .merge(api)
        .merge(ui)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
