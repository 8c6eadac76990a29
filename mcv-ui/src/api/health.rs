//! Liveness plus catalogue readiness

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// The service is "ok" as soon as it listens; `catalogue` says whether a
/// list has been installed yet
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    pub catalogue: CatalogueStatus,
}

#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CatalogueStatus {
    Loading,
    Ready { generation: u64, movies: usize },
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let catalogue = match state.catalogue().await {
        Some(catalogue) => CatalogueStatus::Ready {
            generation: catalogue.generation,
            movies: catalogue.len(),
        },
        None => CatalogueStatus::Loading,
    };

    Json(HealthResponse {
        status: "ok",
        module: "mcv-ui",
        version: env!("CARGO_PKG_VERSION"),
        catalogue,
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
