//! Catalogue reload endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// Generation of the catalogue now installed
    pub generation: u64,
    pub movies: usize,
    /// False when a newer load finished first and this one was discarded
    pub installed: bool,
}

/// POST /api/refresh
///
/// Runs the full pipeline again. Answers 502 when the list endpoint keeps
/// failing; the previously installed catalogue stays in place.
pub async fn refresh_catalogue(
    State(state): State<AppState>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let outcome = state.refresh().await.map_err(|e| {
        tracing::error!(error = %e, "Catalogue refresh failed");
        ApiError::from(e)
    })?;

    Ok(Json(RefreshResponse {
        generation: outcome.catalogue.generation,
        movies: outcome.catalogue.len(),
        installed: outcome.installed,
    }))
}
