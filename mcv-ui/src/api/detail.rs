//! Movie detail panel endpoint
//!
//! Renders the dialog content server-side so the full synopsis markup is
//! emitted as markup while everything else is escaped.

use axum::{
    extract::{Path, Query, State},
    response::Html,
};
use serde::Deserialize;

use mcv_common::detail::DetailView;
use mcv_common::MovieId;

use crate::api::ApiError;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct DetailQuery {
    /// Show the full synopsis; every newly opened panel starts collapsed
    #[serde(default)]
    pub expanded: bool,
}

/// GET /movies/:id?expanded=bool
pub async fn get_movie_detail(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Query(query): Query<DetailQuery>,
) -> Result<Html<String>, ApiError> {
    let catalogue = state.catalogue().await.ok_or(ApiError::NotLoaded)?;
    let id = MovieId(index);
    let movie = catalogue
        .movie(id)
        .ok_or_else(|| ApiError::NotFound(format!("movie {}", id)))?;

    let view = DetailView::new(id, movie).with_expanded(query.expanded);
    Ok(Html(view.render_html()))
}
