//! Catalogue and filter endpoints
//!
//! `/api/catalogue` and `/api/selection` work on the session filter state;
//! `/api/movies` is a stateless filter over the installed catalogue.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use mcv_common::facets::Facets;
use mcv_common::filter::{self, FilterState};
use mcv_common::pipeline::Catalogue;
use mcv_common::{FilterSelection, GenreFilter, MovieId, MovieItem, YearFilter};

use crate::api::ApiError;
use crate::AppState;

/// Movie plus its position in the catalogue
#[derive(Debug, Clone, Serialize)]
pub struct MovieEntry {
    pub id: MovieId,
    #[serde(flatten)]
    pub movie: MovieItem,
}

/// Facets, session selection and the movies it selects
#[derive(Debug, Serialize)]
pub struct CatalogueResponse {
    pub generation: u64,
    #[serde(flatten)]
    pub facets: Facets,
    pub selection: FilterSelection,
    pub total: usize,
    pub movies: Vec<MovieEntry>,
}

impl CatalogueResponse {
    fn describe(catalogue: &Catalogue, filter: &FilterState) -> Self {
        let movies: Vec<MovieEntry> = filter
            .visible()
            .map(|(id, movie)| MovieEntry {
                id,
                movie: movie.clone(),
            })
            .collect();

        Self {
            generation: catalogue.generation,
            facets: catalogue.facets.clone(),
            selection: filter.selection().clone(),
            total: catalogue.len(),
            movies,
        }
    }
}

/// Body of PUT /api/selection; omitted fields keep their current value
#[derive(Debug, Default, Deserialize)]
pub struct SelectionUpdate {
    #[serde(default)]
    pub year: Option<YearFilter>,
    #[serde(default)]
    pub genre: Option<GenreFilter>,
}

/// Result of a stateless filter query
#[derive(Debug, Serialize)]
pub struct MoviesResponse {
    pub selection: FilterSelection,
    pub movies: Vec<MovieEntry>,
}

/// GET /api/catalogue
pub async fn get_catalogue(
    State(state): State<AppState>,
) -> Result<Json<CatalogueResponse>, ApiError> {
    state
        .read_session(CatalogueResponse::describe)
        .await
        .map(Json)
        .ok_or(ApiError::NotLoaded)
}

/// PUT /api/selection
pub async fn put_selection(
    State(state): State<AppState>,
    Json(update): Json<SelectionUpdate>,
) -> Result<Json<CatalogueResponse>, ApiError> {
    state
        .update_session(|catalogue, filter| {
            if let Some(year) = update.year {
                filter.set_year(year);
            }
            if let Some(genre) = update.genre {
                filter.set_genre(genre);
            }
            tracing::debug!(
                year = %filter.selection().year,
                genre = %filter.selection().genre,
                visible = filter.visible_ids().len(),
                "Selection changed"
            );
            CatalogueResponse::describe(catalogue, filter)
        })
        .await
        .map(Json)
        .ok_or(ApiError::NotLoaded)
}

/// GET /api/movies?year=&genre=
///
/// Unparseable years are treated as "All Years".
pub async fn list_movies(
    State(state): State<AppState>,
    Query(selection): Query<FilterSelection>,
) -> Result<Json<MoviesResponse>, ApiError> {
    let catalogue = state.catalogue().await.ok_or(ApiError::NotLoaded)?;

    let movies = filter::apply_ids(&catalogue.movies, &selection)
        .into_iter()
        .filter_map(|id| {
            catalogue.movie(id).map(|movie| MovieEntry {
                id,
                movie: movie.clone(),
            })
        })
        .collect();

    Ok(Json(MoviesResponse { selection, movies }))
}

/// GET /api/movies/:id
pub async fn get_movie(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<MovieEntry>, ApiError> {
    let catalogue = state.catalogue().await.ok_or(ApiError::NotLoaded)?;
    let id = MovieId(index);

    catalogue
        .movie(id)
        .map(|movie| {
            Json(MovieEntry {
                id,
                movie: movie.clone(),
            })
        })
        .ok_or_else(|| ApiError::NotFound(format!("movie {}", id)))
}
