//! Filter state
//!
//! [`apply`] is the pure filter over a movie list. [`FilterState`] owns the
//! current source list and selection and keeps the visible subset in sync
//! with both: every mutation recomputes it.

use std::sync::Arc;

use crate::model::{FilterSelection, GenreFilter, MovieId, MovieItem, YearFilter};

/// Movies matching `selection`, in source order
pub fn apply<'a>(movies: &'a [MovieItem], selection: &FilterSelection) -> Vec<&'a MovieItem> {
    movies.iter().filter(|m| selection.matches(m)).collect()
}

/// Like [`apply`] but yields positions in the source list
pub fn apply_ids(movies: &[MovieItem], selection: &FilterSelection) -> Vec<MovieId> {
    movies
        .iter()
        .enumerate()
        .filter(|(_, m)| selection.matches(m))
        .map(|(index, _)| MovieId(index))
        .collect()
}

/// Selection plus the subset of the current list it selects
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    movies: Arc<Vec<MovieItem>>,
    selection: FilterSelection,
    visible: Vec<MovieId>,
}

impl FilterState {
    /// State over `movies` with both dimensions at their sentinel
    pub fn new(movies: Arc<Vec<MovieItem>>) -> Self {
        let mut state = Self {
            movies,
            selection: FilterSelection::default(),
            visible: Vec::new(),
        };
        state.recompute();
        state
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn movies(&self) -> &Arc<Vec<MovieItem>> {
        &self.movies
    }

    pub fn set_selection(&mut self, selection: FilterSelection) {
        self.selection = selection;
        self.recompute();
    }

    pub fn set_year(&mut self, year: YearFilter) {
        self.selection.year = year;
        self.recompute();
    }

    pub fn set_genre(&mut self, genre: GenreFilter) {
        self.selection.genre = genre;
        self.recompute();
    }

    /// Swap in a freshly loaded list, keeping the current selection
    pub fn replace_movies(&mut self, movies: Arc<Vec<MovieItem>>) {
        self.movies = movies;
        self.recompute();
    }

    pub fn visible_ids(&self) -> &[MovieId] {
        &self.visible
    }

    pub fn visible(&self) -> impl Iterator<Item = (MovieId, &MovieItem)> + '_ {
        self.visible
            .iter()
            .filter_map(|id| self.movies.get(id.index()).map(|movie| (*id, movie)))
    }

    fn recompute(&mut self) {
        self.visible = apply_ids(&self.movies, &self.selection);
    }
}
