//! Facet derivation
//!
//! Years: sentinel first, then the distinct years in ascending order.
//! Genres: sentinel first, then the distinct genres in first-occurrence order.

use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

use crate::model::{GenreFilter, MovieItem, YearFilter};

/// Filter options offered for one catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub years: Vec<YearFilter>,
    pub genres: Vec<GenreFilter>,
}

impl Default for Facets {
    fn default() -> Self {
        Self {
            years: vec![YearFilter::All],
            genres: vec![GenreFilter::All],
        }
    }
}

pub fn derive_facets(movies: &[MovieItem]) -> Facets {
    let distinct_years: BTreeSet<i32> = movies.iter().map(|m| m.production_year).collect();

    let mut years = Vec::with_capacity(distinct_years.len() + 1);
    years.push(YearFilter::All);
    years.extend(distinct_years.into_iter().map(YearFilter::Year));

    let mut seen = HashSet::new();
    let mut genres = vec![GenreFilter::All];
    for movie in movies {
        if seen.insert(movie.genre.as_str()) {
            genres.push(GenreFilter::Genre(movie.genre.clone()));
        }
    }

    Facets { years, genres }
}
