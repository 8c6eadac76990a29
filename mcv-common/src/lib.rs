//! # MCV Common Library
//!
//! Shared code for the movie catalogue viewer including:
//! - Movie and filter data model
//! - Catalogue fetching with bounded retry
//! - TMDB poster lookup and enrichment
//! - Facet derivation and filter state
//! - Detail panel rendering
//! - Configuration loading

pub mod catalogue;
pub mod config;
pub mod detail;
pub mod enrichment;
pub mod error;
pub mod facets;
pub mod filter;
pub mod model;
pub mod pipeline;
pub mod posters;

pub use error::{Error, Result};
pub use model::{FilterSelection, GenreFilter, MovieFetchError, MovieId, MovieItem, YearFilter};
