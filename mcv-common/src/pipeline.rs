//! Catalogue load pipeline
//!
//! One load = fetch the list, enrich it with posters, derive the facets.
//! The result is an immutable [`Catalogue`] snapshot tagged with the load
//! generation that produced it.

use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Instant;

use crate::catalogue::CatalogueFetcher;
use crate::config::TomlConfig;
use crate::enrichment::{self, PosterImages};
use crate::facets::{derive_facets, Facets};
use crate::model::{MovieId, MovieItem};
use crate::posters::{PosterLookup, TmdbClient};
use crate::Result;

/// Snapshot of one successful load
#[derive(Debug, Clone)]
pub struct Catalogue {
    pub generation: u64,
    pub movies: Arc<Vec<MovieItem>>,
    pub facets: Facets,
}

impl Catalogue {
    /// Wrap an enriched list; facets are derived here, once
    pub fn new(generation: u64, movies: Vec<MovieItem>) -> Self {
        let facets = derive_facets(&movies);
        Self {
            generation,
            movies: Arc::new(movies),
            facets,
        }
    }

    pub fn movie(&self, id: MovieId) -> Option<&MovieItem> {
        self.movies.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

/// Anything that can produce a catalogue for a given generation
pub trait CatalogueSource: Send + Sync {
    fn load(&self, generation: u64) -> BoxFuture<'_, Result<Catalogue>>;
}

/// Production pipeline: list endpoint + poster lookup
pub struct CatalogueLoader<L = TmdbClient> {
    fetcher: CatalogueFetcher,
    lookup: L,
    images: PosterImages,
}

impl CatalogueLoader<TmdbClient> {
    pub fn from_config(config: &TomlConfig) -> Result<Self> {
        let fetcher = CatalogueFetcher::new(
            config.catalogue.list_url.clone(),
            config.catalogue.retry_policy(),
            config.catalogue.request_timeout(),
        )?;
        let lookup = TmdbClient::new(&config.posters)?;
        let images = PosterImages::from_config(&config.posters);
        Ok(Self::new(fetcher, lookup, images))
    }
}

impl<L: PosterLookup> CatalogueLoader<L> {
    pub fn new(fetcher: CatalogueFetcher, lookup: L, images: PosterImages) -> Self {
        Self {
            fetcher,
            lookup,
            images,
        }
    }

    /// Fetch, enrich and index the catalogue
    pub async fn load_catalogue(&self, generation: u64) -> Result<Catalogue> {
        let started = Instant::now();
        tracing::info!(generation, url = %self.fetcher.list_url(), "Loading catalogue");

        let raw = self.fetcher.fetch().await?;
        let movies = enrichment::merge(raw, &self.lookup, &self.images).await;
        let catalogue = Catalogue::new(generation, movies);

        tracing::info!(
            generation,
            movies = catalogue.len(),
            years = catalogue.facets.years.len() - 1,
            genres = catalogue.facets.genres.len() - 1,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Catalogue loaded"
        );

        Ok(catalogue)
    }
}

impl<L: PosterLookup> CatalogueSource for CatalogueLoader<L> {
    fn load(&self, generation: u64) -> BoxFuture<'_, Result<Catalogue>> {
        Box::pin(self.load_catalogue(generation))
    }
}
