//! Shared viewer state
//!
//! Holds the installed catalogue and the session filter state. Loads are
//! numbered; a finished load is installed only when it is newer than the
//! catalogue already installed, so a slow earlier load cannot overwrite a
//! later one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use mcv_common::filter::FilterState;
use mcv_common::pipeline::{Catalogue, CatalogueSource};
use mcv_common::Result;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    catalogue: Arc<RwLock<Option<Arc<Catalogue>>>>,
    filter: Arc<RwLock<FilterState>>,
    source: Arc<dyn CatalogueSource>,
    next_generation: Arc<AtomicU64>,
}

/// Outcome of one refresh
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    /// Catalogue current after the refresh
    pub catalogue: Arc<Catalogue>,
    /// False when the loaded catalogue was discarded as stale
    pub installed: bool,
}

impl AppState {
    pub fn new(source: Arc<dyn CatalogueSource>) -> Self {
        Self {
            catalogue: Arc::new(RwLock::new(None)),
            filter: Arc::new(RwLock::new(FilterState::default())),
            source,
            next_generation: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Reserve the generation number for a new load
    pub fn begin_load(&self) -> u64 {
        self.next_generation.fetch_add(1, Ordering::SeqCst)
    }

    /// Run the pipeline and install the result if it is still the newest
    pub async fn refresh(&self) -> Result<RefreshOutcome> {
        let generation = self.begin_load();
        let catalogue = self.source.load(generation).await?;
        Ok(self.install(catalogue).await)
    }

    /// Install `catalogue` unless a newer one is already in place
    pub async fn install(&self, catalogue: Catalogue) -> RefreshOutcome {
        let mut current = self.catalogue.write().await;

        if let Some(existing) = current.as_ref() {
            if existing.generation >= catalogue.generation {
                tracing::debug!(
                    stale = catalogue.generation,
                    installed = existing.generation,
                    "Discarding stale catalogue"
                );
                return RefreshOutcome {
                    catalogue: existing.clone(),
                    installed: false,
                };
            }
        }

        let catalogue = Arc::new(catalogue);
        self.filter
            .write()
            .await
            .replace_movies(catalogue.movies.clone());
        *current = Some(catalogue.clone());

        tracing::info!(
            generation = catalogue.generation,
            movies = catalogue.len(),
            "Installed catalogue"
        );

        RefreshOutcome {
            catalogue,
            installed: true,
        }
    }

    /// Currently installed catalogue, if any load has completed
    pub async fn catalogue(&self) -> Option<Arc<Catalogue>> {
        self.catalogue.read().await.clone()
    }

    /// Read the installed catalogue together with the session filter
    ///
    /// Both are read under the catalogue lock, so they always belong to the
    /// same load. Returns `None` until the first load is installed.
    pub async fn read_session<R>(&self, f: impl FnOnce(&Catalogue, &FilterState) -> R) -> Option<R> {
        let current = self.catalogue.read().await;
        let catalogue = current.as_deref()?;
        let filter = self.filter.read().await;
        Some(f(catalogue, &filter))
    }

    /// Mutate the session filter; same locking as [`AppState::read_session`]
    pub async fn update_session<R>(
        &self,
        f: impl FnOnce(&Catalogue, &mut FilterState) -> R,
    ) -> Option<R> {
        let current = self.catalogue.read().await;
        let catalogue = current.as_deref()?;
        let mut filter = self.filter.write().await;
        Some(f(catalogue, &mut filter))
    }
}
