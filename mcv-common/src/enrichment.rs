//! Poster enrichment
//!
//! Fans out one poster lookup per movie, waits for all of them, then fills
//! every movie's `image` with either the poster URL or the placeholder.
//! Output order and length always match the input.

use futures::future::join_all;

use crate::config::PosterConfig;
use crate::model::MovieItem;
use crate::posters::PosterLookup;

/// Builds displayable image URLs from poster paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterImages {
    base_url: String,
    placeholder: String,
}

impl PosterImages {
    pub fn new(base_url: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            placeholder: placeholder.into(),
        }
    }

    pub fn from_config(config: &PosterConfig) -> Self {
        Self::new(&config.image_base_url, &config.placeholder_image)
    }

    /// Join the base URL and a poster path with exactly one `/`
    pub fn poster_url(&self, poster_path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            poster_path.trim_start_matches('/')
        )
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    fn image_for(&self, poster_path: Option<String>) -> String {
        match poster_path {
            Some(path) => self.poster_url(&path),
            None => self.placeholder.clone(),
        }
    }
}

/// Attach a poster image to every movie
pub async fn merge<L: PosterLookup>(
    raw: Vec<MovieItem>,
    lookup: &L,
    images: &PosterImages,
) -> Vec<MovieItem> {
    let poster_paths = join_all(raw.iter().map(|movie| lookup.resolve(&movie.name))).await;

    let found = poster_paths.iter().filter(|path| path.is_some()).count();
    tracing::info!(
        movies = raw.len(),
        posters = found,
        placeholders = raw.len() - found,
        "Poster enrichment complete"
    );

    raw.into_iter()
        .zip(poster_paths)
        .map(|(movie, poster_path)| MovieItem {
            image: images.image_for(poster_path),
            ..movie
        })
        .collect()
}
