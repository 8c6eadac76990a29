//! HTTP API handlers for mcv-ui

pub mod buildinfo;
pub mod catalogue;
pub mod detail;
pub mod error;
pub mod health;
pub mod refresh;
pub mod ui;

pub use buildinfo::get_build_info;
pub use catalogue::{get_catalogue, get_movie, list_movies, put_selection};
pub use detail::get_movie_detail;
pub use error::ApiError;
pub use health::health_routes;
pub use refresh::refresh_catalogue;
pub use ui::{serve_app_js, serve_index, serve_placeholder};
