//! Embedded viewer assets
//!
//! The page and script change with every release and are never cached. The
//! placeholder poster is shown on every card without a TMDB match, so browsers
//! may keep it for a day.

use axum::{
    http::header,
    response::{IntoResponse, Response},
};

const INDEX_HTML: &str = include_str!("../../ui/index.html");
const APP_JS: &str = include_str!("../../ui/app.js");
const PLACEHOLDER_SVG: &str = include_str!("../../ui/placeholder.svg");

const NO_CACHE: &str = "no-cache";
const CACHE_ONE_DAY: &str = "public, max-age=86400";

fn embedded(content_type: &'static str, cache: &'static str, body: &'static str) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, cache),
        ],
        body,
    )
        .into_response()
}

/// GET /
pub async fn serve_index() -> Response {
    embedded("text/html; charset=utf-8", NO_CACHE, INDEX_HTML)
}

/// GET /static/app.js
pub async fn serve_app_js() -> Response {
    embedded("application/javascript", NO_CACHE, APP_JS)
}

/// GET /static/placeholder.svg
pub async fn serve_placeholder() -> Response {
    embedded("image/svg+xml", CACHE_ONE_DAY, PLACEHOLDER_SVG)
}
