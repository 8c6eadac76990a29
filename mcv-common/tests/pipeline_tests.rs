//! Integration tests for the catalogue pipeline
//!
//! The list endpoint and the TMDB search API are replaced by in-process axum
//! servers bound to an ephemeral port, so the real reqwest code paths run.
//!
//! Tests cover:
//! - List fetch retry on error-shaped body and on bad status
//! - Bounded retry giving up with RetriesExhausted
//! - Poster lookup absence (no results, auth failure, bad JSON, unreachable)
//! - Full load: placeholder substitution, ordering, facets

use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use mcv_common::catalogue::{CatalogueFetcher, RetryPolicy};
use mcv_common::config::PosterConfig;
use mcv_common::enrichment::PosterImages;
use mcv_common::pipeline::CatalogueLoader;
use mcv_common::posters::{PosterLookup, TmdbClient};
use mcv_common::{Error, GenreFilter, YearFilter};

const PLACEHOLDER: &str = "/static/placeholder.svg";
const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w342";
const API_KEY: &str = "test-key";

/// Test helper: Serve `router` on an ephemeral port, return its base URL
async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Should bind ephemeral port");
    let addr = listener.local_addr().expect("Should have local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    format!("http://{}", addr)
}

/// Test helper: Base URL on which nothing is listening
async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn movie_json(name: &str, year: i32, genre: &str) -> Value {
    json!({
        "name": name,
        "productionYear": year,
        "genre": genre,
        "synopsisShort": format!("{} in short", name),
        "synopsis": format!("<p>{} at <b>length</b></p>", name),
    })
}

fn two_movies() -> Value {
    json!([movie_json("Alien", 1979, "Horror"), movie_json("Brazil", 1985, "Comedy")])
}

fn fast_retry(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        initial_backoff: Duration::from_millis(1),
        max_backoff: Duration::from_millis(5),
    }
}

/// List endpoint that answers with `failure` for the first `failures` calls
async fn scripted_list_server(
    failures: usize,
    failure: fn() -> Response,
    list: Value,
) -> (String, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let router = Router::new().route(
        "/movies",
        get(move || {
            let counter = counter.clone();
            let list = list.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) < failures {
                    failure()
                } else {
                    Json(list).into_response()
                }
            }
        }),
    );
    let base = spawn_server(router).await;
    (format!("{}/movies", base), calls)
}

fn error_body() -> Response {
    Json(json!({ "message": "error" })).into_response()
}

fn unavailable() -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, Json(two_movies())).into_response()
}

fn garbage() -> Response {
    (StatusCode::OK, "<html>gateway timeout</html>").into_response()
}

/// Fake TMDB search endpoint
async fn tmdb_search(Query(params): Query<HashMap<String, String>>) -> Response {
    if params.get("api_key").map(String::as_str) != Some(API_KEY) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "status_code": 7, "status_message": "Invalid API key" })),
        )
            .into_response();
    }

    match params.get("query").map(String::as_str) {
        Some("Foo") => Json(json!({ "page": 1, "results": [] })).into_response(),
        Some("Broken") => (StatusCode::OK, "{ not json").into_response(),
        Some(title) => {
            let slug = title.to_lowercase().replace(' ', "-");
            Json(json!({
                "page": 1,
                "results": [
                    { "id": 1, "title": title, "poster_path": format!("/{}.jpg", slug) },
                    { "id": 2, "title": "Other", "poster_path": "/other.jpg" }
                ]
            }))
            .into_response()
        }
        None => (StatusCode::UNPROCESSABLE_ENTITY, "missing query").into_response(),
    }
}

async fn tmdb_config(api_key: &str) -> PosterConfig {
    let base = spawn_server(Router::new().route("/3/search/movie", get(tmdb_search))).await;
    PosterConfig {
        search_url: format!("{}/3/search/movie", base),
        api_key: api_key.to_string(),
        image_base_url: IMAGE_BASE.to_string(),
        placeholder_image: PLACEHOLDER.to_string(),
        request_timeout_secs: 5,
    }
}

// =============================================================================
// Catalogue Fetcher
// =============================================================================

#[tokio::test]
async fn test_fetch_retries_after_error_body() {
    let (url, calls) = scripted_list_server(1, error_body, two_movies()).await;
    let fetcher = CatalogueFetcher::new(url, fast_retry(5), Duration::from_secs(5)).unwrap();

    let movies = fetcher.fetch().await.expect("Retry should succeed");

    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].name, "Alien");
    assert_eq!(movies[1].name, "Brazil");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_fetch_retries_after_bad_status_and_garbage() {
    let (url, calls) = scripted_list_server(2, unavailable, two_movies()).await;
    let fetcher = CatalogueFetcher::new(url, fast_retry(5), Duration::from_secs(5)).unwrap();
    assert_eq!(fetcher.fetch().await.unwrap().len(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    let (url, calls) = scripted_list_server(1, garbage, two_movies()).await;
    let fetcher = CatalogueFetcher::new(url, fast_retry(5), Duration::from_secs(5)).unwrap();
    assert_eq!(fetcher.fetch().await.unwrap().len(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_fetch_returns_list_unmodified() {
    let (url, _calls) = scripted_list_server(0, error_body, two_movies()).await;
    let fetcher = CatalogueFetcher::new(url, fast_retry(1), Duration::from_secs(5)).unwrap();

    let movies = fetcher.fetch().await.unwrap();

    assert_eq!(movies[0].production_year, 1979);
    assert_eq!(movies[0].genre, "Horror");
    assert_eq!(movies[0].synopsis, "<p>Alien at <b>length</b></p>");
    assert!(movies.iter().all(|m| m.image.is_empty()));
}

#[tokio::test]
async fn test_fetch_gives_up_after_max_attempts() {
    let (url, calls) = scripted_list_server(usize::MAX, error_body, two_movies()).await;
    let fetcher = CatalogueFetcher::new(url, fast_retry(3), Duration::from_secs(5)).unwrap();

    let result = fetcher.fetch().await;

    match result {
        Err(Error::RetriesExhausted { attempts, last_error }) => {
            assert_eq!(attempts, 3);
            assert!(last_error.contains("error"));
        }
        other => panic!("Expected RetriesExhausted, got {:?}", other.map(|m| m.len())),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_fetch_unreachable_endpoint_gives_up() {
    let url = format!("{}/movies", dead_url().await);
    let fetcher = CatalogueFetcher::new(url, fast_retry(2), Duration::from_secs(2)).unwrap();

    assert!(matches!(
        fetcher.fetch().await,
        Err(Error::RetriesExhausted { attempts: 2, .. })
    ));
}

// =============================================================================
// Poster Resolver
// =============================================================================

#[tokio::test]
async fn test_resolve_first_result_poster() {
    let client = TmdbClient::new(&tmdb_config(API_KEY).await).unwrap();
    assert_eq!(client.resolve("Alien").await, Some("/alien.jpg".to_string()));
    assert_eq!(client.resolve("Blade Runner").await, Some("/blade-runner.jpg".to_string()));
}

#[tokio::test]
async fn test_resolve_absent_cases() {
    let client = TmdbClient::new(&tmdb_config(API_KEY).await).unwrap();
    assert_eq!(client.resolve("Foo").await, None);
    assert_eq!(client.resolve("Broken").await, None);

    let unauthorized = TmdbClient::new(&tmdb_config("wrong-key").await).unwrap();
    assert_eq!(unauthorized.resolve("Alien").await, None);

    let unreachable = TmdbClient::new(&PosterConfig {
        search_url: format!("{}/3/search/movie", dead_url().await),
        request_timeout_secs: 2,
        ..PosterConfig::default()
    })
    .unwrap();
    assert_eq!(unreachable.resolve("Alien").await, None);
}

// =============================================================================
// Full load
// =============================================================================

#[tokio::test]
async fn test_load_substitutes_placeholder_and_derives_facets() {
    let list = json!([
        movie_json("Alien", 1979, "Horror"),
        movie_json("Foo", 2001, "Drama"),
        movie_json("Brazil", 1985, "Comedy"),
        movie_json("Aliens", 1979, "Horror"),
    ]);
    let (url, _calls) = scripted_list_server(1, error_body, list).await;
    let fetcher = CatalogueFetcher::new(url, fast_retry(3), Duration::from_secs(5)).unwrap();
    let lookup = TmdbClient::new(&tmdb_config(API_KEY).await).unwrap();
    let loader = CatalogueLoader::new(fetcher, lookup, PosterImages::new(IMAGE_BASE, PLACEHOLDER));

    let catalogue = loader.load_catalogue(4).await.expect("Load should succeed");

    assert_eq!(catalogue.generation, 4);
    let names: Vec<_> = catalogue.movies.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Alien", "Foo", "Brazil", "Aliens"]);
    assert_eq!(catalogue.movies[0].image, format!("{}/alien.jpg", IMAGE_BASE));
    assert_eq!(catalogue.movies[1].image, PLACEHOLDER);
    assert!(catalogue.movies.iter().all(|m| !m.image.is_empty()));

    assert_eq!(
        catalogue.facets.years,
        vec![
            YearFilter::All,
            YearFilter::Year(1979),
            YearFilter::Year(1985),
            YearFilter::Year(2001),
        ]
    );
    assert_eq!(
        catalogue.facets.genres,
        vec![
            GenreFilter::All,
            GenreFilter::Genre("Horror".to_string()),
            GenreFilter::Genre("Drama".to_string()),
            GenreFilter::Genre("Comedy".to_string()),
        ]
    );
}
