//! API error responses
//!
//! Every handler error becomes a JSON body `{ "error": message }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use mcv_common::Error;

#[derive(Debug)]
pub enum ApiError {
    /// No catalogue has been installed yet
    NotLoaded,
    NotFound(String),
    /// The list endpoint could not be read
    Upstream(String),
    Internal(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            e @ Error::RetriesExhausted { .. } => ApiError::Upstream(e.to_string()),
            e @ (Error::Config(_) | Error::Http(_)) => ApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotLoaded => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Catalogue is still loading".to_string(),
            ),
            ApiError::NotFound(what) => (StatusCode::NOT_FOUND, format!("Not found: {}", what)),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Internal error: {}", msg))
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_errors_map_to_status() {
        let exhausted = ApiError::from(Error::RetriesExhausted {
            attempts: 5,
            last_error: "status 503".to_string(),
        });
        assert_eq!(exhausted.into_response().status(), StatusCode::BAD_GATEWAY);

        let config = ApiError::from(Error::Config("bad list url".to_string()));
        assert_eq!(config.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(
            ApiError::NotLoaded.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::NotFound("movie 9".to_string()).into_response().status(),
            StatusCode::NOT_FOUND
        );
    }
}
