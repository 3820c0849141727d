//! Route table.

mod health;

pub use health::health_routes;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::error::ErrorResponse;
use crate::router::AppState;

/// Routes owned by the application.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/", get(greeting))
}

/// Placeholder root route.
async fn greeting() -> &'static str {
    "Hello from Backend 👋"
}

/// Returns a JSON 404 response for unmatched routes.
pub async fn fallback_handler() -> Response {
    let body = ErrorResponse::from_status(StatusCode::NOT_FOUND, "No such route");
    (StatusCode::NOT_FOUND, axum::Json(body)).into_response()
}
