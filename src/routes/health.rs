use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::router::AppState;

#[derive(Serialize)]
struct Health {
    status: &'static str,
    database: &'static str,
}

/// Returns a router with the `GET /health` liveness endpoint.
///
/// The database state is reported, never acted on: the endpoint answers 200
/// even when the connection attempt failed.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        database: state.db.status().as_str(),
    })
}
