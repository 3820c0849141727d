//! Middleware stack applied to every request.

mod json_body;

pub use json_body::{JsonBody, JsonBodyLayer};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;

use crate::config::AppConfig;

/// Applies the default middleware stack.
///
/// Layers applied (innermost to outermost):
/// - `CatchPanicLayer` - converts panics to 500 responses
/// - `SetRequestIdLayer` / `PropagateRequestIdLayer` - X-Request-Id handling
/// - `TraceLayer` - request/response logging with latency
/// - `TimeoutLayer` - request timeout from config
/// - `JsonBodyLayer` - JSON request body decoding
/// - `CorsLayer` - cross-origin headers (outermost)
pub(crate) fn default_layers(router: Router, config: &AppConfig) -> Router {
    let trace = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-");

            tracing::info_span!(
                "http",
                method = %request.method(),
                path = %request.uri().path(),
                request_id = %request_id,
            )
        })
        .on_request(())
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Micros),
        );

    router
        .layer(CatchPanicLayer::new())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(trace)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout(),
        ))
        .layer(JsonBodyLayer::new())
        .layer(cors_layer(config))
}

/// Permissive CORS when no origins are configured, the listed origins
/// otherwise.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();
    CorsLayer::new().allow_origin(AllowOrigin::list(origins))
}
