//! Application assembly.

use axum::Router;

use crate::config::AppConfig;
use crate::db::Db;
use crate::layer;
use crate::routes;

/// Shared application context, passed to handlers by the router.
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
}

/// Assemble the application: route table, fallback and middleware stack.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let router = routes::api_routes()
        .merge(routes::health_routes())
        .fallback(routes::fallback_handler)
        .with_state(state);

    layer::default_layers(router, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn test_app() -> Router {
        let db = Db::connect("mongodb://127.0.0.1:27017/mern").await;
        app(AppState { db }, &AppConfig::default())
    }

    #[tokio::test]
    async fn root_returns_greeting() {
        let response = test_app()
            .await
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], "Hello from Backend 👋".as_bytes());
    }

    #[tokio::test]
    async fn unmatched_route_is_404() {
        let response = test_app()
            .await
            .oneshot(Request::builder().uri("/api").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(String::from_utf8_lossy(&body).contains("NOT_FOUND"));
    }

    #[tokio::test]
    async fn malformed_json_body_is_rejected_before_routing() {
        let response = test_app()
            .await
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn responses_carry_permissive_cors_headers() {
        let response = test_app()
            .await
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn health_is_served_regardless_of_database_state() {
        let db = Db::connect("not a mongodb uri").await;
        let app = app(AppState { db }, &AppConfig::default());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(String::from_utf8_lossy(&body).contains(r#""database":"failed""#));
    }
}
