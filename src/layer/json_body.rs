use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{Layer, Service};

use crate::error::ErrorResponse;

/// Decoded JSON request body, stored as a request extension.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

/// Layer that decodes JSON request bodies before routing.
///
/// Requests with an `application/json` content type have their body buffered
/// and parsed. Malformed JSON is rejected with a 400 before any handler
/// runs; a well-formed body is attached as a [`JsonBody`] extension and the
/// raw bytes restored for downstream extractors. Empty bodies and other
/// content types pass through untouched.
#[derive(Clone, Copy, Default)]
pub struct JsonBodyLayer;

impl JsonBodyLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for JsonBodyLayer {
    type Service = JsonBodyService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        JsonBodyService { inner }
    }
}

#[derive(Clone)]
pub struct JsonBodyService<S> {
    inner: S,
}

impl<S, B> Service<Request<Body>> for JsonBodyService<S>
where
    S: Service<Request<Body>, Response = Response<B>> + Clone + Send + 'static,
    S::Future: Send,
    B: axum::body::HttpBody<Data = axum::body::Bytes> + Send + 'static,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    type Response = Response<Body>;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let is_json = req
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v.contains("application/json"));

            if !is_json {
                let response = inner.call(req).await?;
                let (parts, body) = response.into_parts();
                return Ok(Response::from_parts(parts, Body::new(body)));
            }

            let (parts, body) = req.into_parts();
            let bytes = match body.collect().await {
                Ok(collected) => collected.to_bytes(),
                Err(_) => return Ok(reject("failed to read request body")),
            };

            let mut req = Request::from_parts(parts, Body::from(bytes.clone()));
            if !bytes.is_empty() {
                match serde_json::from_slice::<Value>(&bytes) {
                    Ok(value) => {
                        req.extensions_mut().insert(JsonBody(value));
                    }
                    Err(e) => return Ok(reject(format!("invalid JSON body: {}", e))),
                }
            }

            let response = inner.call(req).await?;
            let (parts, body) = response.into_parts();
            Ok(Response::from_parts(parts, Body::new(body)))
        })
    }
}

fn reject(message: impl Into<String>) -> Response<Body> {
    let body = ErrorResponse::from_status(StatusCode::BAD_REQUEST, message);
    (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
}
