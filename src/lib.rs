//! # mern-backend
//!
//! A small backend API server: an axum HTTP surface over a MongoDB
//! connection.
//!
//! Every request passes through a permissive CORS layer and a JSON
//! body-decoding layer. The route table holds a placeholder `GET /` greeting
//! and a `GET /health` liveness endpoint. The database connection is opened
//! once at startup off the request path; its outcome is logged and reported,
//! never acted on.

mod config;
mod db;
mod error;
mod layer;
mod logging;
mod router;
mod routes;
mod server;

pub use config::{AppConfig, ConfigError, Environment};
pub use db::{Db, DbStatus};
pub use error::ErrorResponse;
pub use layer::{JsonBody, JsonBodyLayer};
pub use logging::{init_logging, LogFormat};
pub use router::{app, AppState};
pub use server::{serve, ServerError};
