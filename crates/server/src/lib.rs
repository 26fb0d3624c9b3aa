//! Server crate for the genre trends dashboard.
//!
//! Serves the precomputed genre/year aggregate over HTTP as JSON. The
//! aggregate is built once at startup and shared read-only by every request.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use state::{AppState, DatasetStats};

use axum::Router;
use tower_http::trace::TraceLayer;

/// Full application router with request tracing
pub fn app(state: AppState) -> Router {
    routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
