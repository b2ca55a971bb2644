//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health` - Health check (public)
//!
//! # Middleware
//!
//! - **Access log** - One structured record per request, routed by status
//! - **Path normalization** - Trailing slash handling

use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::handlers::health_handler;
use crate::middleware::access_log;
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
///
/// The access-log layer wraps every route, so each request produces
/// exactly one emission through the state's sink.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/health", get(health_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            access_log::layer,
        ))
        .with_state(state);

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
