//! HTTP surface of the advisory proxy.

pub mod request_id;
mod routes;

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Advisory API routes, without middleware.
pub fn routes() -> Router<Arc<AppState>> {
    routes::create_router()
}

/// Full application: API, health check, optional static UI and middleware.
pub fn app(state: Arc<AppState>) -> Router {
    let static_dir = state.config().static_dir.clone();

    let mut app = routes()
        .route("/health", get(|| async { "OK" }))
        .with_state(state);

    if let Some(dir) = static_dir {
        tracing::info!("Serving static files from {}", dir);
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(middleware::from_fn(request_id::propagate_request_id))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests;
