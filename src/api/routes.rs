//! Route table and middleware stack

use crate::api::handlers;
use crate::api::state::AppState;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Build the service router.
///
/// The CORS layer wraps the whole router, so error responses produced by
/// handlers carry the permissive headers as well.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/info", get(handlers::info))
        .route("/formats", get(handlers::formats))
        .route("/download", get(handlers::download))
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
