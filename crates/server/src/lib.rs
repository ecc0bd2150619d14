pub mod config;
pub mod error;
pub mod handlers;
pub mod pipeline;
pub mod routes;
pub mod upload;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use pipeline::ReceiptPipeline;

/// Maximum accepted request body (the mobile app uploads camera photos).
pub const MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ReceiptPipeline>,
}

/// Assemble the full application router: `/api` routes, body cap, CORS for
/// the mobile client, request tracing.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", routes::api_routes())
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
