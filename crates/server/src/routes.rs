use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/receipt", post(handlers::receipt::process_receipt))
        .route("/test-receipt", post(handlers::test_receipt::test_receipt))
        .route("/health", get(handlers::health::health))
}
