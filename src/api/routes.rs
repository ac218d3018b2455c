//! HTTP API route definitions.

use axum::{routing::get, Router};

use super::handlers::{health, markets, ready, status, AppState};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health))
        .route("/ready", get(ready))
        // Status endpoints
        .route("/api/v1/status", get(status))
        .route("/api/v1/markets", get(markets))
        .with_state(state)
}
