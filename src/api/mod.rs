//! Operational HTTP API (health, readiness, status).

pub mod handlers;
pub mod routes;

pub use handlers::{AppState, RefreshStats};
pub use routes::create_router;
