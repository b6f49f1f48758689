//! Health check route.

use axum::{Json, Router, response::IntoResponse, routing::get};
use serde_json::json;

use crate::AppState;

/// Creates the health router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(health))
}

/// GET / - Service health check.
async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "tally",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
