//! Root and health endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::models::{Greeting, HealthResponse};
use crate::state::AppState;

/// GET / - Greeting, served with 201
pub async fn root() -> (StatusCode, Json<Greeting>) {
    (StatusCode::CREATED, Json(Greeting { msg: "Hello" }))
}

/// GET /health - Liveness plus the current user count
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        users: state.users.len().await,
        version: env!("CARGO_PKG_VERSION"),
    })
}
