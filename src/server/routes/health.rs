//! Health endpoint

use axum::{extract::State, Json};

use crate::server::state::AppState;
use crate::types::response::HealthResponse;

/// GET /health - liveness of both external dependencies. Probes never fail
/// the request; unreachable backends report as `false`.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let (qdrant, ollama) = tokio::join!(
        state.vector_store().health_check(),
        state.llm().health_check()
    );

    Json(HealthResponse { qdrant, ollama })
}
