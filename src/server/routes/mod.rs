//! API route handlers

pub mod health;
pub mod query;
pub mod upload;

use axum::Json;

use crate::types::response::StatusResponse;

/// GET / - liveness banner
pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".to_string(),
        message: "corpus-rag API is running".to_string(),
    })
}
