//! Query endpoint

use axum::{extract::State, Json};

use crate::error::Result;
use crate::generation::PromptBuilder;
use crate::server::state::AppState;
use crate::types::{
    query::QueryRequest,
    response::{QueryResponse, SourceRef},
};

/// POST /query - answer a question over the indexed corpus.
///
/// Retrieval failures propagate as 500; the generation step itself never
/// fails, so once chunks are retrieved the caller always gets an answer
/// string.
pub async fn query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>> {
    tracing::info!("Query: \"{}\" (top_k: {})", request.question, request.top_k);

    let query_vector = state.embedder().embed(&request.question).await?;
    let hits = state
        .vector_store()
        .search(&query_vector, request.top_k)
        .await?;

    let context = PromptBuilder::build_context(&hits);
    let answer = state.llm().answer(&request.question, &context).await;

    let sources: Vec<SourceRef> = hits.iter().map(SourceRef::from).collect();

    tracing::info!("Query answered with {} sources", sources.len());

    Ok(Json(QueryResponse { answer, sources }))
}
