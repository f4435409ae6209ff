//! Response types for the HTTP API

use serde::{Deserialize, Serialize};

use super::record::SearchHit;

/// A source document reference attached to an answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRef {
    /// Source filename
    pub filename: String,
    /// Similarity score of the chunk that contributed this source
    pub score: f32,
}

impl From<&SearchHit> for SourceRef {
    fn from(hit: &SearchHit) -> Self {
        Self {
            filename: hit.filename().to_string(),
            score: hit.score,
        }
    }
}

/// Response from a RAG query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Generated answer (or a descriptive error string from the generator)
    pub answer: String,
    /// Sources the answer was grounded on
    pub sources: Vec<SourceRef>,
}

/// Status of a single uploaded file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Filename as uploaded
    pub filename: String,
    /// Processing status
    pub status: String,
}

/// Response from the upload endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Summary message
    pub message: String,
    /// Per-file results
    pub files: Vec<UploadedFile>,
}

/// Liveness banner returned from the root endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

/// Health of the external dependencies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Vector database reachable
    pub qdrant: bool,
    /// LLM backend reachable
    pub ollama: bool,
}
