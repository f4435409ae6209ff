//! Records stored in and returned by the vector database

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// An embedded chunk ready for storage: one point in the collection.
///
/// The payload stored alongside the vector is `{text, metadata}`, where
/// metadata always carries the owning document's filename and the chunk's
/// sequence index, merged with any caller-supplied entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// Point id (fresh uuid per record; re-ingesting a file appends new
    /// records rather than replacing old ones)
    pub id: Uuid,
    /// Embedding vector
    pub vector: Vec<f32>,
    /// Chunk text
    pub text: String,
    /// Chunk metadata (filename, chunk_id, plus caller-supplied tags)
    pub metadata: Map<String, Value>,
}

impl ChunkRecord {
    /// Create a record with a fresh id
    pub fn new(vector: Vec<f32>, text: String, metadata: Map<String, Value>) -> Self {
        Self {
            id: Uuid::new_v4(),
            vector,
            text,
            metadata,
        }
    }
}

/// A search hit returned by the vector store, in descending-similarity order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Chunk text
    pub text: String,
    /// Chunk metadata as stored
    pub metadata: Map<String, Value>,
    /// Cosine similarity score
    pub score: f32,
}

impl SearchHit {
    /// Filename from the hit's metadata, if present
    pub fn filename(&self) -> &str {
        self.metadata
            .get("filename")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}
