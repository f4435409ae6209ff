//! Vector store provider trait

use async_trait::async_trait;

use crate::error::Result;
use crate::types::record::{ChunkRecord, SearchHit};

/// Trait for vector storage and cosine-similarity search
#[async_trait]
pub trait VectorStoreProvider: Send + Sync {
    /// Create the backing collection if it does not exist yet; an existing
    /// collection is reused as-is.
    async fn ensure_collection(&self) -> Result<()>;

    /// Insert a batch of chunk records. Callers do not pass empty batches.
    async fn upsert(&self, records: Vec<ChunkRecord>) -> Result<()>;

    /// Retrieve the `top_k` nearest records for the query vector, ordered by
    /// descending similarity.
    async fn search(&self, vector: &[f32], top_k: usize) -> Result<Vec<SearchHit>>;

    /// Liveness probe. Failures collapse to `false` and are logged, never
    /// raised.
    async fn health_check(&self) -> bool;

    /// Provider name for logging
    fn name(&self) -> &str;
}
