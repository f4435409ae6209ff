//! Ingest pipeline: extract, chunk, embed, store

use serde_json::{json, Map, Value};
use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::providers::{EmbeddingProvider, VectorStoreProvider};
use crate::types::record::ChunkRecord;

use super::chunker::chunk_words;
use super::extractor::Extractor;

/// Pipeline turning a document file into stored embedding records.
///
/// Shared by the upload endpoint and the startup loader. Each chunk becomes
/// one record with payload `{text, metadata: {filename, chunk_id, ..}}`;
/// documents that extract to zero chunks are skipped without touching the
/// store.
pub struct IngestPipeline {
    extractor: Extractor,
    chunk_size: usize,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStoreProvider>,
}

impl IngestPipeline {
    /// Create a pipeline over the given providers
    pub fn new(
        chunk_size: usize,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStoreProvider>,
    ) -> Self {
        Self {
            extractor: Extractor::new(),
            chunk_size,
            embedder,
            store,
        }
    }

    /// Read a file from disk and ingest it. Returns the number of chunks
    /// stored.
    pub async fn ingest_path(
        &self,
        path: &Path,
        filename: &str,
        metadata: Option<Map<String, Value>>,
    ) -> Result<usize> {
        let data = tokio::fs::read(path).await?;
        self.ingest_bytes(&data, filename, metadata).await
    }

    /// Ingest a document from raw bytes. Returns the number of chunks stored.
    pub async fn ingest_bytes(
        &self,
        data: &[u8],
        filename: &str,
        metadata: Option<Map<String, Value>>,
    ) -> Result<usize> {
        let text = self.extractor.extract(filename, data)?;
        let chunks = chunk_words(&text, self.chunk_size);

        if chunks.is_empty() {
            tracing::debug!("'{}' produced no chunks, nothing to store", filename);
            return Ok(0);
        }

        let mut records = Vec::with_capacity(chunks.len());
        for (i, chunk) in chunks.into_iter().enumerate() {
            let vector = self.embedder.embed(&chunk).await?;

            let mut chunk_metadata = Map::new();
            chunk_metadata.insert("filename".to_string(), json!(filename));
            chunk_metadata.insert("chunk_id".to_string(), json!(i));
            if let Some(extra) = &metadata {
                for (key, value) in extra {
                    chunk_metadata.insert(key.clone(), value.clone());
                }
            }

            records.push(ChunkRecord::new(vector, chunk, chunk_metadata));
        }

        let stored = records.len();
        self.store.upsert(records).await?;

        tracing::info!("Ingested '{}': {} chunks", filename, stored);
        Ok(stored)
    }
}
