//! Application state for the RAG server

use std::sync::Arc;

use crate::config::RagConfig;
use crate::error::Result;
use crate::generation::OllamaClient;
use crate::ingestion::IngestPipeline;
use crate::providers::{
    EmbeddingProvider, LlmProvider, OllamaEmbedder, OllamaGenerator, QdrantStore,
    VectorStoreProvider,
};

/// Shared application state.
///
/// All services are constructed once at startup and injected into handlers
/// through this state; nothing is process-global.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: RagConfig,
    embedder: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn VectorStoreProvider>,
    llm: Arc<dyn LlmProvider>,
    pipeline: IngestPipeline,
}

impl AppState {
    /// Construct the service graph from configuration and ensure the vector
    /// collection exists.
    pub async fn new(config: RagConfig) -> Result<Self> {
        let ollama = Arc::new(OllamaClient::new(&config.llm));

        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(OllamaEmbedder::new(
            Arc::clone(&ollama),
            config.embeddings.dimensions,
        ));
        let llm: Arc<dyn LlmProvider> =
            Arc::new(OllamaGenerator::new(Arc::clone(&ollama), &config.llm));
        let vector_store: Arc<dyn VectorStoreProvider> = Arc::new(QdrantStore::new(
            &config.vector_db,
            config.embeddings.dimensions,
        ));

        tracing::info!(
            "Providers initialized (embeddings: {} via {}, {} dims, llm: {}, store: {})",
            config.llm.embed_model,
            embedder.name(),
            embedder.dimensions(),
            llm.model(),
            vector_store.name()
        );

        vector_store.ensure_collection().await?;

        let pipeline = IngestPipeline::new(
            config.chunking.chunk_size,
            Arc::clone(&embedder),
            Arc::clone(&vector_store),
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                embedder,
                vector_store,
                llm,
                pipeline,
            }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Get the embedding provider
    pub fn embedder(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.inner.embedder
    }

    /// Get the vector store provider
    pub fn vector_store(&self) -> &Arc<dyn VectorStoreProvider> {
        &self.inner.vector_store
    }

    /// Get the LLM provider
    pub fn llm(&self) -> &Arc<dyn LlmProvider> {
        &self.inner.llm
    }

    /// Get the ingest pipeline
    pub fn pipeline(&self) -> &IngestPipeline {
        &self.inner.pipeline
    }
}
