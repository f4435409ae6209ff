//! RAG server binary
//!
//! Run with: cargo run --bin corpus-rag-server

use corpus_rag::{config::RagConfig, ingestion::loader, server::RagServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "corpus_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RagConfig::from_env();

    tracing::info!("Configuration loaded");
    tracing::info!("  - Qdrant: {}", config.vector_db.url());
    tracing::info!("  - Ollama: {}", config.llm.base_url);
    tracing::info!("  - Embedding model: {}", config.llm.embed_model);
    tracing::info!("  - LLM model: {}", config.llm.generate_model);
    tracing::info!("  - Chunk size: {} words", config.chunking.chunk_size);

    let input_dir = config.ingest.input_dir();
    let server = RagServer::new(config).await?;

    // Initial corpus load runs to completion before the server binds.
    tracing::info!("Loading initial documents from {}...", input_dir.display());
    loader::load_initial_documents(server.state().pipeline(), &input_dir).await;

    tracing::info!("Listening on http://{}", server.address());
    server.start().await?;

    Ok(())
}
