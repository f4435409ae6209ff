//! Provider abstractions for embeddings, answer generation, and vector
//! storage
//!
//! The API layer depends on these traits rather than concrete clients, so
//! handlers receive explicitly constructed service objects through shared
//! state instead of reaching for globals.

pub mod embedding;
pub mod llm;
pub mod ollama;
pub mod qdrant;
pub mod vector_store;

pub use embedding::EmbeddingProvider;
pub use llm::LlmProvider;
pub use ollama::{OllamaEmbedder, OllamaGenerator};
pub use qdrant::QdrantStore;
pub use vector_store::VectorStoreProvider;
