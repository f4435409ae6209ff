//! corpus-rag: retrieval-augmented generation over a document corpus
//!
//! This crate provides a small RAG HTTP service. Documents are ingested into
//! a Qdrant collection as embedded text chunks, and questions are answered by
//! retrieving the closest chunks and prompting an Ollama-hosted model with
//! them as context.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod server;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use types::{
    query::QueryRequest,
    response::{QueryResponse, SourceRef},
};
