//! Core types for the RAG service

pub mod query;
pub mod record;
pub mod response;

pub use query::QueryRequest;
pub use record::{ChunkRecord, SearchHit};
pub use response::{HealthResponse, QueryResponse, SourceRef, StatusResponse, UploadResponse};
