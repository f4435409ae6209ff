//! Qdrant-backed vector store
//!
//! Talks to Qdrant over its HTTP API with the same reqwest stack used for
//! the Ollama backend. Points are stored with payload `{text, metadata}` and
//! searched by cosine similarity; the collection is created on startup when
//! absent and reused untouched otherwise.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::config::VectorDbConfig;
use crate::error::{Error, Result};
use crate::types::record::{ChunkRecord, SearchHit};

use super::vector_store::VectorStoreProvider;

/// Qdrant vector store client
pub struct QdrantStore {
    client: Client,
    base_url: String,
    collection: String,
    dimensions: usize,
}

#[derive(Serialize)]
struct SearchRequest {
    vector: Vec<f32>,
    limit: usize,
    with_payload: bool,
}

#[derive(Deserialize)]
struct SearchResponse {
    result: Vec<ScoredPoint>,
}

#[derive(Deserialize)]
struct ScoredPoint {
    score: f32,
    #[serde(default)]
    payload: Option<PointPayload>,
}

#[derive(Deserialize)]
struct PointPayload {
    #[serde(default)]
    text: String,
    #[serde(default)]
    metadata: Map<String, Value>,
}

impl QdrantStore {
    /// Create a store over the configured Qdrant instance.
    ///
    /// No request timeout is set: store calls run as long as Qdrant takes.
    pub fn new(config: &VectorDbConfig, dimensions: usize) -> Self {
        Self {
            client: Client::new(),
            base_url: config.url(),
            collection: config.collection.clone(),
            dimensions,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/collections/{}", self.base_url, self.collection)
    }

    async fn collection_exists(&self) -> Result<bool> {
        let response = self
            .client
            .get(self.collection_url())
            .send()
            .await
            .map_err(|e| Error::vector_db(format!("Collection lookup failed: {}", e)))?;

        Ok(response.status().is_success())
    }

    async fn create_collection(&self) -> Result<()> {
        let body = json!({
            "vectors": {
                "size": self.dimensions,
                "distance": "Cosine",
            }
        });

        let response = self
            .client
            .put(self.collection_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::vector_db(format!("Collection creation failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::vector_db(format!(
                "Collection creation failed: HTTP {} - {}",
                status, detail
            )));
        }

        tracing::info!(
            "Created collection '{}' ({} dims, cosine)",
            self.collection,
            self.dimensions
        );
        Ok(())
    }
}

#[async_trait]
impl VectorStoreProvider for QdrantStore {
    async fn ensure_collection(&self) -> Result<()> {
        if self.collection_exists().await? {
            tracing::debug!("Collection '{}' already exists", self.collection);
            return Ok(());
        }
        self.create_collection().await
    }

    async fn upsert(&self, records: Vec<ChunkRecord>) -> Result<()> {
        let points: Vec<Value> = records
            .iter()
            .map(|record| {
                json!({
                    "id": record.id,
                    "vector": record.vector,
                    "payload": {
                        "text": record.text,
                        "metadata": record.metadata,
                    },
                })
            })
            .collect();

        let response = self
            .client
            .put(format!("{}/points", self.collection_url()))
            .json(&json!({ "points": points }))
            .send()
            .await
            .map_err(|e| Error::vector_db(format!("Upsert failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::vector_db(format!(
                "Upsert failed: HTTP {} - {}",
                status, detail
            )));
        }

        Ok(())
    }

    async fn search(&self, vector: &[f32], top_k: usize) -> Result<Vec<SearchHit>> {
        if top_k == 0 {
            return Ok(Vec::new());
        }

        let request = SearchRequest {
            vector: vector.to_vec(),
            limit: top_k,
            with_payload: true,
        };

        let response = self
            .client
            .post(format!("{}/points/search", self.collection_url()))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::vector_db(format!("Search failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::vector_db(format!(
                "Search failed: HTTP {} - {}",
                status, detail
            )));
        }

        let search_response: SearchResponse = response
            .json()
            .await
            .map_err(|e| Error::vector_db(format!("Failed to parse search response: {}", e)))?;

        // Qdrant returns hits in descending-similarity order; keep it.
        let hits = search_response
            .result
            .into_iter()
            .map(|point| {
                let payload = point.payload.unwrap_or_else(|| PointPayload {
                    text: String::new(),
                    metadata: Map::new(),
                });
                SearchHit {
                    text: payload.text,
                    metadata: payload.metadata,
                    score: point.score,
                }
            })
            .collect();

        Ok(hits)
    }

    async fn health_check(&self) -> bool {
        let url = format!("{}/collections", self.base_url);

        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::warn!("Qdrant health probe returned HTTP {}", response.status());
                false
            }
            Err(e) => {
                tracing::warn!("Qdrant health probe failed: {}", e);
                false
            }
        }
    }

    fn name(&self) -> &str {
        "qdrant"
    }
}
