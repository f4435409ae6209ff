//! Ollama API client for embeddings and answer generation

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::LlmConfig;
use crate::error::{Error, Result};

use super::prompt::PromptBuilder;

/// Timeout for the lightweight model-listing health probe
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Ollama API client
pub struct OllamaClient {
    /// HTTP client (timeout set from config, applies to generation and
    /// embedding calls)
    client: Client,
    /// Configuration
    config: LlmConfig,
}

#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
}

#[derive(Serialize)]
struct EmbedRequest {
    model: String,
    prompt: String,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

impl OllamaClient {
    /// Create a new Ollama client
    pub fn new(config: &LlmConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config: config.clone(),
        }
    }

    /// Check if Ollama is available via the model-listing endpoint. Probe
    /// failures collapse to `false`; the cause is logged, never raised.
    pub async fn health_check(&self) -> bool {
        let url = format!("{}/api/tags", self.config.base_url);

        match self.client.get(&url).timeout(HEALTH_TIMEOUT).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!("Ollama health probe failed: {}", e);
                false
            }
        }
    }

    /// Generate an embedding for the given text
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.config.base_url);
        let request = EmbedRequest {
            model: self.config.embed_model.clone(),
            prompt: text.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::embedding(format!("Embedding request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::embedding(format!(
                "Embedding failed: HTTP {}",
                response.status()
            )));
        }

        let embed_response: EmbedResponse = response
            .json()
            .await
            .map_err(|e| Error::embedding(format!("Failed to parse embedding response: {}", e)))?;

        Ok(embed_response.embedding)
    }

    /// Generate an answer for a question over the given context.
    ///
    /// This path never fails: every failure mode maps to a distinct
    /// human-readable answer string so the caller always has something to
    /// display.
    pub async fn generate_answer(&self, question: &str, context: &str) -> String {
        let url = format!("{}/api/generate", self.config.base_url);
        let request = GenerateRequest {
            model: self.config.generate_model.clone(),
            prompt: PromptBuilder::build_answer_prompt(question, context),
            stream: false,
        };

        tracing::info!("Generating answer with model: {}", self.config.generate_model);

        let response = match self.client.post(&url).json(&request).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                tracing::warn!("Ollama generation timed out: {}", e);
                return "Error: timed out waiting for a response from Ollama".to_string();
            }
            Err(e) if e.is_connect() => {
                tracing::warn!("Ollama connection failed: {}", e);
                return "Error: cannot connect to Ollama. Is it running?".to_string();
            }
            Err(e) => {
                tracing::warn!("Ollama generation failed: {}", e);
                return format!("Error: answer generation failed: {}", e);
            }
        };

        if !response.status().is_success() {
            return format!(
                "Error: Ollama responded with status {}",
                response.status().as_u16()
            );
        }

        let data: serde_json::Value = match response.json().await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("Failed to read Ollama response body: {}", e);
                return format!("Error: answer generation failed: {}", e);
            }
        };

        match data.get("response").and_then(|v| v.as_str()) {
            Some(answer) => answer.to_string(),
            None => format!("Error: unexpected response from Ollama: {}", data),
        }
    }
}
