//! LLM provider trait

use async_trait::async_trait;

/// Trait for LLM-based answer generation.
///
/// The answer path is non-throwing by signature: implementations map every
/// failure mode to a displayable string rather than an error.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate an answer given a question and retrieved context
    async fn answer(&self, question: &str, context: &str) -> String;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> bool;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model being used
    fn model(&self) -> &str;
}
