//! Prompt templates for RAG generation

use crate::types::record::SearchHit;

/// Prompt builder for RAG queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the context block from search hits: chunk texts in retrieval
    /// order, separated by blank lines.
    pub fn build_context(hits: &[SearchHit]) -> String {
        hits.iter()
            .map(|hit| hit.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Build the grounded question-answering prompt. The model is instructed
    /// to answer strictly from the supplied context and to say so when the
    /// context does not contain the answer.
    pub fn build_answer_prompt(question: &str, context: &str) -> String {
        format!(
            r#"You are a document assistant. Answer the question based ONLY on the provided context.
If the information is not in the context, say that you do not have that information.

Context:
{context}

Question: {question}

Answer:"#
        )
    }
}
