//! Query request types

use serde::{Deserialize, Serialize};

/// Query request for RAG search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The question to answer
    pub question: String,

    /// Number of chunks to retrieve (default: 5)
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    5
}

impl QueryRequest {
    /// Create a new query with the default result count
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            top_k: default_top_k(),
        }
    }

    /// Set the number of results to retrieve
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_k_defaults_to_five() {
        let request: QueryRequest =
            serde_json::from_str(r#"{"question": "what is the leave policy?"}"#)
                .expect("valid request");
        assert_eq!(request.top_k, 5);
    }

    #[test]
    fn top_k_can_be_overridden() {
        let request: QueryRequest =
            serde_json::from_str(r#"{"question": "holidays", "top_k": 2}"#).expect("valid request");
        assert_eq!(request.top_k, 2);
    }
}
