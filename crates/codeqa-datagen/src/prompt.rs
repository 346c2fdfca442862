//! Prompt template for model-answered questions.

use serde::{Deserialize, Serialize};

use crate::error::GenResult;
use crate::template;

/// Default prompt used when the caller supplies none.
pub const DEFAULT_PROMPT: &str = r#"You are given source code and a question about it.

Code:
{context}

Question: {query}

Answer concisely, using only information visible in the code. Do not repeat the question."#;

/// A prompt template with `{context}` and `{query}` slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptTemplate {
    text: String,
}

impl PromptTemplate {
    /// Wraps a template string.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Fills the `{context}` and `{query}` slots.
    pub fn fill(&self, context: &str, query: &str) -> GenResult<String> {
        template::render(&self.text, &[("context", context), ("query", query)])
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompt_fills_both_slots() {
        let prompt = PromptTemplate::default()
            .fill("def f(): pass", "What does f do?")
            .unwrap();
        assert!(prompt.contains("def f(): pass"));
        assert!(prompt.contains("What does f do?"));
    }

    #[test]
    fn test_custom_prompt_with_missing_slot_errors() {
        let prompt = PromptTemplate::new("{context} / {nope}");
        assert!(prompt.fill("c", "q").is_err());
    }
}
