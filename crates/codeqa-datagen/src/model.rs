//! The model invocation boundary.
//!
//! The generator never knows how a model is loaded or served; it only sees
//! this single-method capability. Enable the `llm` feature for a concrete
//! OpenAI-compatible provider (see [`crate::llm`]).

use crate::error::ModelResult;

/// A text-generation model the generator can consult.
///
/// Implementations receive a fully-formatted prompt and return the raw answer
/// text. The call blocks; bounding its latency is the implementation's
/// responsibility.
pub trait TextModel {
    /// Completes a prompt into answer text.
    fn complete(&self, prompt: &str) -> ModelResult<String>;
}
