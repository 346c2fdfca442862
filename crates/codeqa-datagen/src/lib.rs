//! Question/answer and instruction-tuning dataset generation from extracted
//! source-file metadata.
//!
//! Given one file's [`FileDetails`] (produced by an external extractor) and an
//! ordered catalog of [`Question`]s, a single generation pass renders each
//! question template against the matching entities and collects the accepted
//! answers into a [`Dataset`]: question/answer pairs plus
//! instruction/input/output triples, in catalog order.
//!
//! ## Answer routing
//!
//! - Ids ending in `code_graph` take a raw structured value from the metadata,
//!   verbatim.
//! - Ids ending in `purpose` consult the injected [`TextModel`] when the
//!   model path is enabled; model failures are logged and contained, yielding
//!   no entries for that question.
//! - Every other id is a static metadata lookup, normalized and deduplicated.
//!
//! ## Features
//!
//! - `llm` - Enable an OpenAI-compatible [`TextModel`] provider built on the
//!   [Rig](https://github.com/0xPlaygrounds/rig) library
//!
//! [`FileDetails`]: codeqa_core::FileDetails
//! [`Question`]: codeqa_core::Question
//! [`Dataset`]: codeqa_core::Dataset

pub mod catalog;
mod error;
mod generator;
mod model;
mod normalize;
mod prompt;
mod template;

// OpenAI-compatible provider (optional feature)
#[cfg(feature = "llm")]
pub mod llm;

pub use error::{GenError, GenResult, ModelError, ModelResult};
pub use generator::{DatasetGenerator, GeneratorOptions};
pub use model::TextModel;
pub use normalize::{clean_unique_elements, value_to_text};
pub use prompt::{PromptTemplate, DEFAULT_PROMPT};

pub use catalog::{load_questions, parse_questions};

// Provider re-exports (when feature enabled)
#[cfg(feature = "llm")]
pub use llm::{create_openai_client, LlmResolver, RigModel};

use codeqa_core::{Dataset, FileDetails, Question};

/// Runs one generation pass for a file and returns both output collections.
///
/// Convenience wrapper around [`DatasetGenerator`]: construct, generate,
/// discard.
pub fn generate_file_datasets(
    details: &FileDetails,
    base_name: &str,
    questions: &[Question],
    model: Option<&dyn TextModel>,
    prompt: PromptTemplate,
    options: GeneratorOptions,
) -> GenResult<Dataset> {
    DatasetGenerator::new(details, base_name, questions, model, prompt, options).generate()
}
