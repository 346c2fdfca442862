//! The dataset generation pass.
//!
//! A [`DatasetGenerator`] walks an ordered question catalog against one file's
//! extracted metadata. Each question is routed by its scope (file, function,
//! class, method) and answered either by a static metadata lookup or, for
//! "purpose" questions when so configured, by the injected model. Accepted
//! answers land in both output collections of the [`Dataset`] in one step.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use codeqa_core::{Dataset, EntityRecord, FileDetails, Question, QuestionKind};

use crate::error::{GenError, GenResult, ModelError};
use crate::model::TextModel;
use crate::normalize::{clean_unique_elements, value_to_text};
use crate::prompt::PromptTemplate;
use crate::template;

/// Flags controlling one generation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorOptions {
    /// Route "purpose" questions through the model instead of static lookup.
    #[serde(default)]
    pub use_llm: bool,
    /// For file questions, record the file summary as the instruction input
    /// instead of the file source code.
    #[serde(default)]
    pub use_summary: bool,
}

/// Generates question/answer pairs and instruction records for one file.
pub struct DatasetGenerator<'a> {
    details: &'a FileDetails,
    base_name: &'a str,
    questions: &'a [Question],
    model: Option<&'a dyn TextModel>,
    prompt: PromptTemplate,
    use_llm: bool,
    use_summary: bool,
    dataset: Dataset,
}

impl<'a> DatasetGenerator<'a> {
    /// Creates a generator for one file's metadata and question catalog.
    pub fn new(
        details: &'a FileDetails,
        base_name: &'a str,
        questions: &'a [Question],
        model: Option<&'a dyn TextModel>,
        prompt: PromptTemplate,
        options: GeneratorOptions,
    ) -> Self {
        // A pass without a model handle can never take the model path.
        let use_llm = options.use_llm && model.is_some();

        Self {
            details,
            base_name,
            questions,
            model,
            prompt,
            use_llm,
            use_summary: options.use_summary,
            dataset: Dataset::default(),
        }
    }

    /// Runs the pass: every catalog question in order, each dispatched by its
    /// scope. Returns both output collections.
    pub fn generate(mut self) -> GenResult<Dataset> {
        let questions = self.questions;
        for question in questions {
            self.dispatch(question)?;
        }
        Ok(self.dataset)
    }

    fn dispatch(&mut self, question: &Question) -> GenResult<()> {
        let details = self.details;
        match question.kind {
            QuestionKind::File => self.file_question(question),
            QuestionKind::Function => self.entity_questions(question, &details.functions),
            QuestionKind::Class => self.entity_questions(question, &details.classes),
            QuestionKind::Method => self.method_questions(question),
        }
    }

    /// Single invocation against the whole file, with the file source as
    /// context.
    fn file_question(&mut self, question: &Question) -> GenResult<()> {
        let details = self.details;
        let info = &details.file_info;
        let query = template::render(&question.text, &[("filename", self.base_name)])?;
        let context = require_text(info, self.base_name, question.kind.code_key())?;
        self.answer_question(question, info, &query, context)
    }

    /// One invocation per function or class, with the entity source as
    /// context. Variable-purpose forms route through the variables path and
    /// only run when the model path is enabled.
    fn entity_questions(
        &mut self,
        question: &Question,
        entities: &BTreeMap<String, EntityRecord>,
    ) -> GenResult<()> {
        let variables_route = question.is_variable_purpose();
        for (name, record) in entities {
            let context = require_text(record, name, question.kind.code_key())?;
            if variables_route {
                if self.use_llm {
                    self.variable_purpose_question(question, name, record, context)?;
                }
            } else {
                let query = template::render(
                    &question.text,
                    &[
                        ("filename", self.base_name),
                        (question.kind.name_placeholder(), name),
                    ],
                )?;
                self.answer_question(question, record, &query, context)?;
            }
        }
        Ok(())
    }

    /// One invocation per (class, method) pair, found by scanning each class
    /// record for method-prefixed keys; context is the method source.
    fn method_questions(&mut self, question: &Question) -> GenResult<()> {
        let details = self.details;
        for (class_name, class_record) in &details.classes {
            for (method_name, value) in class_record.methods() {
                let entity = format!("{class_name}.{method_name}");
                let method_record = EntityRecord::from_value(value)
                    .ok_or_else(|| GenError::MalformedRecord {
                        entity: entity.clone(),
                    })?;
                let context = require_text(&method_record, &entity, question.kind.code_key())?;
                let query = template::render(
                    &question.text,
                    &[
                        ("filename", self.base_name),
                        ("class_name", class_name),
                        ("method_name", method_name),
                    ],
                )?;
                self.answer_question(question, &method_record, &query, context)?;
            }
        }
        Ok(())
    }

    /// The variables path: normalize and comma-join the entity's variable
    /// list, fill a template that names both the entity and its variables,
    /// and route through the model path. Entities with an empty variable
    /// list are skipped.
    fn variable_purpose_question(
        &mut self,
        question: &Question,
        name: &str,
        record: &EntityRecord,
        context: &str,
    ) -> GenResult<()> {
        let variables_key = question.kind.variables_key();
        let raw = record
            .get(variables_key)
            .ok_or_else(|| GenError::MissingKey {
                entity: name.to_string(),
                key: variables_key.to_string(),
            })?;
        if is_falsy(raw) {
            return Ok(());
        }

        let cleaned = clean_unique_elements(&value_to_text(raw));
        let listing = cleaned
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        let query = template::render(
            &question.text,
            &[
                ("filename", self.base_name),
                (question.kind.name_placeholder(), name),
                (variables_key, &listing),
            ],
        )?;
        self.answer_question(question, record, &query, context)
    }

    /// Resolves the answer for one rendered query and appends the entries if
    /// it is accepted.
    ///
    /// `code_graph` ids take the raw structured value verbatim; `purpose` ids
    /// consult the model when enabled; everything else is a normalized static
    /// lookup (absent facts yield an empty, rejected answer).
    fn answer_question(
        &mut self,
        question: &Question,
        record: &EntityRecord,
        query: &str,
        context: &str,
    ) -> GenResult<()> {
        let answer = if question.is_code_graph() {
            record
                .get(&question.id)
                .cloned()
                .unwrap_or(Value::Object(Default::default()))
        } else if self.use_llm && question.is_purpose() {
            Value::String(self.answer_via_model(query, context))
        } else {
            let raw = record.get(&question.id).map(value_to_text).unwrap_or_default();
            Value::String(clean_unique_elements(&raw))
        };

        self.accept(question.kind, record, query, context, answer)
    }

    /// Consults the model for an open-ended answer. Every failure here is
    /// contained: the error is logged and the question simply yields no
    /// answer, so the pass continues.
    fn answer_via_model(&self, query: &str, context: &str) -> String {
        let Some(model) = self.model else {
            error!("{}", ModelError::Unavailable);
            return String::new();
        };

        let prompt = match self.prompt.fill(context, query) {
            Ok(prompt) => prompt,
            Err(e) => {
                error!(error = %e, "Failed to build model prompt");
                return String::new();
            }
        };

        info!(query = %query, "Model query");
        match model.complete(&prompt) {
            Ok(response) => {
                info!(response = %response, "Model response");
                response
            }
            Err(e) => {
                error!(error = %e, "Failed to generate model response");
                String::new()
            }
        }
    }

    /// Appends the paired entries unless the answer is rejected (empty, the
    /// `"None"` placeholder, or an empty structured value). For file
    /// questions with the summary flag, the instruction input becomes the
    /// file summary; any model call has already seen the real code.
    fn accept(
        &mut self,
        kind: QuestionKind,
        record: &EntityRecord,
        query: &str,
        context: &str,
        answer: Value,
    ) -> GenResult<()> {
        if is_rejected(&answer) {
            return Ok(());
        }
        let answer = match answer {
            Value::String(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Ok(());
                }
                Value::String(trimmed.to_string())
            }
            structured => structured,
        };

        let input = if kind == QuestionKind::File && self.use_summary {
            require_text(record, self.base_name, "file_summary")?.to_string()
        } else {
            context.to_string()
        };

        self.dataset.record(query, answer, input);
        Ok(())
    }
}

/// Looks up a structural metadata key that must exist and be text.
fn require_text<'r>(record: &'r EntityRecord, entity: &str, key: &str) -> GenResult<&'r str> {
    record.get_str(key).ok_or_else(|| GenError::MissingKey {
        entity: entity.to_string(),
        key: key.to_string(),
    })
}

/// JSON emptiness in the sense the acceptance rules use.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Whether an answer produces no entries.
fn is_rejected(answer: &Value) -> bool {
    is_falsy(answer) || answer.as_str() == Some("None")
}
