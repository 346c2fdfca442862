//! Core domain types shared across the codeqa workspace.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// File Metadata Types
// =============================================================================

/// Prefix marking nested method records inside a class record.
pub const METHOD_KEY_PREFIX: &str = "class_method_";

/// Metadata record for a single entity (the whole file, a function, a class,
/// or a method).
///
/// The record is a flat JSON object whose keys are fact identifiers
/// (e.g. `file_docstring`, `function_parameters`). Structural keys follow the
/// `{kind}_code` / `{kind}_variables` convention, and class records carry
/// their methods as nested objects keyed `class_method_<name>`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityRecord(pub serde_json::Map<String, Value>);

impl EntityRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from a JSON value, if it is an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().map(|fields| Self(fields.clone()))
    }

    /// Adds a fact, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Inserts a fact.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Looks up a fact by identifier.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Looks up a fact and returns it as text, if it is a JSON string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Iterates the nested method entries of a class record, keyed by the
    /// method-name suffix of each `class_method_*` key.
    pub fn methods(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.0
            .iter()
            .filter_map(|(key, value)| key.strip_prefix(METHOD_KEY_PREFIX).map(|name| (name, value)))
    }

    /// Number of entries in the record.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Extracted metadata for one source file: whole-file facts plus per-function
/// and per-class records.
///
/// Produced by an external extractor; the generation pass treats it as
/// read-only input.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDetails {
    /// Whole-file record (source code, summary, file-level facts).
    pub file_info: EntityRecord,
    /// Per-function records, keyed by function name.
    #[serde(default)]
    pub functions: BTreeMap<String, EntityRecord>,
    /// Per-class records, keyed by class name. Each class record may nest
    /// method records under `class_method_<name>` keys.
    #[serde(default)]
    pub classes: BTreeMap<String, EntityRecord>,
}

impl FileDetails {
    /// Parses file details from their JSON wire form.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

// =============================================================================
// Question Catalog Types
// =============================================================================

/// Scope of a catalog question: which entities it runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// One invocation against the whole file.
    File,
    /// One invocation per function.
    Function,
    /// One invocation per class.
    Class,
    /// One invocation per (class, method) pair.
    Method,
}

impl QuestionKind {
    /// Key prefix used by this kind's metadata and placeholders.
    pub fn prefix(&self) -> &'static str {
        match self {
            QuestionKind::File => "file",
            QuestionKind::Function => "function",
            QuestionKind::Class => "class",
            QuestionKind::Method => "method",
        }
    }

    /// Metadata key holding the entity's source code.
    pub fn code_key(&self) -> &'static str {
        match self {
            QuestionKind::File => "file_code",
            QuestionKind::Function => "function_code",
            QuestionKind::Class => "class_code",
            QuestionKind::Method => "method_code",
        }
    }

    /// Metadata key (and template placeholder) for the entity's variable list.
    pub fn variables_key(&self) -> &'static str {
        match self {
            QuestionKind::File => "file_variables",
            QuestionKind::Function => "function_variables",
            QuestionKind::Class => "class_variables",
            QuestionKind::Method => "method_variables",
        }
    }

    /// Template placeholder carrying the entity name.
    pub fn name_placeholder(&self) -> &'static str {
        match self {
            QuestionKind::File => "file_name",
            QuestionKind::Function => "function_name",
            QuestionKind::Class => "class_name",
            QuestionKind::Method => "method_name",
        }
    }
}

/// One entry of the ordered question catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier; doubles as the metadata key for static answers. Suffixes
    /// carry routing semantics (see the helper methods).
    pub id: String,
    /// Template text with named placeholders (`{filename}`, `{class_name}`, ...).
    pub text: String,
    /// Entity scope the question runs against.
    #[serde(rename = "type")]
    pub kind: QuestionKind,
}

impl Question {
    /// Creates a catalog entry.
    pub fn new(id: impl Into<String>, text: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind,
        }
    }

    /// Ids ending in `purpose` request a model-generated explanation rather
    /// than a static fact lookup.
    pub fn is_purpose(&self) -> bool {
        self.id.ends_with("purpose")
    }

    /// Ids ending in `code_graph` carry a structured answer that is taken
    /// verbatim, with no text normalization.
    pub fn is_code_graph(&self) -> bool {
        self.id.ends_with("code_graph")
    }

    /// Whether this is the per-kind variable-purpose form
    /// (`function_variable_purpose`, `class_variable_purpose`, ...).
    pub fn is_variable_purpose(&self) -> bool {
        self.id.strip_suffix("_variable_purpose") == Some(self.kind.prefix())
    }
}

// =============================================================================
// Output Record Types
// =============================================================================

/// A generated question/answer pair.
///
/// The answer is a JSON string for normalized text answers and a raw
/// structured value for `code_graph` answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaPair {
    /// The fully-rendered question text.
    pub question: String,
    /// The accepted answer.
    pub answer: Value,
}

/// A generated instruction-tuning record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructRecord {
    /// The fully-rendered question text, reused as the instruction.
    pub instruction: String,
    /// Context supplied with the instruction (entity source code, or the file
    /// summary when so configured).
    pub input: String,
    /// The accepted answer.
    pub output: Value,
}

/// The two output collections of one generation pass, in processing order.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Question/answer pairs.
    pub qa: Vec<QaPair>,
    /// Instruction/input/output triples.
    pub instruct: Vec<InstructRecord>,
}

impl Dataset {
    /// Appends a question/answer pair and its instruction record in a single
    /// step, so the two collections never diverge.
    pub fn record(&mut self, query: &str, answer: Value, input: String) {
        self.qa.push(QaPair {
            question: query.to_string(),
            answer: answer.clone(),
        });
        self.instruct.push(InstructRecord {
            instruction: query.to_string(),
            input,
            output: answer,
        });
    }

    /// Number of accepted entries.
    pub fn len(&self) -> usize {
        self.qa.len()
    }

    /// Whether the pass accepted no entries.
    pub fn is_empty(&self) -> bool {
        self.qa.is_empty()
    }
}
