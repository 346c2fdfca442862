//! Error types for the dataset generation pass.

use thiserror::Error;

/// Result type alias for generation operations.
pub type GenResult<T> = Result<T, GenError>;

/// Errors that abort a generation pass.
///
/// Model failures are deliberately absent: they are contained at the
/// invocation boundary and surface as [`ModelError`] there.
#[derive(Debug, Error)]
pub enum GenError {
    /// A structural metadata key a question depends on was absent or not text.
    #[error("missing required metadata key `{key}` for `{entity}`")]
    MissingKey { entity: String, key: String },

    /// A metadata entry expected to be an object was something else.
    #[error("metadata entry for `{entity}` is not an object")]
    MalformedRecord { entity: String },

    /// A template referenced a placeholder with no supplied value.
    #[error("no value supplied for placeholder `{name}`")]
    UnknownPlaceholder { name: String },

    /// A template's braces do not pair up.
    #[error("malformed template: {message}")]
    MalformedTemplate { message: String },

    /// Question catalog could not be parsed.
    #[error("catalog parse error: {0}")]
    CatalogParse(#[from] serde_json::Error),

    /// I/O error (catalog loading).
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for model invocations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Failures at the model invocation boundary.
///
/// The generator contains these: a failed invocation is logged and the
/// affected question yields no entries, while the pass continues.
#[derive(Debug, Error)]
pub enum ModelError {
    /// No model handle is configured.
    #[error("model not available")]
    Unavailable,

    /// Provider construction failed before any call was made.
    #[error("model initialization failed: {message}")]
    Initialization { message: String },

    /// The inference call itself failed.
    #[error("model invocation failed: {message}")]
    Invocation { message: String },
}
