//! Question catalog loading.
//!
//! Catalogs ship as a JSON list of `{id, text, type}` records; order in the
//! file determines generation order.

use std::path::Path;

use tracing::info;

use codeqa_core::Question;

use crate::error::GenResult;

/// Parses a question catalog from its JSON form.
pub fn parse_questions(json: &str) -> GenResult<Vec<Question>> {
    Ok(serde_json::from_str(json)?)
}

/// Loads a question catalog from a file.
pub fn load_questions(path: impl AsRef<Path>) -> GenResult<Vec<Question>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let questions = parse_questions(&json)?;

    info!(
        path = %path.display(),
        count = questions.len(),
        "Loaded question catalog"
    );

    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeqa_core::QuestionKind;
    use std::io::Write;

    const CATALOG: &str = r#"[
        {"id": "file_docstring", "text": "Describe {filename}", "type": "file"},
        {"id": "function_purpose", "text": "What is {function_name} for?", "type": "function"}
    ]"#;

    #[test]
    fn test_parse_catalog_preserves_order() {
        let questions = parse_questions(CATALOG).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].id, "file_docstring");
        assert_eq!(questions[0].kind, QuestionKind::File);
        assert_eq!(questions[1].kind, QuestionKind::Function);
    }

    #[test]
    fn test_parse_rejects_unknown_kind() {
        let result = parse_questions(r#"[{"id": "x", "text": "t", "type": "module"}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CATALOG.as_bytes()).unwrap();

        let questions = load_questions(file.path()).unwrap();
        assert_eq!(questions.len(), 2);
    }

    #[test]
    fn test_load_missing_file_errors() {
        assert!(load_questions("/nonexistent/questions.json").is_err());
    }
}
