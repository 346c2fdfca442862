//! Text normalization for answers and variable lists.

use regex::Regex;
use serde_json::Value;

/// Cleans a comma-separated string and deduplicates its elements.
///
/// Whitespace runs collapse to single spaces, each comma-separated piece is
/// trimmed and stripped of every character outside the permitted set
/// (word characters, `-`, `_`, `>`, whitespace, `:`, `/`, `.`), and duplicate
/// pieces are dropped keeping the first occurrence. The result joins the
/// surviving pieces with `", "`. Idempotent.
pub fn clean_unique_elements(input: &str) -> String {
    let whitespace = Regex::new(r"\s+").unwrap();
    let scrub = Regex::new(r"[^\w\-_>\s:/.]").unwrap();

    let collapsed = whitespace.replace_all(input, " ");

    let mut elements: Vec<String> = Vec::new();
    for piece in collapsed.split(',') {
        let cleaned = scrub.replace_all(piece.trim(), "").into_owned();
        if !elements.contains(&cleaned) {
            elements.push(cleaned);
        }
    }
    elements.join(", ")
}

/// Renders a JSON value as plain text ahead of normalization.
///
/// Strings pass through, arrays join their rendered elements with `", "`,
/// null becomes empty, and everything else uses its JSON form.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_to_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
