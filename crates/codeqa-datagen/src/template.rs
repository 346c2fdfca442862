//! Runtime rendering of templates with named `{placeholder}` slots.

use crate::error::{GenError, GenResult};

/// Substitutes named placeholders into a template.
///
/// `{{` and `}}` are literal braces. A placeholder with no supplied value, an
/// unterminated `{`, or a stray `}` is an error: templates come from caller
/// configuration and a mismatch must surface rather than produce a silently
/// broken question. Supplying values the template never mentions is fine.
pub fn render(template: &str, values: &[(&str, &str)]) -> GenResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(inner) => name.push(inner),
                        None => {
                            return Err(GenError::MalformedTemplate {
                                message: format!("unterminated placeholder `{{{name}`"),
                            })
                        }
                    }
                }
                let value = values
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| *value)
                    .ok_or(GenError::UnknownPlaceholder { name })?;
                out.push_str(value);
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                    out.push('}');
                } else {
                    return Err(GenError::MalformedTemplate {
                        message: "single `}` outside a placeholder".to_string(),
                    });
                }
            }
            other => out.push(other),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_named_placeholders() {
        let rendered = render(
            "Describe {name} in {filename}",
            &[("filename", "m.py"), ("name", "f")],
        )
        .unwrap();
        assert_eq!(rendered, "Describe f in m.py");
    }

    #[test]
    fn test_unused_values_are_fine() {
        let rendered = render("hello", &[("filename", "m.py")]).unwrap();
        assert_eq!(rendered, "hello");
    }

    #[test]
    fn test_escaped_braces() {
        let rendered = render("{{literal}} {x}", &[("x", "v")]).unwrap();
        assert_eq!(rendered, "{literal} v");
    }

    #[test]
    fn test_unknown_placeholder_errors() {
        let err = render("Describe {missing}", &[("filename", "m.py")]).unwrap_err();
        assert!(matches!(err, GenError::UnknownPlaceholder { name } if name == "missing"));
    }

    #[test]
    fn test_unterminated_placeholder_errors() {
        let err = render("Describe {oops", &[]).unwrap_err();
        assert!(matches!(err, GenError::MalformedTemplate { .. }));
    }

    #[test]
    fn test_stray_closing_brace_errors() {
        let err = render("oops }", &[]).unwrap_err();
        assert!(matches!(err, GenError::MalformedTemplate { .. }));
    }
}
