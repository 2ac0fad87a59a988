//! Response Sanitizer — recovers a JSON document from noisy model output.
//!
//! Models wrap payloads in code fences, prepend "Here is the analysis:"
//! commentary and append prose after the closing brace. This module is total
//! over arbitrary input: it either returns a parsed document or
//! [`SanitizeError::Malformed`], never anything else.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Cap on how much of the offending text goes into the error, so a
/// multi-kilobyte model response never lands in the logs whole.
const DIAGNOSTIC_PREFIX_CHARS: usize = 120;

#[derive(Debug, Clone, Error)]
pub enum SanitizeError {
    #[error("malformed model response: {prefix:?}")]
    Malformed { prefix: String },
}

fn malformed(text: &str) -> SanitizeError {
    SanitizeError::Malformed {
        prefix: text.chars().take(DIAGNOSTIC_PREFIX_CHARS).collect(),
    }
}

/// Extracts and parses the first JSON document embedded in `raw`.
pub fn extract_json(raw: &str) -> Result<serde_json::Value, SanitizeError> {
    let unfenced = strip_code_fences(raw);

    let start = unfenced.find(['{', '[']).ok_or_else(|| malformed(unfenced))?;
    let candidate = &unfenced[start..];

    // If the depth scan never closes, hand the tail to the parser anyway so
    // the error carries the real payload prefix.
    let end = document_end(candidate).unwrap_or(candidate.len());
    let document = &candidate[..end];

    serde_json::from_str(document).map_err(|_| malformed(document))
}

/// [`extract_json`] plus deserialization into a typed wire struct.
pub fn extract_struct<T: DeserializeOwned>(raw: &str) -> Result<T, SanitizeError> {
    let value = extract_json(raw)?;
    serde_json::from_value(value).map_err(|_| malformed(raw))
}

/// Strips a wrapping ``` fence, keeping the first fenced block when several
/// exist. Text that does not open with a fence is returned untouched; prose
/// around an embedded fence is handled by the document scan instead.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.trim_start();
    match rest.find("```") {
        Some(end) => rest[..end].trim_end(),
        None => rest,
    }
}

/// Byte offset one past the end of the JSON document starting at `text[0]`,
/// or `None` if the depth counters never return to zero.
///
/// Braces and brackets inside string literals do not count; escape state is
/// tracked so `"\""` does not end the string.
fn document_end(text: &str) -> Option<usize> {
    let mut brace_depth: i64 = 0;
    let mut bracket_depth: i64 = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => brace_depth += 1,
            '}' => brace_depth -= 1,
            '[' => bracket_depth += 1,
            ']' => bracket_depth -= 1,
            _ => {}
        }
        if brace_depth == 0 && bracket_depth == 0 {
            return Some(i + c.len_utf8());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_object_passes_through() {
        let value = extract_json(r#"{"score": 85}"#).unwrap();
        assert_eq!(value, json!({"score": 85}));
    }

    #[test]
    fn test_fenced_object_with_json_tag() {
        let value = extract_json("```json\n{\"score\": 85}\n```").unwrap();
        assert_eq!(value, json!({"score": 85}));
    }

    #[test]
    fn test_fenced_object_without_tag() {
        let value = extract_json("```\n[1, 2, 3]\n```").unwrap();
        assert_eq!(value, json!([1, 2, 3]));
    }

    #[test]
    fn test_leading_prose_is_discarded() {
        let value = extract_json("Here is the analysis you asked for:\n{\"score\": 42}").unwrap();
        assert_eq!(value, json!({"score": 42}));
    }

    #[test]
    fn test_trailing_prose_is_discarded() {
        let value =
            extract_json("{\"score\": 42}\n\nLet me know if you need anything else!").unwrap();
        assert_eq!(value, json!({"score": 42}));
    }

    #[test]
    fn test_prose_fence_and_trailer_equal_bare_document() {
        let noisy = "Sure! Here it is:\n```json\n{\"a\": [1, 2], \"b\": \"x\"}\n```\nHope that helps.";
        let bare = "{\"a\": [1, 2], \"b\": \"x\"}";
        assert_eq!(extract_json(noisy).unwrap(), extract_json(bare).unwrap());
    }

    #[test]
    fn test_first_of_multiple_fenced_blocks_wins() {
        let raw = "```json\n{\"first\": true}\n```\nand also\n```json\n{\"second\": true}\n```";
        assert_eq!(extract_json(raw).unwrap(), json!({"first": true}));
    }

    #[test]
    fn test_braces_inside_strings_do_not_terminate_scan() {
        let value = extract_json(r#"{"a": "text with } brace"}"#).unwrap();
        assert_eq!(value, json!({"a": "text with } brace"}));
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let value = extract_json(r#"{"a": "quote \" then } brace"} trailing"#).unwrap();
        assert_eq!(value, json!({"a": "quote \" then } brace"}));
    }

    #[test]
    fn test_nested_structures_end_at_outer_close() {
        let value = extract_json(r#"{"a": {"b": [1, {"c": 2}]}} extra"#).unwrap();
        assert_eq!(value, json!({"a": {"b": [1, {"c": 2}]}}));
    }

    #[test]
    fn test_array_payload() {
        let value = extract_json("The list:\n[{\"x\": 1}, {\"x\": 2}]\ndone").unwrap();
        assert_eq!(value, json!([{"x": 1}, {"x": 2}]));
    }

    #[test]
    fn test_no_document_is_malformed() {
        let err = extract_json("I could not produce an analysis, sorry.").unwrap_err();
        let SanitizeError::Malformed { prefix } = err;
        assert!(prefix.starts_with("I could not"));
    }

    #[test]
    fn test_unclosed_document_is_malformed() {
        assert!(extract_json(r#"{"a": [1, 2"#).is_err());
    }

    #[test]
    fn test_garbage_with_negative_depth_is_malformed() {
        assert!(extract_json("{]}").is_err());
    }

    #[test]
    fn test_diagnostic_prefix_is_bounded() {
        let long_garbage = format!("{{\"a\": {}", "x".repeat(10_000));
        let SanitizeError::Malformed { prefix } = extract_json(&long_garbage).unwrap_err();
        assert!(prefix.chars().count() <= 120);
    }

    #[test]
    fn test_extract_struct_typed() {
        #[derive(serde::Deserialize)]
        struct Wire {
            score: f64,
        }
        let wire: Wire = extract_struct("```json\n{\"score\": 77}\n```").unwrap();
        assert!((wire.score - 77.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_extract_struct_shape_mismatch_is_malformed() {
        #[derive(serde::Deserialize)]
        struct Wire {
            #[allow(dead_code)]
            score: f64,
        }
        let result: Result<Wire, _> = extract_struct(r#"{"score": "not a number"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_input_is_malformed() {
        assert!(extract_json("").is_err());
        assert!(extract_json("   \n  ").is_err());
    }
}
