//! Upstream reply normalization.
//!
//! The model is told to answer with bare JSON, but in practice replies arrive
//! wrapped in markdown fences or padded with prose. Normalization is limited
//! to fence stripping and outermost-object extraction; anything that still
//! does not parse is a terminal failure for the request, not repaired.

use serde_json::Value;

use crate::error::RelayError;

const SNIPPET_CHARS: usize = 200;

/// Turn the raw completion reply into the parsed response body.
///
/// Enforces only the top-level shape: the reply must parse to a JSON object,
/// and `ingredients`, when present, must be an array. Field-level contents are
/// returned verbatim.
pub fn normalize_reply(raw: &str) -> Result<Value, RelayError> {
    let cleaned = strip_code_fences(raw.trim());

    let parsed = match serde_json::from_str::<Value>(cleaned) {
        Ok(value) => value,
        // The model sometimes pads the object with prose; retry on the
        // outermost brace span.
        Err(_) => extract_object(cleaned)
            .and_then(|span| serde_json::from_str::<Value>(span).ok())
            .ok_or_else(|| malformed(raw))?,
    };

    if !parsed.is_object() {
        return Err(malformed(raw));
    }
    if let Some(ingredients) = parsed.get("ingredients") {
        if !ingredients.is_array() {
            return Err(malformed(raw));
        }
    }

    Ok(parsed)
}

fn malformed(raw: &str) -> RelayError {
    RelayError::MalformedUpstreamResponse {
        snippet: raw.chars().take(SNIPPET_CHARS).collect(),
    }
}

/// Strip code-fence markers bounding the reply, with or without a language tag.
/// Each side is stripped independently; an unbalanced fence still loses its
/// marker.
fn strip_code_fences(text: &str) -> &str {
    let mut t = text.trim();
    if let Some(rest) = t.strip_prefix("```") {
        let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
        t = rest.trim_start();
    }
    if let Some(rest) = t.strip_suffix("```") {
        t = rest.trim_end();
    }
    t
}

/// Outermost `{` .. `}` span, tolerating leading/trailing prose.
fn extract_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if start < end {
        Some(&text[start..=end])
    } else {
        None
    }
}

#[cfg(test)]
mod normalize_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_object_passes_through() {
        let parsed = normalize_reply(r#"{"productName":null,"ingredients":[]}"#).unwrap();
        assert_eq!(parsed, json!({"productName": null, "ingredients": []}));
    }

    #[test]
    fn test_fenced_with_language_tag() {
        let raw = "```json\n{\"ingredients\":[{\"name\":\"Glycerin\"}]}\n```";
        let parsed = normalize_reply(raw).unwrap();
        assert_eq!(parsed["ingredients"][0]["name"], "Glycerin");
    }

    #[test]
    fn test_fenced_without_language_tag() {
        let raw = "```\n{\"ingredients\":[]}\n```";
        assert!(normalize_reply(raw).unwrap().is_object());
    }

    #[test]
    fn test_surrounding_prose_is_tolerated() {
        let raw = "Here is the analysis you asked for:\n{\"ingredients\":[]}\nLet me know!";
        let parsed = normalize_reply(raw).unwrap();
        assert_eq!(parsed, json!({"ingredients": []}));
    }

    #[test]
    fn test_fence_and_prose_combined() {
        let raw = "Sure!\n```json\n{\"summary\":{\"safeCount\":1}}\n```";
        let parsed = normalize_reply(raw).unwrap();
        assert_eq!(parsed["summary"]["safeCount"], 1);
    }

    #[test]
    fn test_garbage_is_malformed() {
        let err = normalize_reply("I'm sorry, I can't analyze that.").unwrap_err();
        assert_eq!(err.kind(), "malformed_upstream_response");
    }

    #[test]
    fn test_top_level_array_is_malformed() {
        let err = normalize_reply(r#"[{"name":"Glycerin"}]"#).unwrap_err();
        assert_eq!(err.kind(), "malformed_upstream_response");
    }

    #[test]
    fn test_non_array_ingredients_is_malformed() {
        let err = normalize_reply(r#"{"ingredients":"Glycerin"}"#).unwrap_err();
        assert_eq!(err.kind(), "malformed_upstream_response");
    }

    #[test]
    fn test_snippet_is_truncated_on_char_boundary() {
        let raw = "é".repeat(500);
        let RelayError::MalformedUpstreamResponse { snippet } = normalize_reply(&raw).unwrap_err()
        else {
            panic!("expected malformed error");
        };
        assert_eq!(snippet.chars().count(), 200);
    }

    #[test]
    fn test_unbalanced_fence_still_parses() {
        let raw = "```json\n{\"ingredients\":[]}";
        assert!(normalize_reply(raw).unwrap().is_object());
    }
}
