//! Response extraction: isolate the file-manifest JSON object from raw model text.
//!
//! Models wrap their answer in reasoning blocks, markdown fences, and
//! explanatory prose. Extraction is best-effort and never fails: when nothing
//! resembling an object is found the trimmed input comes back unchanged and
//! the validator rejects it.

use crate::repair::remove_fence_markers;

/// Isolate the JSON payload from raw model output.
pub fn extract(raw: &str) -> String {
    let text = strip_think_blocks(raw);
    let text = remove_fence_markers(&text);

    let Some(start) = find_object_start(&text) else {
        return text.trim().to_string();
    };
    if let Some(decoded) = decode_encoded_document(&text, start) {
        return extract(&decoded);
    }

    match find_object_end(&text, start) {
        Some(end) => text[start..=end].to_string(),
        // Truncated output: keep everything from the opening brace.
        None => text[start..].trim_end().to_string(),
    }
}

/// Strip `<think>...</think>` blocks that some models (qwen3, deepseek) emit.
pub fn strip_think_blocks(text: &str) -> String {
    let mut result = text.to_string();
    while let Some(start) = result.find("<think>") {
        if let Some(end_offset) = result[start..].find("</think>") {
            let end = start + end_offset + "</think>".len();
            result = format!("{}{}", &result[..start], &result[end..]);
        } else {
            // Unclosed think block: truncate from <think> onward
            result.truncate(start);
            break;
        }
    }
    result
}

/// Prefer a brace that opens a path-keyed object (`{ "/src/...`); otherwise
/// the first brace in the text.
fn find_object_start(text: &str) -> Option<usize> {
    let mut first = None;
    for (idx, ch) in text.char_indices() {
        if ch != '{' {
            continue;
        }
        first.get_or_insert(idx);
        let rest = text[idx + 1..].trim_start();
        if rest.starts_with("\"/") {
            return Some(idx);
        }
    }
    first
}

/// Decode a whole document that arrived as one JSON string literal, as in
/// `"{\"/src/App.js\": ...}"`. Only applies when the selected brace is the
/// first character of that literal and the decoded text opens an object.
fn decode_encoded_document(text: &str, start: usize) -> Option<String> {
    let quote = start.checked_sub(1)?;
    if text.as_bytes()[quote] != b'"' {
        return None;
    }
    let decoded = serde_json::Deserializer::from_str(&text[quote..])
        .into_iter::<String>()
        .next()?
        .ok()?;
    decoded.trim_start().starts_with('{').then_some(decoded)
}

/// Index of the brace closing the object opened at `start`.
///
/// Counts raw braces without tracking string literals, so an unbalanced
/// brace inside a code string can end the object early or late.
fn find_object_end(text: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, byte) in text.as_bytes()[start..].iter().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_json_with_trailing_prose() {
        let raw = "Here is your project:\n```json\n{\"/src/App.js\": {\"code\": \"x\"}}\n```\nLet me know if you need changes!";
        assert_eq!(extract(raw), "{\"/src/App.js\": {\"code\": \"x\"}}");
    }

    #[test]
    fn test_inline_fence_on_one_line() {
        let raw = "```json{\"/src/App.js\": {\"code\": \"x\"}}```";
        assert_eq!(extract(raw), "{\"/src/App.js\": {\"code\": \"x\"}}");
    }

    #[test]
    fn test_plain_prose_is_returned_trimmed() {
        let raw = "  I cannot help with that request.  \n";
        assert_eq!(extract(raw), "I cannot help with that request.");
    }

    #[test]
    fn test_prefers_path_keyed_brace() {
        let raw = "Config {like this} then {\n  \"/src/App.js\": {\"code\": \"a\"}\n} done";
        let extracted = extract(raw);
        assert!(extracted.starts_with("{\n  \"/src/App.js\""));
        assert!(extracted.ends_with('}'));
        assert!(!extracted.contains("done"));
    }

    #[test]
    fn test_files_wrapper_selects_inner_object() {
        let raw = r#"{"files": {"/src/App.js": {"code": "a"}}, "notes": "x"}"#;
        assert_eq!(extract(raw), r#"{"/src/App.js": {"code": "a"}}"#);
    }

    #[test]
    fn test_nested_objects_tolerated() {
        let raw = r#"{"/package.json": {"code": "{\"name\": \"app\", \"deps\": {\"react\": \"18\"}}"}} trailing"#;
        let extracted = extract(raw);
        assert!(extracted.ends_with("}}\"}}"));
        assert!(!extracted.contains("trailing"));
    }

    #[test]
    fn test_truncated_object_keeps_remainder() {
        let raw = "{\"/src/App.js\": {\"code\": \"abc";
        assert_eq!(extract(raw), raw);
    }

    #[test]
    fn test_think_blocks_removed() {
        let raw = "<think>maybe {\"/x\": 1}</think>{\"/src/App.js\": {\"code\": \"a\"}}";
        assert_eq!(extract(raw), "{\"/src/App.js\": {\"code\": \"a\"}}");
    }

    #[test]
    fn test_unclosed_think_block_truncates() {
        assert_eq!(strip_think_blocks("answer<think>rambling"), "answer");
    }

    #[test]
    fn test_document_encoded_as_string() {
        let raw = r#""{\"/src/App.js\": {\"code\": \"a\\nb\"}}""#;
        assert_eq!(extract(raw), "{\"/src/App.js\": {\"code\": \"a\\nb\"}}");
    }

    #[test]
    fn test_fenced_encoded_document_with_prose() {
        let raw = "Here you go:\n```json\n\"{\\\"/a\\\": {\\\"code\\\": \\\"x\\\"}}\"\n```\nThanks!";
        assert_eq!(extract(raw), "{\"/a\": {\"code\": \"x\"}}");
    }

    #[test]
    fn test_stringified_file_value_is_not_decoded_here() {
        let raw = r#"{"/src/App.js": "{\"code\": \"x\"}"}"#;
        assert_eq!(extract(raw), raw);
    }

    #[test]
    fn test_first_brace_without_path_key() {
        assert_eq!(extract("result: {\"a\": 1} end"), "{\"a\": 1}");
    }
}
