//! Response repair: textual fixes that turn near-JSON model output into parseable JSON.
//!
//! One repair round applies five passes in order:
//!
//! 1. remove residual markdown fence markers,
//! 2. collapse double-encoded file objects and `code` strings,
//! 3. normalize escapes inside `code` strings,
//! 4. turn backtick-delimited `code` values into JSON string literals,
//! 5. strip control characters that JSON cannot carry.
//!
//! Every pass is a linear scan; none needs the document to parse first. The
//! passes only agree with each other because they share one notion of where
//! a `code` value starts ([`next_member`]) and where it ends
//! ([`find_code_end`]).
//!
//! [`repair`] repeats the round until the text stops changing, so running it
//! twice gives the same result as running it once.

use serde_json::Value;

/// Upper bound on repair rounds; realistic input settles in two.
const MAX_ROUNDS: usize = 4;

/// Keys a stringified file object may carry alongside `code`.
const FILE_CONTENT_KEYS: &[&str] = &["code", "path", "language", "filename"];

/// Repair a JSON candidate. Best-effort, never fails.
pub fn repair(candidate: &str) -> String {
    let mut current = candidate.to_string();
    for round in 1..=MAX_ROUNDS {
        let next = repair_round(&current);
        if next == current {
            return current;
        }
        tracing::trace!(round, before = current.len(), after = next.len(), "repair round");
        current = next;
    }
    current
}

fn repair_round(text: &str) -> String {
    let text = remove_fence_markers(text);
    let text = collapse_double_encoding(&text);
    let text = normalize_code_escapes(&text);
    let text = replace_template_literals(&text);
    strip_control_chars(&text)
}

// ---------------------------------------------------------------------------
// Pass 1: fence markers
// ---------------------------------------------------------------------------

/// Delete every run of three or more backticks plus the language tag that
/// follows an opening fence.
pub(crate) fn remove_fence_markers(text: &str) -> String {
    if !text.contains("```") {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] != '`' {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        let run_start = i;
        while i < chars.len() && chars[i] == '`' {
            i += 1;
        }
        if i - run_start >= 3 {
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
        } else {
            out.extend(&chars[run_start..i]);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Pass 2: double encoding
// ---------------------------------------------------------------------------

fn collapse_double_encoding(text: &str) -> String {
    rewrite_members(text, |key, text, start| {
        let opens_string = text.as_bytes().get(start) == Some(&b'"');
        if key == "code" && opens_string {
            let Some(end) = find_code_end(text, start + 1, b'"') else {
                return Rewrite::Halt;
            };
            Rewrite::Span {
                end,
                replacement: collapse_code_body(&text[start + 1..end]),
            }
        } else if key.starts_with('/') && opens_string {
            let Some(end) = find_string_end(text, start + 1) else {
                return Rewrite::Halt;
            };
            Rewrite::Span {
                end,
                replacement: collapse_file_value(&text[start + 1..end]),
            }
        } else {
            Rewrite::Descend
        }
    })
}

/// Unwrap a `code` string whose content is itself an encoded string or file
/// object. Returns the replacement literal, or `None` when it is plain code.
fn collapse_code_body(body: &str) -> Option<String> {
    let decoded = decode_body(&normalize_code_body(body))?;
    let collapsed = unwrap_encoded_code(&decoded)?;
    Some(Value::String(collapsed).to_string())
}

/// Replace a path-keyed string holding a stringified `{"code": ...}` object
/// with the object itself.
fn collapse_file_value(body: &str) -> Option<String> {
    let mut decoded = decode_body(&normalize_code_body(body))?;
    while let Some(inner) = decode_quoted(&decoded) {
        decoded = inner;
    }

    let value: Value = serde_json::from_str(decoded.trim()).ok()?;
    file_content_code(&value)?;
    // The unwrapped object's own code may be encoded a second time.
    Some(collapse_double_encoding(&value.to_string()))
}

/// Peel encoding layers until the content is neither a quoted JSON string nor
/// a file object. `None` if there was nothing to peel.
fn unwrap_encoded_code(decoded: &str) -> Option<String> {
    let mut current = decoded.to_string();
    let mut peeled = false;
    loop {
        if let Some(inner) = decode_quoted(&current) {
            current = inner;
        } else if let Some(code) = serde_json::from_str::<Value>(current.trim())
            .ok()
            .as_ref()
            .and_then(file_content_code)
        {
            current = code.to_string();
        } else {
            break;
        }
        peeled = true;
    }
    peeled.then_some(current)
}

/// Decode `text` if, trimmed, it is exactly one JSON string literal.
fn decode_quoted(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.len() < 2 || !trimmed.starts_with('"') || !trimmed.ends_with('"') {
        return None;
    }
    serde_json::from_str(trimmed).ok()
}

/// The `code` of a value shaped like a file object, and nothing else.
fn file_content_code(value: &Value) -> Option<&str> {
    let object = value.as_object()?;
    if !object.keys().all(|k| FILE_CONTENT_KEYS.contains(&k.as_str())) {
        return None;
    }
    object.get("code")?.as_str()
}

fn decode_body(body: &str) -> Option<String> {
    serde_json::from_str(&format!("\"{body}\"")).ok()
}

// ---------------------------------------------------------------------------
// Pass 3: escape normalization
// ---------------------------------------------------------------------------

fn normalize_code_escapes(text: &str) -> String {
    rewrite_members(text, |key, text, start| {
        if key != "code" || text.as_bytes().get(start) != Some(&b'"') {
            return Rewrite::Descend;
        }
        let Some(end) = find_code_end(text, start + 1, b'"') else {
            return Rewrite::Halt;
        };
        let body = &text[start + 1..end];
        let normalized = normalize_code_body(body);
        Rewrite::Span {
            end,
            replacement: (normalized != body).then(|| format!("\"{normalized}\"")),
        }
    })
}

/// Re-escape the raw body of a code string so it is a valid JSON string body.
///
/// Valid escapes are kept. A backslash that starts no valid escape is itself
/// escaped, which preserves the source text (`\'` stays `\'` in the decoded
/// code). Interior quotes are escaped, raw newlines, carriage returns and tabs
/// become their escapes, and other control characters are dropped.
pub(crate) fn normalize_code_body(body: &str) -> String {
    let mut out = String::with_capacity(body.len() + body.len() / 16);
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.peek().copied() {
                Some(n @ ('"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't')) => {
                    out.push('\\');
                    out.push(n);
                    chars.next();
                }
                Some('u') => {
                    let hex: String = chars.clone().skip(1).take(4).collect();
                    if hex.len() == 4 && hex.chars().all(|h| h.is_ascii_hexdigit()) {
                        out.push_str("\\u");
                        out.push_str(&hex);
                        for _ in 0..5 {
                            chars.next();
                        }
                    } else {
                        out.push_str("\\\\");
                    }
                }
                _ => out.push_str("\\\\"),
            },
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if is_stray_control(c) => {}
            c => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Pass 4: template literals
// ---------------------------------------------------------------------------

fn replace_template_literals(text: &str) -> String {
    rewrite_members(text, |key, text, start| {
        if key != "code" || text.as_bytes().get(start) != Some(&b'`') {
            return Rewrite::Descend;
        }
        let Some(end) = find_code_end(text, start + 1, b'`') else {
            return Rewrite::Halt;
        };
        Rewrite::Span {
            end,
            replacement: Some(template_to_literal(&text[start + 1..end])),
        }
    })
}

/// Encode raw template text as a canonical JSON string literal.
fn template_to_literal(body: &str) -> String {
    let literal = Value::String(body.to_string()).to_string();
    let inner = &literal[1..literal.len() - 1];
    collapse_code_body(inner).unwrap_or_else(|| format!("\"{}\"", normalize_code_body(inner)))
}

// ---------------------------------------------------------------------------
// Pass 5: control characters
// ---------------------------------------------------------------------------

fn strip_control_chars(text: &str) -> String {
    if !text.chars().any(is_stray_control) {
        return text.to_string();
    }
    text.chars().filter(|&c| !is_stray_control(c)).collect()
}

/// Control characters JSON text cannot carry raw, plus DEL and the BOM.
fn is_stray_control(c: char) -> bool {
    matches!(
        c,
        '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{7f}' | '\u{feff}'
    )
}

// ---------------------------------------------------------------------------
// Shared scanning
// ---------------------------------------------------------------------------

/// An object member `"key":` found by [`next_member`].
struct Member<'a> {
    key: &'a str,
    /// Byte index of the first non-whitespace character of the value.
    value_start: usize,
}

/// Find the next `"key":` that opens an object member at or after `from`.
///
/// A member key must follow `{` or `,` and contain no escapes or newlines,
/// which rules out quotes that sit inside properly escaped string content.
fn next_member(text: &str, from: usize) -> Option<Member<'_>> {
    let mut search = from;
    while let Some(offset) = text[search..].find('"') {
        let quote = search + offset;
        search = quote + 1;

        if !text[..quote].trim_end().ends_with(['{', ',']) {
            continue;
        }
        let len = text[quote + 1..].find(['"', '\\', '\n'])?;
        let key_end = quote + 1 + len;
        if text.as_bytes()[key_end] != b'"' {
            continue;
        }
        let Some(value) = text[key_end + 1..].trim_start().strip_prefix(':') else {
            continue;
        };
        let value_start = text.len() - value.trim_start().len();
        return Some(Member {
            key: &text[quote + 1..key_end],
            value_start,
        });
    }
    None
}

/// What a pass wants done with one member's value.
enum Rewrite {
    /// Not a value this pass handles; keep scanning inside it.
    Descend,
    /// The value occupies `value_start..=end`; substitute `replacement` if set.
    Span {
        end: usize,
        replacement: Option<String>,
    },
    /// The value never terminates; leave the rest of the text untouched.
    Halt,
}

/// Walk every object member left to right, letting `visit` rewrite values.
fn rewrite_members(text: &str, mut visit: impl FnMut(&str, &str, usize) -> Rewrite) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    while let Some(member) = next_member(text, cursor) {
        out.push_str(&text[cursor..member.value_start]);
        cursor = member.value_start;
        match visit(member.key, text, member.value_start) {
            Rewrite::Descend => {}
            Rewrite::Span { end, replacement } => {
                match replacement {
                    Some(replacement) => out.push_str(&replacement),
                    None => out.push_str(&text[member.value_start..=end]),
                }
                cursor = end + 1;
            }
            Rewrite::Halt => break,
        }
    }
    out.push_str(&text[cursor..]);
    out
}

/// First unescaped `"` at or after `from`.
fn find_string_end(text: &str, from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Closing delimiter of a code value starting at `from`.
///
/// Model output often leaves quotes inside code unescaped, so a delimiter
/// only closes the value when the text after it looks like the end of a file
/// object (see [`closes_code_value`]).
fn find_code_end(text: &str, from: usize, delimiter: u8) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == delimiter && closes_code_value(&text[i + 1..]) => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// After a code value: end of input, another member, or closing braces
/// followed by end of input or the next file.
fn closes_code_value(rest: &str) -> bool {
    let rest = rest.trim_start();
    match rest.as_bytes().first() {
        None => true,
        Some(b',') => starts_member(&rest[1..]),
        Some(b'}') => {
            let rest = rest.trim_start_matches(|c: char| c == '}' || c.is_whitespace());
            rest.is_empty() || rest.strip_prefix(',').is_some_and(starts_member)
        }
        Some(_) => false,
    }
}

/// `"key":` follows after whitespace, or the object closes.
fn starts_member(rest: &str) -> bool {
    let rest = rest.trim_start();
    if rest.starts_with('}') {
        return true;
    }
    let Some(key) = rest.strip_prefix('"') else {
        return false;
    };
    let Some(end) = key.find(['"', '\\', '\n']) else {
        return false;
    };
    key.as_bytes()[end] == b'"' && key[end + 1..].trim_start().starts_with(':')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Value {
        serde_json::from_str(text).unwrap_or_else(|e| panic!("invalid JSON ({e}): {text}"))
    }

    #[test]
    fn test_valid_json_is_untouched() {
        let text = r#"{"/src/App.js": {"code": "const a = \"x\";\nexport default a;"}}"#;
        assert_eq!(repair(text), text);
    }

    #[test]
    fn test_raw_newlines_and_quotes_in_code() {
        let text = "{\"/src/App.js\": {\"code\": \"import React from 'react';\nexport default () => <div className=\"app\">Hi</div>;\"}}";
        let repaired = repair(text);
        let value = parse(&repaired);
        assert_eq!(
            value["/src/App.js"]["code"],
            "import React from 'react';\nexport default () => <div className=\"app\">Hi</div>;"
        );
    }

    #[test]
    fn test_jsx_style_object_does_not_close_value() {
        let text = "{\"/src/App.js\": {\"code\": \"<p style={{color: \"red\"}}>x</p>\"}}";
        let value = parse(&repair(text));
        assert_eq!(
            value["/src/App.js"]["code"],
            "<p style={{color: \"red\"}}>x</p>"
        );
    }

    #[test]
    fn test_double_encoded_code_string() {
        let text = r#"{"/src/App.js": {"code": "\"import React from 'react';\\nexport default App;\""}}"#;
        let value = parse(&repair(text));
        assert_eq!(
            value["/src/App.js"]["code"],
            "import React from 'react';\nexport default App;"
        );
    }

    #[test]
    fn test_double_encoded_file_object_in_code() {
        let text = r#"{"/src/App.js": {"code": "{\"code\": \"export default 1;\"}"}}"#;
        let value = parse(&repair(text));
        assert_eq!(value["/src/App.js"]["code"], "export default 1;");
    }

    #[test]
    fn test_stringified_file_value() {
        let text = r#"{"/src/App.js": "{\"code\": \"export default 1;\"}", "/src/index.js": {"code": "x"}}"#;
        let value = parse(&repair(text));
        assert_eq!(value["/src/App.js"]["code"], "export default 1;");
        assert_eq!(value["/src/index.js"]["code"], "x");
    }

    #[test]
    fn test_package_json_code_is_not_collapsed() {
        let text = r#"{"/package.json": {"code": "{\"name\": \"site\", \"private\": true}"}}"#;
        assert_eq!(repair(text), text);
    }

    #[test]
    fn test_invalid_escapes_are_preserved_as_text() {
        let text = r#"{"/src/App.js": {"code": "const s = 'it\'s';"}}"#;
        let value = parse(&repair(text));
        assert_eq!(value["/src/App.js"]["code"], r"const s = 'it\'s';");
    }

    #[test]
    fn test_template_literal_code() {
        let text = "{\"/src/App.js\": {\"code\": `import React from \"react\";\nconst greet = (n) => `Hi ${n}`;`}}";
        let value = parse(&repair(text));
        assert_eq!(
            value["/src/App.js"]["code"],
            "import React from \"react\";\nconst greet = (n) => `Hi ${n}`;"
        );
    }

    #[test]
    fn test_fence_markers_removed() {
        assert_eq!(remove_fence_markers("```json\n{}\n```"), "\n{}\n");
        assert_eq!(remove_fence_markers("a `b` ``c``"), "a `b` ``c``");
    }

    #[test]
    fn test_control_characters_stripped() {
        let text = "{\u{feff}\"/a\": {\"code\": \"x\u{1}y\"}\u{0}}";
        let value = parse(&repair(text));
        assert_eq!(value["/a"]["code"], "xy");
    }

    #[test]
    fn test_plain_prose_passes_through() {
        let text = "Sorry, I can only describe the design in words.";
        assert_eq!(repair(text), text);
    }

    #[test]
    fn test_unterminated_code_is_left_alone() {
        let text = "{\"/src/App.js\": {\"code\": \"abc \" def";
        assert_eq!(repair(text), text);
    }

    #[test]
    fn test_normalize_body() {
        assert_eq!(normalize_code_body("a\nb"), "a\\nb");
        assert_eq!(normalize_code_body("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(normalize_code_body("\\u00e9 \\uZZ"), "\\u00e9 \\\\uZZ");
        assert_eq!(normalize_code_body("end\\"), "end\\\\");
        let once = normalize_code_body("x\t\\q\"\r");
        assert_eq!(normalize_code_body(&once), once);
    }

    #[test]
    fn test_idempotent_on_defect_corpus() {
        let corpus = [
            "{\"/src/App.js\": {\"code\": \"line1\nline2 \"quoted\" \\x\"}}",
            r#"{"/src/App.js": "{\"code\": \"\\\"nested\\\"\"}"}"#,
            "{\"/src/App.js\": {\"code\": `a\n\"b\"`}, \"/src/index.js\": {\"code\": \"c\"}}",
            "```json\n{\"/a\": {\"code\": \"```js\nx\n```\"}}\n```",
            "{\"/a\": {\"code\": \"\u{2}\u{7f}ok\"}}",
            "no json here at all",
            "{\"/a\": {\"code\": \"truncated",
            "",
        ];
        for text in corpus {
            let once = repair(text);
            assert_eq!(repair(&once), once, "not idempotent for {text:?}");
        }
    }
}
