//! JSON object extraction from model reply text.
//!
//! Models asked for "ONLY the JSON" still wrap replies in prose or markdown
//! code fences often enough that parsing the raw reply is not an option. The
//! rule here: the first string-aware balanced `{...}` span that parses as a
//! JSON object wins. A candidate that fails to parse moves the scan to the
//! next `{`, so stray braces in surrounding prose do not poison extraction.

/// Extract the first well-formed JSON object from free-form reply text.
///
/// Returns the exact slice of `text` holding the object, or `None` when no
/// balanced, parseable object exists.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let mut search_from = 0;
    while let Some(offset) = text[search_from..].find('{') {
        let start = search_from + offset;
        if let Some(len) = balanced_span(&text[start..]) {
            let candidate = &text[start..start + len];
            if serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(candidate)
                .is_ok()
            {
                return Some(candidate);
            }
        }
        search_from = start + 1;
    }
    None
}

/// Length in bytes of the balanced `{...}` span at the start of `s`, if any.
///
/// Braces inside string literals are skipped, including escaped quotes.
fn balanced_span(s: &str) -> Option<usize> {
    if !s.starts_with('{') {
        return None;
    }
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
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
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + c.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}
