//! Structural parses of raw model output, attempted in order of strictness.
//!
//! Each function is pure and returns `Some` only for a JSON *object* (the
//! draft shape is an object; arrays and scalars are never a usable hit).

use serde_json::Value;

/// Step 1: parse the whole text as JSON.
pub fn parse_direct(text: &str) -> Option<Value> {
    serde_json::from_str::<Value>(text.trim())
        .ok()
        .filter(Value::is_object)
}

/// Step 2: parse the contents of the first triple-backtick fence.
///
/// A language tag on the opening fence line (```json, ```JSON, ...) is
/// skipped; the fence may be surrounded by prose.
pub fn parse_fenced(text: &str) -> Option<Value> {
    let start = text.find("```")?;
    let after = &text[start + 3..];

    // Drop a same-line language tag, if any.
    let inner = match after.find('\n') {
        Some(newline) if after[..newline].trim().chars().all(char::is_alphanumeric) => {
            &after[newline + 1..]
        }
        _ => after,
    };

    let end = inner.find("```")?;
    serde_json::from_str::<Value>(inner[..end].trim())
        .ok()
        .filter(Value::is_object)
}

/// Step 3: parse the slice from the first `{` to the last `}`, inclusive.
pub fn parse_brace_slice(text: &str) -> Option<Value> {
    let open = text.find('{')?;
    let close = text.rfind('}')?;
    if close < open {
        return None;
    }
    serde_json::from_str::<Value>(text[open..=close].trim())
        .ok()
        .filter(Value::is_object)
}

/// The full structural chain: direct, then fenced, then brace slice.
pub fn parse_any(text: &str) -> Option<Value> {
    parse_direct(text)
        .or_else(|| parse_fenced(text))
        .or_else(|| parse_brace_slice(text))
}
