//! Title cleanup for model-produced headings.

use crate::draft::UNTITLED_TITLE;

/// Sanitize a raw title: trim, drop a leading code-fence line, strip
/// markdown heading markers, unwrap quotes/backticks, drop a bare "json"
/// label. Empty results become [`UNTITLED_TITLE`].
pub fn sanitize_title(raw: &str) -> String {
    let mut title = raw.trim();

    // A fence marker as the first line means the model echoed markup.
    if title.starts_with("```") {
        title = match title.find('\n') {
            Some(newline) => title[newline + 1..].trim(),
            None => "",
        };
    }

    title = title.trim_start_matches('#').trim();

    // Unwrap symmetric quote/backtick pairs, possibly nested ("`\"T\"`").
    loop {
        let stripped = strip_wrapping(title, '"')
            .or_else(|| strip_wrapping(title, '\''))
            .or_else(|| strip_wrapping(title, '`'));
        match stripped {
            Some(inner) => title = inner.trim(),
            None => break,
        }
    }

    if title.eq_ignore_ascii_case("json") {
        title = "";
    }

    if title.is_empty() {
        UNTITLED_TITLE.to_string()
    } else {
        title.to_string()
    }
}

fn strip_wrapping(text: &str, quote: char) -> Option<&str> {
    if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
        Some(&text[quote.len_utf8()..text.len() - quote.len_utf8()])
    } else {
        None
    }
}
