// Output formatting: terminal display and JSON rendering.

pub mod json;
pub mod terminal;

/// Shorten a model reply for a one-line preview, marking the cut with "...".
///
/// Counts characters, not bytes, so replies containing emoji or accented
/// text are cut on a character boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
