//! Raw-text normalization applied before any pattern matching.
//!
//! Feed captions arrive with the usual copy-paste debris: HTML entities,
//! zero-width spaces used to break up addresses, and non-breaking spaces.
//! All of it is removed up front so the candidate patterns only ever see
//! plain text.

/// Normalize raw extracted text for pattern matching.
///
/// Steps, in order: decode HTML entities, delete zero-width spaces
/// (U+200B), replace non-breaking spaces (U+00A0) with ordinary spaces.
/// Empty input yields empty output. The function is idempotent.
#[must_use]
pub fn normalize_text(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let decoded = html_escape::decode_html_entities(raw);
    decoded
        .chars()
        .filter(|&c| c != '\u{200B}')
        .map(|c| if c == '\u{A0}' { ' ' } else { c })
        .collect()
}
