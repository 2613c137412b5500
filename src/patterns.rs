//! Compiled regex patterns for email harvesting and post metadata.
//!
//! All patterns are compiled once at startup using `LazyLock`. The three
//! candidate patterns are deliberately liberal — they over-match, and the
//! strict grammar filters the survivors. Keeping finder and validator
//! separate is what makes obfuscated forms recoverable at all.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

// =============================================================================
// Candidate Finder Patterns
// =============================================================================

/// Liberal finder for plainly written addresses.
///
/// The local part accepts the full extended alphabet (RFC 5321 atext plus
/// dot) or a quoted string; the domain side accepts any run of word
/// characters, dots and hyphens. Many hits are junk — cleaning and the
/// strict grammar sort that out later.
pub static DIRECT_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r#"(?i)(?:"[^"]+"|[A-Za-z0-9!#$%&'*+/=?^_`{|}~.-]{1,64})@[\w.-]{3,255}"#)
        .size_limit(64 * 1024 * 1024)
        .build()
        .expect("DIRECT_CANDIDATE regex")
});

/// Symbol-obfuscated addresses: `user [at] domain [dot] com`,
/// `user(at)domain(dot)com`, `user at domain dot com` and mixes thereof.
///
/// The `dom` capture keeps its separator tokens; reassembly replaces each
/// with a literal dot and strips interior whitespace.
pub static SYMBOLIC_OBFUSCATED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)(?P<local>["\w.+%&'*+/=-]{1,64})\s*(?:@|\[at\]|\(at\)|\s+at\s+|\sat\s)\s*(?P<dom>[\w.-]+(?:\s*(?:\.|\[dot\]|\(dot\)|\s+dot\s+|\sdot\s+)\s*[\w.-]+)+)"#,
    )
    .expect("SYMBOLIC_OBFUSCATED regex")
});

/// Spelled-out addresses: `name at domain dot com`.
///
/// Capped at four chained `dot` segments so ordinary prose containing the
/// word "at" does not swallow half a sentence.
pub static WORD_OBFUSCATED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b([A-Za-z0-9.+%&'*+/=-]{1,64})\s+at\s+([A-Za-z0-9-]{1,63}(?:\s+dot\s+[A-Za-z0-9-]{1,63}){1,4})\b",
    )
    .expect("WORD_OBFUSCATED regex")
});

// =============================================================================
// Reassembly & Cleanup Patterns
// =============================================================================

/// A `dot` separator token inside an obfuscated domain, with surrounding
/// whitespace. Replaced by a literal dot during reassembly.
pub static DOT_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*(?:\[dot\]|\(dot\)|\s+dot\s+|\sdot\s+)\s*").expect("DOT_SEPARATOR regex")
});

/// The `dot` separator form used by the word-obfuscation pattern.
pub static WORD_DOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+dot\s+").expect("WORD_DOT regex"));

/// Residual `dot` tokens left inside a candidate after matching.
pub static RESIDUAL_DOT_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[dot\]|\(dot\)|\s+dot\s+|\sdot\s+").expect("RESIDUAL_DOT_TOKEN regex")
});

/// Residual `at` tokens left inside a candidate after matching.
pub static RESIDUAL_AT_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[at\]|\(at\)|\s+at\s+|\sat\s").expect("RESIDUAL_AT_TOKEN regex")
});

/// Runs of two or more dots, collapsed to one during cleaning.
pub static MULTI_DOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.{2,}").expect("MULTI_DOT regex"));

// =============================================================================
// Strict Address Grammar
// =============================================================================

/// The validation grammar every candidate must pass after cleaning.
///
/// Local part: quoted string or 1-64 extended-alphabet characters.
/// Domain: dot-joined labels of 1-63 alphanumerics with interior hyphens
/// only, ending in a 2-63 letter alphabetic label. Practical rather than
/// fully RFC-exact — plus-addressing and quoted locals pass, double dots
/// and bare TLDs do not.
pub static STRICT_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)^(?:"[^"]+"|[A-Za-z0-9!#$%&'*+/=?^_`{|}~.-]{1,64})@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$"#,
    )
    .expect("STRICT_ADDRESS regex")
});

// =============================================================================
// Post Metadata Patterns
// =============================================================================

/// `top_level_post_id` field inside a `data-ft` attribute blob. Recovery
/// path for blobs that are JSON-like but fail strict parsing.
pub static TOP_LEVEL_POST_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""top_level_post_id"\s*:\s*"?(\d+)"?"#).expect("TOP_LEVEL_POST_ID regex")
});

/// Numeric path segment following `/posts/` in a permalink.
pub static POSTS_PATH_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/posts/(\d+)").expect("POSTS_PATH_ID regex"));

/// Numeric id embedded in an element identifier shaped `post_<digits>...`.
pub static ELEMENT_POST_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^post_(\d+)").expect("ELEMENT_POST_ID regex"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_candidate_matches_plain_addresses() {
        assert!(DIRECT_CANDIDATE.is_match("alice@example.com"));
        assert!(DIRECT_CANDIDATE.is_match("user+tag@sub.domain.co.uk"));
        assert!(!DIRECT_CANDIDATE.is_match("no address here"));
    }

    #[test]
    fn symbolic_pattern_matches_bracketed_forms() {
        assert!(SYMBOLIC_OBFUSCATED.is_match("bob [at] example [dot] com"));
        assert!(SYMBOLIC_OBFUSCATED.is_match("bob(at)example(dot)com"));
        assert!(SYMBOLIC_OBFUSCATED.is_match("bob [at] example dot com"));
    }

    #[test]
    fn word_pattern_requires_spelled_out_separators() {
        assert!(WORD_OBFUSCATED.is_match("carol at foo dot org"));
        assert!(!WORD_OBFUSCATED.is_match("we met at noon"));
    }

    #[test]
    fn strict_grammar_rejects_malformed_domains() {
        assert!(STRICT_ADDRESS.is_match("alice@example.com"));
        assert!(STRICT_ADDRESS.is_match("a@x.co"));
        assert!(!STRICT_ADDRESS.is_match("user@@example.com"));
        assert!(!STRICT_ADDRESS.is_match("user@example..com"));
        assert!(!STRICT_ADDRESS.is_match("user@example"));
        assert!(!STRICT_ADDRESS.is_match("user@-bad-.com"));
    }

    #[test]
    fn post_id_patterns_capture_digits() {
        let caps = TOP_LEVEL_POST_ID
            .captures(r#"{"top_level_post_id":"1234567890","x":1}"#)
            .expect("expected a match");
        assert_eq!(&caps[1], "1234567890");

        let caps = POSTS_PATH_ID
            .captures("https://web.facebook.com/user/posts/555666777")
            .expect("expected a match");
        assert_eq!(&caps[1], "555666777");

        let caps = ELEMENT_POST_ID.captures("post_1234567_data").expect("expected a match");
        assert_eq!(&caps[1], "1234567");
    }
}
