//! Email extraction pipeline.
//!
//! Extraction runs in three stages: normalize the raw text, harvest
//! candidates with three complementary finder passes, then clean and
//! validate each candidate against the strict address grammar. The passes
//! are unioned — the same address surfacing from several passes collapses
//! to one candidate — and everything that fails validation is dropped
//! without comment. Filtering junk is the normal case here, not an error.

use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::patterns::{
    DIRECT_CANDIDATE, DOT_SEPARATOR, MULTI_DOT, RESIDUAL_AT_TOKEN, RESIDUAL_DOT_TOKEN,
    STRICT_ADDRESS, SYMBOLIC_OBFUSCATED, WORD_DOT, WORD_OBFUSCATED,
};
use crate::text::normalize_text;

/// Candidates longer than this are dropped before cleaning. An address
/// cannot exceed 320 octets, so anything larger is a runaway match.
const MAX_CANDIDATE_LEN: usize = 320;

/// Punctuation stripped from both ends of a candidate.
const SURROUNDING_PUNCTUATION: &[char] = &[
    ' ', '\t', '\n', '\r', '\u{C}', '\u{B}', '<', '>', '"', '\'', '(', ')', '[', ']', '{', '}',
    ';', ',', ':',
];

/// Extract every validated email address from a blob of text.
///
/// Handles plainly written addresses, quoted local parts, and the common
/// obfuscations (`[at]`/`(at)`/`[dot]`/`(dot)` and spelled-out `at`/`dot`).
/// The result is deduplicated, lower-cased, and lexicographically sorted;
/// sorting buys deterministic output, nothing more.
///
/// # Example
///
/// ```rust
/// use postharvest::extract_emails;
///
/// let found = extract_emails("write bob [at] example [dot] com today");
/// assert_eq!(found, vec!["bob@example.com".to_string()]);
/// ```
#[must_use]
pub fn extract_emails(text: &str) -> Vec<String> {
    let normalized = normalize_text(text);
    if normalized.is_empty() {
        return Vec::new();
    }

    let mut candidates: HashSet<String> = HashSet::new();
    collect_direct(&normalized, &mut candidates);
    collect_symbolic(&normalized, &mut candidates);
    collect_worded(&normalized, &mut candidates);

    let mut verified: BTreeSet<String> = BTreeSet::new();
    for candidate in &candidates {
        if let Some(address) = clean_and_validate(candidate) {
            verified.insert(address);
        }
    }

    verified.into_iter().collect()
}

/// Direct pass: liberal `local@domain` hits, stripped of surrounding
/// punctuation.
fn collect_direct(text: &str, candidates: &mut HashSet<String>) {
    for hit in DIRECT_CANDIDATE.find_iter(text) {
        let candidate = hit.as_str().trim_matches(SURROUNDING_PUNCTUATION);
        if !candidate.is_empty() {
            candidates.insert(candidate.to_string());
        }
    }
}

/// Symbolic pass: reassemble `local <at-token> domain <dot-token> ...`
/// into a plain address shape.
fn collect_symbolic(text: &str, candidates: &mut HashSet<String>) {
    for caps in SYMBOLIC_OBFUSCATED.captures_iter(text) {
        let (Some(local), Some(dom_raw)) = (caps.name("local"), caps.name("dom")) else {
            continue;
        };
        let local = local.as_str().trim_matches('"');
        let dom = DOT_SEPARATOR.replace_all(dom_raw.as_str(), ".");
        let dom: String = dom.split_whitespace().collect();
        candidates.insert(format!("{local}@{dom}"));
    }
}

/// Word pass: narrow `name at domain dot tld` form.
fn collect_worded(text: &str, candidates: &mut HashSet<String>) {
    for caps in WORD_OBFUSCATED.captures_iter(text) {
        let (Some(local), Some(dom_raw)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let dom = WORD_DOT.replace_all(dom_raw.as_str(), ".");
        candidates.insert(format!("{}@{dom}", local.as_str()));
    }
}

/// Clean one candidate and validate it against the strict grammar.
///
/// Returns the lower-cased address, or `None` when the candidate is
/// oversized or fails validation.
fn clean_and_validate(candidate: &str) -> Option<String> {
    if candidate.is_empty() || candidate.chars().count() > MAX_CANDIDATE_LEN {
        return None;
    }

    let stripped = candidate.trim_matches(SURROUNDING_PUNCTUATION);
    let replaced = RESIDUAL_DOT_TOKEN.replace_all(stripped, ".");
    let replaced = RESIDUAL_AT_TOKEN.replace_all(&replaced, "@");
    let trimmed = replaced.trim_end_matches(['.', ',', ';', ':']);
    let collapsed = MULTI_DOT.replace_all(trimmed, ".");
    let address = collapsed.trim().to_lowercase();

    if STRICT_ADDRESS.is_match(&address) {
        Some(address)
    } else {
        debug!(candidate, "candidate failed validation");
        None
    }
}
