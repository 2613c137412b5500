//! Post-date extraction.
//!
//! Machine-readable sources first, in descending precision; the anchor
//! `title` fallback hands back whatever relative-time label the page was
//! showing ("2 hrs"), which is still better than nothing.

use chrono::DateTime;

use crate::driver::Element;

/// Extract the post timestamp, or empty when no strategy matches.
///
/// ISO-8601 UTC (`...Z`) when derived from `data-utime` epoch seconds;
/// otherwise the `datetime` or `title` attribute value near-verbatim.
#[must_use]
pub fn extract_post_date<E: Element>(post: &E) -> String {
    let strategies: [fn(&E) -> Option<String>; 3] =
        [from_abbr_utime, from_time_datetime, from_anchor_title];
    strategies
        .iter()
        .find_map(|strategy| strategy(post))
        .unwrap_or_default()
}

/// `data-utime` Unix-epoch seconds on a descendant time abbreviation.
fn from_abbr_utime<E: Element>(post: &E) -> Option<String> {
    post.find("abbr")
        .into_iter()
        .filter_map(|abbr| abbr.attribute("data-utime"))
        .find_map(|utime| {
            let seconds: i64 = utime.trim().parse().ok()?;
            let timestamp = DateTime::from_timestamp(seconds, 0)?;
            Some(timestamp.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        })
}

/// Machine-readable `datetime` attribute on a descendant `time` element.
fn from_time_datetime<E: Element>(post: &E) -> Option<String> {
    post.find("time")
        .into_iter()
        .filter_map(|time| time.attribute("datetime"))
        .map(|datetime| datetime.trim().to_string())
        .find(|datetime| !datetime.is_empty())
}

/// Human-readable `title` on an anchor, verbatim.
fn from_anchor_title<E: Element>(post: &E) -> Option<String> {
    post.find("a")
        .into_iter()
        .filter_map(|anchor| anchor.attribute("title"))
        .find(|title| !title.is_empty())
}
