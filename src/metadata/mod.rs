//! Post metadata extraction.
//!
//! Feed markup is not one shape: the same logical field (post id, author,
//! timestamp) shows up under different attributes and link forms depending
//! on page variant and rendering age. Each extractor here is therefore an
//! ordered chain of independent strategies — pure functions over one post
//! element — run until the first one produces a value. New markup variants
//! get a new strategy appended; existing ones are never touched.
//!
//! Absence is a normal outcome: every extractor returns an empty string
//! when nothing matches, never an error.

pub mod author;
pub mod date;
pub mod post_id;

use tracing::debug;

use crate::driver::Element;
use crate::url_utils;

pub use author::{extract_author_id, extract_author_profile_href, extract_author_username};
pub use date::extract_post_date;
pub use post_id::extract_post_id;

/// Best-effort metadata for one rendered post.
///
/// Every field is independently optional; empty means the markup did not
/// carry it. Records are recomputed on every visit and never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostRecord {
    /// Stable post identifier, when the markup exposes one.
    pub post_id: String,
    /// Author vanity username (profile slug).
    pub author_username: String,
    /// Author numeric id.
    pub author_id: String,
    /// Absolute link to the author profile.
    pub author_profile_href: String,
    /// Post timestamp: ISO-8601 UTC when machine-readable, otherwise the
    /// page's human-readable label verbatim.
    pub post_date: String,
    /// First on-site link found in the post, query-stripped and absolute.
    pub first_link: String,
}

/// Run every extractor against one post element.
///
/// `origin` is the canonical site origin used to absolutize relative
/// hrefs; `domain` is the site domain a link must contain to count as
/// on-site.
pub fn extract_post_record<E: Element>(post: &E, origin: &str, domain: &str) -> PostRecord {
    let record = PostRecord {
        post_id: post_id::extract_post_id(post),
        author_username: author::extract_author_username(post),
        author_id: author::extract_author_id(post),
        author_profile_href: author::extract_author_profile_href(post, origin),
        post_date: date::extract_post_date(post),
        first_link: first_post_link(post, origin, domain),
    };
    debug!(
        post_id = %record.post_id,
        author = %record.author_username,
        date = %record.post_date,
        "extracted post record"
    );
    record
}

/// First anchor in the post whose href, query-stripped and absolutized,
/// points back into the site. Empty when the post carries no such link.
#[must_use]
pub fn first_post_link<E: Element>(post: &E, origin: &str, domain: &str) -> String {
    for anchor in post.find("a") {
        let Some(href) = anchor.attribute("href") else {
            continue;
        };
        let absolute = url_utils::absolutize(url_utils::strip_query(&href), origin);
        if absolute.contains(domain) {
            return absolute;
        }
    }
    String::new()
}
