//! Author metadata extraction: username, numeric id, profile link.

use url::Url;

use crate::driver::Element;
use crate::url_utils;

/// Path slugs that look like profile links but are not.
const NON_PROFILE_SLUGS: &[&str] = &["groups", "watch", "profile.php"];

/// Extract the author's vanity username.
///
/// First anchor whose href is a plain profile slug — exactly one path
/// segment, no query string, and not a `groups`/`watch`/`profile.php`
/// path. Empty when no anchor qualifies.
#[must_use]
pub fn extract_author_username<E: Element>(post: &E) -> String {
    for href in anchor_hrefs(post) {
        if let Some(slug) = url_utils::single_path_slug(&href) {
            if !NON_PROFILE_SLUGS.contains(&slug.as_str()) {
                return slug;
            }
        }
    }
    String::new()
}

/// Extract the author's numeric id.
///
/// Chain: the `id` query parameter on a `profile.php` anchor, then the
/// `id` parameter embedded in an anchor's hovercard endpoint attribute.
#[must_use]
pub fn extract_author_id<E: Element>(post: &E) -> String {
    let strategies: [fn(&E) -> Option<String>; 2] = [from_profile_php, from_hovercard];
    strategies
        .iter()
        .find_map(|strategy| strategy(post))
        .unwrap_or_default()
}

fn from_profile_php<E: Element>(post: &E) -> Option<String> {
    anchor_hrefs(post)
        .filter(|href| href.contains("profile.php"))
        .find_map(|href| url_utils::query_param(&href, "id"))
}

fn from_hovercard<E: Element>(post: &E) -> Option<String> {
    post.find("a")
        .into_iter()
        .filter_map(|anchor| anchor.attribute("data-hovercard"))
        .find_map(|endpoint| url_utils::query_param(&endpoint, "id"))
}

/// Extract an absolute link to the author's profile.
///
/// First anchor whose href, absolutized against `origin`, is a plain
/// profile link: a single-slug path with no query, or `profile.php` with
/// an `id` parameter. `/watch/` and `/groups/` links never qualify.
#[must_use]
pub fn extract_author_profile_href<E: Element>(post: &E, origin: &str) -> String {
    for href in anchor_hrefs(post) {
        let absolute = url_utils::absolutize(&href, origin);
        if is_profile_href(&absolute) {
            return absolute;
        }
    }
    String::new()
}

fn is_profile_href(absolute: &str) -> bool {
    let Ok(url) = Url::parse(absolute) else {
        return false;
    };
    let segments: Vec<&str> = url
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();
    match segments.as_slice() {
        ["profile.php"] => url.query_pairs().any(|(key, _)| key == "id"),
        [slug] => url.query().is_none() && !NON_PROFILE_SLUGS.contains(slug),
        _ => false,
    }
}

fn anchor_hrefs<E: Element>(post: &E) -> impl Iterator<Item = String> {
    post.find("a")
        .into_iter()
        .filter_map(|anchor| anchor.attribute("href"))
}
