//! Post-identifier extraction.
//!
//! Five strategies, ordered most-reliable first: the `data-ft` JSON blob,
//! then the three permalink forms, then the element id of last resort.

use serde_json::Value;

use crate::driver::Element;
use crate::patterns::{ELEMENT_POST_ID, POSTS_PATH_ID, TOP_LEVEL_POST_ID};
use crate::url_utils;

/// Extract the post identifier, or empty when no strategy matches.
#[must_use]
pub fn extract_post_id<E: Element>(post: &E) -> String {
    let strategies: [fn(&E) -> Option<String>; 5] = [
        from_data_ft,
        from_story_fbid,
        from_posts_path,
        from_fbid,
        from_element_id,
    ];
    strategies
        .iter()
        .find_map(|strategy| strategy(post))
        .unwrap_or_default()
}

/// `data-ft` attribute blob carrying a `top_level_post_id` field.
///
/// Parsed as JSON first; blobs that are JSON-like but not quite valid
/// fall back to a direct pattern match.
fn from_data_ft<E: Element>(post: &E) -> Option<String> {
    let blob = post.attribute("data-ft")?;
    if let Ok(value) = serde_json::from_str::<Value>(&blob) {
        match value.get("top_level_post_id") {
            Some(Value::String(id)) if !id.is_empty() => return Some(id.clone()),
            Some(Value::Number(id)) => return Some(id.to_string()),
            _ => {}
        }
    }
    TOP_LEVEL_POST_ID
        .captures(&blob)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
}

/// `story_fbid` query parameter on a permalink anchor.
fn from_story_fbid<E: Element>(post: &E) -> Option<String> {
    anchor_hrefs(post).find_map(|href| url_utils::query_param(&href, "story_fbid"))
}

/// Numeric path segment after `/posts/` in a permalink anchor.
fn from_posts_path<E: Element>(post: &E) -> Option<String> {
    anchor_hrefs(post).find_map(|href| {
        POSTS_PATH_ID
            .captures(&href)
            .and_then(|caps| caps.get(1))
            .map(|id| id.as_str().to_string())
    })
}

/// `fbid` query parameter on a permalink anchor.
fn from_fbid<E: Element>(post: &E) -> Option<String> {
    anchor_hrefs(post).find_map(|href| url_utils::query_param(&href, "fbid"))
}

/// Element identifier shaped `post_<digits>...`.
fn from_element_id<E: Element>(post: &E) -> Option<String> {
    let id_attr = post.attribute("id")?;
    ELEMENT_POST_ID
        .captures(&id_attr)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
}

fn anchor_hrefs<E: Element>(post: &E) -> impl Iterator<Item = String> {
    post.find("a")
        .into_iter()
        .filter_map(|anchor| anchor.attribute("href"))
}
