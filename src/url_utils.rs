//! URL utilities for post-metadata extraction.
//!
//! Feed markup mixes absolute permalinks, site-relative hrefs and
//! query-only endpoint attributes. These helpers normalize all of them
//! enough to ask the two questions the extractors care about: what is the
//! path shaped like, and what does a given query parameter hold.

use url::Url;

/// Base used to parse relative hrefs when only path/query structure
/// matters and the real origin is irrelevant to the result.
const PARSE_BASE: &str = "https://relative.invalid";

/// Convert a site-relative href to absolute form by prefixing `origin`.
///
/// Absolute hrefs are returned unchanged; anything that is neither
/// absolute nor rooted at `/` is returned as-is.
#[must_use]
pub fn absolutize(href: &str, origin: &str) -> String {
    let href = href.trim();
    if href.starts_with('/') {
        format!("{}{}", origin.trim_end_matches('/'), href)
    } else {
        href.to_string()
    }
}

/// Drop the query string (and fragment) from an href.
#[must_use]
pub fn strip_query(href: &str) -> &str {
    href.split(['?', '#']).next().unwrap_or(href)
}

/// Parse an href that may be absolute or site-relative.
///
/// Relative hrefs are resolved against a placeholder base, so the
/// returned URL is only good for inspecting path and query — never for
/// producing output links.
#[must_use]
pub fn parse_loose(href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    match Url::parse(href) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(PARSE_BASE).ok()?.join(href).ok()
        }
        Err(_) => None,
    }
}

/// Value of the named query parameter in an href, if present.
#[must_use]
pub fn query_param(href: &str, name: &str) -> Option<String> {
    let url = parse_loose(href)?;
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// The single path segment of an href with no query string, if that is
/// all the href consists of.
///
/// This is the shape of a vanity profile link (`/jane.doe`). Links with a
/// query string, multiple path segments, or an empty path yield `None`.
#[must_use]
pub fn single_path_slug(href: &str) -> Option<String> {
    let url = parse_loose(href)?;
    if url.query().is_some() {
        return None;
    }
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
    let slug = segments.next()?;
    if segments.next().is_some() {
        return None;
    }
    Some(slug.to_string())
}
