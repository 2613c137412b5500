//! Configuration options for a scan run.
//!
//! The `Options` struct controls selectors, site identity, and the loop
//! thresholds. All fields are public for easy configuration; use
//! `Default::default()` for the standard group-feed settings.

/// Configuration options for a scan run.
///
/// # Example
///
/// ```rust
/// use postharvest::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     max_scroll_attempts: 10,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Selector matching rendered post elements, passed verbatim to the
    /// page driver.
    ///
    /// Default: `div[data-ad-preview='message'], article`
    pub post_selector: String,

    /// Selector matching the "see more" caption-expansion control inside
    /// a post, passed verbatim to the page driver.
    ///
    /// Default: `text=/see more/i`
    pub expand_selector: String,

    /// Canonical site origin used to absolutize relative hrefs.
    ///
    /// Default: `https://web.facebook.com`
    pub site_origin: String,

    /// Domain a link must contain to count as on-site.
    ///
    /// Default: `facebook.com`
    pub site_domain: String,

    /// Consecutive no-growth scan rounds before the loop scrolls.
    ///
    /// Default: `5`
    pub idle_rounds_before_scroll: u32,

    /// Scroll attempts without productive growth before the run ends.
    /// Finding a new email resets the count — the page is still paying
    /// out.
    ///
    /// Default: `60`
    pub max_scroll_attempts: u32,

    /// Maximum caption-expansion clicks per post.
    ///
    /// Default: `4`
    pub expand_attempts: u32,

    /// Timeout for reading a post's visible text, in milliseconds.
    ///
    /// Default: `2500`
    pub text_timeout_ms: u64,

    /// Settle pause after each expansion click, in milliseconds.
    ///
    /// Default: `400`
    pub expand_settle_ms: u64,

    /// Vertical scroll distance per attempt, in pixels.
    ///
    /// Default: `3000`
    pub scroll_step: i64,

    /// Pause after a scroll to let lazy content load, in milliseconds.
    ///
    /// Default: `1000`
    pub scroll_pause_ms: u64,

    /// Pause between uneventful scan rounds, in milliseconds.
    ///
    /// Default: `600`
    pub idle_pause_ms: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            post_selector: "div[data-ad-preview='message'], article".to_string(),
            expand_selector: "text=/see more/i".to_string(),
            site_origin: "https://web.facebook.com".to_string(),
            site_domain: "facebook.com".to_string(),
            idle_rounds_before_scroll: 5,
            max_scroll_attempts: 60,
            expand_attempts: 4,
            text_timeout_ms: 2500,
            expand_settle_ms: 400,
            scroll_step: 3000,
            scroll_pause_ms: 1000,
            idle_pause_ms: 600,
        }
    }
}
