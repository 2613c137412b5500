//! Page driver contract.
//!
//! The scan loop never talks to a browser directly. It drives an abstract
//! page through the two traits below; the binding to a real automation
//! backend (CDP, WebDriver, an in-memory double for tests) lives outside
//! this crate. The surface is deliberately minimal: listing elements,
//! reading text and attributes, child queries, scrolling, clicking, and
//! waiting — exactly what the scan loop consumes, nothing more.

use std::time::Duration;

/// Error type for page-driver operations.
///
/// `Timeout`, `NotFound` and `Interaction` are the transient UI failures
/// the scan loop recovers from locally; `Backend` signals the driver
/// itself is gone and the run should abort.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// Reading element text exceeded the allowed time.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// No element matched the given selector.
    #[error("no element matched selector: {0}")]
    NotFound(String),

    /// A click or scroll interaction was rejected by the page.
    #[error("interaction failed: {0}")]
    Interaction(String),

    /// The driver backend failed (connection lost, page closed).
    #[error("driver backend failure: {0}")]
    Backend(String),
}

/// One rendered element on the page.
///
/// Handles are point-in-time: the page keeps rendering underneath them, so
/// every accessor is fallible or best-effort and the scan loop re-queries
/// rather than caching handles across iterations.
pub trait Element: Sized {
    /// Visible text content of the element.
    ///
    /// Fails with [`DriverError::Timeout`] when the read exceeds
    /// `timeout_ms`.
    fn text(&self, timeout_ms: u64) -> Result<String, DriverError>;

    /// Value of the named attribute, or `None` when absent.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Descendant elements matching `selector`, in document order.
    ///
    /// An element that matches nothing returns an empty vector, never an
    /// error.
    fn find(&self, selector: &str) -> Vec<Self>;

    /// Scroll the element into the viewport.
    fn scroll_into_view(&self) -> Result<(), DriverError>;

    /// Click the element.
    fn click(&self) -> Result<(), DriverError>;
}

/// The page under scan.
pub trait PageDriver {
    /// Element handle type produced by this driver.
    type Handle: Element;

    /// All elements currently rendered for `selector`, in document order.
    fn list_elements(&self, selector: &str) -> Result<Vec<Self::Handle>, DriverError>;

    /// Scroll the page by the given pixel offsets.
    fn scroll_by(&self, dx: i64, dy: i64) -> Result<(), DriverError>;

    /// Block for `ms` milliseconds to let lazy content settle.
    fn wait_ms(&self, ms: u64);
}
