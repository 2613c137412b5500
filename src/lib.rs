//! # postharvest
//!
//! Obfuscation-tolerant contact-email harvesting from social feed pages.
//!
//! The crate scans a continuously growing feed of post elements through an
//! abstract [`PageDriver`], extracts email addresses — including the usual
//! `[at]`/`[dot]` and spelled-out disguises — together with lightweight
//! per-post metadata, deduplicates across the run, and writes one CSV row
//! per newly-seen address to rotating output files.
//!
//! ## Quick Start
//!
//! ```rust
//! use postharvest::extract_emails;
//!
//! let found = extract_emails("Reach us: info [at] example [dot] com or sales@example.com");
//! assert_eq!(found, vec!["info@example.com".to_string(), "sales@example.com".to_string()]);
//! ```
//!
//! Driving a live page looks like:
//!
//! ```rust,ignore
//! use std::sync::atomic::AtomicBool;
//! use postharvest::{Options, RotatingCsvSink, Scanner};
//!
//! let driver = my_backend::attach("https://web.facebook.com/groups/.../search?q=%40gmail.com")?;
//! let mut sink = RotatingCsvSink::with_default_ceiling("emails_basic")?;
//! let cancel = AtomicBool::new(false);
//!
//! let summary = Scanner::new(Options::default()).run(&driver, &mut sink, &cancel)?;
//! let (files, rows) = sink.finish()?;
//! println!("{} unique emails across {files} file(s)", summary.unique_emails);
//! ```
//!
//! ## Features
//!
//! - **Obfuscation-tolerant extraction**: three complementary candidate
//!   passes unioned and filtered through a strict address grammar
//! - **Metadata fallback chains**: post id, author and timestamp pulled
//!   from heterogeneous markup shapes, most-reliable source first
//! - **Incremental scanning**: a scan cursor that never revisits a post,
//!   with scroll/idle heuristics tuned for lazy-loading feeds
//! - **Rotating CSV output**: per-file row ceiling, files never reopened
//!
//! Browser mechanics stay outside the crate: implement [`PageDriver`] and
//! [`Element`] over whatever automation backend is at hand. The loop is
//! strictly sequential — one post, one extraction, one write at a time.

mod error;
mod extract;
mod options;
mod patterns;
mod scan;
mod sink;
mod text;

/// Page driver contract implemented by automation backends.
pub mod driver;

/// Post metadata extraction (id, author, date fallback chains).
pub mod metadata;

/// URL utilities for href normalization and query inspection.
pub mod url_utils;

// Public API - re-exports
pub use driver::{DriverError, Element, PageDriver};
pub use error::{Error, Result};
pub use extract::extract_emails;
pub use metadata::{
    extract_author_id, extract_author_profile_href, extract_author_username, extract_post_date,
    extract_post_id, extract_post_record, first_post_link, PostRecord,
};
pub use options::Options;
pub use scan::{ScanSummary, Scanner};
pub use sink::{EmailSink, RotatingCsvSink, VecSink};
pub use text::normalize_text;
