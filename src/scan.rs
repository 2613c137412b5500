//! Scan loop and dedup engine.
//!
//! One `Scanner` drives one run: it repeatedly asks the page driver for
//! the currently rendered posts, processes every index past the scan
//! cursor, and decides between waiting for lazy content and scrolling for
//! more. The seen set and the cursor are owned here — the loop is the
//! only writer, which keeps the whole thing testable against an
//! in-memory driver.
//!
//! Failure policy follows the taxonomy the extraction boundaries expose:
//! a transient UI error costs at most the sub-step it occurred in, a
//! failing post is skipped whole, a failing scroll is retried after a
//! pause, and only sink write failures abort the run.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use crate::driver::{Element, PageDriver};
use crate::error::Result;
use crate::extract::extract_emails;
use crate::metadata;
use crate::options::Options;
use crate::sink::EmailSink;

/// Loop phase. `Done` is implicit: the run loop exits instead of storing
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Process newly rendered posts past the cursor.
    Scan,
    /// Brief pause for lazy content, then re-query.
    Idle,
    /// Trigger more content by scrolling.
    Scroll,
}

/// Outcome of one completed (or cancelled) run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    /// Distinct addresses seen over the run.
    pub unique_emails: usize,
    /// Posts fully processed.
    pub posts_processed: usize,
    /// Scroll attempts spent when the run ended.
    pub scroll_attempts: u32,
    /// Whether the run ended on the cancel flag rather than exhaustion.
    pub cancelled: bool,
}

/// Drives the scan/scroll/dedup loop for one run.
///
/// The scanner owns the seen set (the sole deduplication authority — an
/// address seen once is never emitted again) and the scan cursor, which
/// only ever moves forward.
pub struct Scanner {
    options: Options,
    seen: HashSet<String>,
    cursor: usize,
}

impl Scanner {
    /// Create a scanner with the given options and an empty seen set.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            options,
            seen: HashSet::new(),
            cursor: 0,
        }
    }

    /// Number of distinct addresses seen so far.
    #[must_use]
    pub fn unique_emails(&self) -> usize {
        self.seen.len()
    }

    /// Index up to which posts have been fully processed.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Run the scan loop until the page stops producing or `cancel` is
    /// set.
    ///
    /// Cancellation is honored at the next safe point: between posts and
    /// between loop iterations, never mid-post. Everything recorded
    /// before cancellation stays recorded.
    ///
    /// # Errors
    ///
    /// Returns an error only when the sink rejects a write; every
    /// driver-side failure is recovered by skipping the affected
    /// sub-step, post, or iteration.
    pub fn run<D, S>(
        &mut self,
        driver: &D,
        sink: &mut S,
        cancel: &AtomicBool,
    ) -> Result<ScanSummary>
    where
        D: PageDriver,
        S: EmailSink,
    {
        let mut phase = Phase::Scan;
        let mut no_new_rounds: u32 = 0;
        let mut scroll_attempts: u32 = 0;
        let mut posts_processed: usize = 0;
        let mut cancelled = false;

        info!(selector = %self.options.post_selector, "scan starting");

        loop {
            if cancel.load(Ordering::Relaxed) {
                cancelled = true;
                break;
            }

            match phase {
                Phase::Scan => {
                    let posts = match driver.list_elements(&self.options.post_selector) {
                        Ok(posts) => posts,
                        Err(err) => {
                            warn!(error = %err, "listing posts failed, treating as empty");
                            Vec::new()
                        }
                    };
                    let rendered = posts.len();
                    if rendered <= self.cursor {
                        no_new_rounds += 1;
                    } else {
                        no_new_rounds = 0;
                    }
                    info!(
                        rendered,
                        cursor = self.cursor,
                        idle_rounds = no_new_rounds,
                        scroll_attempts,
                        "scan progress"
                    );

                    let mut new_found = false;
                    for index in self.cursor..rendered {
                        if cancel.load(Ordering::Relaxed) {
                            cancelled = true;
                            break;
                        }
                        if self.process_post(driver, sink, &posts[index], index)? > 0 {
                            new_found = true;
                        }
                        posts_processed += 1;
                        // Cursor counts completed posts, not rendered ones;
                        // a cancelled run resumes exactly here.
                        self.cursor = index + 1;
                    }
                    if cancelled {
                        break;
                    }
                    if new_found {
                        scroll_attempts = 0;
                    }
                    phase = if no_new_rounds >= self.options.idle_rounds_before_scroll {
                        Phase::Scroll
                    } else {
                        Phase::Idle
                    };
                }
                Phase::Idle => {
                    driver.wait_ms(self.options.idle_pause_ms);
                    phase = Phase::Scan;
                }
                Phase::Scroll => {
                    if let Err(err) = driver.scroll_by(0, self.options.scroll_step) {
                        warn!(error = %err, "scroll failed, pausing before retry");
                    }
                    driver.wait_ms(self.options.scroll_pause_ms);
                    scroll_attempts += 1;
                    if scroll_attempts >= self.options.max_scroll_attempts {
                        break;
                    }
                    phase = Phase::Scan;
                }
            }
        }

        info!(
            unique_emails = self.seen.len(),
            posts_processed, cancelled, "scan finished"
        );
        Ok(ScanSummary {
            unique_emails: self.seen.len(),
            posts_processed,
            scroll_attempts,
            cancelled,
        })
    }

    /// Process one post: expand its caption, extract and dedup emails,
    /// emit rows. Returns how many new addresses this post contributed.
    ///
    /// Driver failures inside the post degrade to partial data; only sink
    /// failures propagate.
    fn process_post<D, S>(
        &mut self,
        driver: &D,
        sink: &mut S,
        post: &D::Handle,
        index: usize,
    ) -> Result<usize>
    where
        D: PageDriver,
        S: EmailSink,
    {
        if let Err(err) = post.scroll_into_view() {
            debug!(index, error = %err, "scroll into view failed");
        }
        self.expand_caption(driver, post, index);

        let text = match post.text(self.options.text_timeout_ms) {
            Ok(text) => text,
            Err(err) => {
                debug!(index, error = %err, "text read failed, using empty text");
                String::new()
            }
        };

        let emails = extract_emails(&text);
        if emails.is_empty() {
            return Ok(0);
        }

        let record = metadata::extract_post_record(
            post,
            &self.options.site_origin,
            &self.options.site_domain,
        );

        let mut found = 0;
        for email in emails {
            if self.seen.contains(&email) {
                continue;
            }
            sink.record(&email, "post", &record.first_link)?;
            info!(email = %email, link = %record.first_link, "new email");
            self.seen.insert(email);
            found += 1;
        }
        Ok(found)
    }

    /// Click the caption-expansion control a bounded number of times.
    /// Any failure ends expansion silently — the post is still read with
    /// whatever text is visible.
    fn expand_caption<D>(&self, driver: &D, post: &D::Handle, index: usize)
    where
        D: PageDriver,
    {
        for _ in 0..self.options.expand_attempts {
            let toggles = post.find(&self.options.expand_selector);
            let Some(toggle) = toggles.first() else {
                break;
            };
            if let Err(err) = toggle.click() {
                debug!(index, error = %err, "caption expansion click failed");
                break;
            }
            driver.wait_ms(self.options.expand_settle_ms);
        }
    }
}
