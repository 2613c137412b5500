//! In-memory page driver doubles for integration tests.
//!
//! `FakeElement` mimics one rendered node: canned text, attributes and
//! child lists keyed by selector. `FakePage` scripts a lazy-loading feed:
//! a fixed backlog of posts of which only a prefix is rendered, growing
//! by a configured amount per scroll.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use postharvest::{DriverError, Element, PageDriver};

#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    attrs: HashMap<String, String>,
    text: String,
    text_fails: bool,
    click_fails: bool,
    children: HashMap<String, Vec<FakeElement>>,
    clicks: Rc<Cell<u32>>,
}

impl FakeElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_children(mut self, selector: &str, children: Vec<FakeElement>) -> Self {
        self.children.insert(selector.to_string(), children);
        self
    }

    pub fn failing_text(mut self) -> Self {
        self.text_fails = true;
        self
    }

    pub fn failing_click(mut self) -> Self {
        self.click_fails = true;
        self
    }

    /// Shorthand for an `<a href=...>` element.
    pub fn anchor(href: &str) -> Self {
        Self::new().with_attr("href", href)
    }

    /// Times this element (or any clone of it) was clicked.
    pub fn clicks(&self) -> u32 {
        self.clicks.get()
    }
}

impl Element for FakeElement {
    fn text(&self, timeout_ms: u64) -> Result<String, DriverError> {
        if self.text_fails {
            Err(DriverError::Timeout(Duration::from_millis(timeout_ms)))
        } else {
            Ok(self.text.clone())
        }
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attrs.get(name).cloned()
    }

    fn find(&self, selector: &str) -> Vec<FakeElement> {
        self.children.get(selector).cloned().unwrap_or_default()
    }

    fn scroll_into_view(&self) -> Result<(), DriverError> {
        Ok(())
    }

    fn click(&self) -> Result<(), DriverError> {
        if self.click_fails {
            return Err(DriverError::Interaction("click rejected".to_string()));
        }
        self.clicks.set(self.clicks.get() + 1);
        Ok(())
    }
}

pub struct FakePage {
    posts: Vec<FakeElement>,
    rendered: Cell<usize>,
    reveal_per_scroll: usize,
    pub scrolls: Cell<u32>,
}

impl FakePage {
    /// A feed with `initially_rendered` posts visible and the rest
    /// revealed `reveal_per_scroll` at a time.
    pub fn new(posts: Vec<FakeElement>, initially_rendered: usize, reveal_per_scroll: usize) -> Self {
        let rendered = initially_rendered.min(posts.len());
        Self {
            posts,
            rendered: Cell::new(rendered),
            reveal_per_scroll,
            scrolls: Cell::new(0),
        }
    }

    /// A feed with everything rendered up front; scrolling reveals
    /// nothing further.
    pub fn fully_rendered(posts: Vec<FakeElement>) -> Self {
        let rendered = posts.len();
        Self::new(posts, rendered, 0)
    }

    pub fn rendered(&self) -> usize {
        self.rendered.get()
    }
}

impl PageDriver for FakePage {
    type Handle = FakeElement;

    fn list_elements(&self, _selector: &str) -> Result<Vec<FakeElement>, DriverError> {
        Ok(self.posts[..self.rendered.get()].to_vec())
    }

    fn scroll_by(&self, _dx: i64, _dy: i64) -> Result<(), DriverError> {
        self.scrolls.set(self.scrolls.get() + 1);
        let next = (self.rendered.get() + self.reveal_per_scroll).min(self.posts.len());
        self.rendered.set(next);
        Ok(())
    }

    fn wait_ms(&self, _ms: u64) {}
}

/// A post with visible text and a single on-site permalink anchor.
pub fn post_with_text(text: &str, permalink: &str) -> FakeElement {
    FakeElement::new()
        .with_text(text)
        .with_children("a", vec![FakeElement::anchor(permalink)])
}
