mod common;

use std::sync::atomic::{AtomicBool, Ordering};

use common::{post_with_text, FakeElement, FakePage};
use postharvest::{Options, Scanner, VecSink};

fn fast_options() -> Options {
    Options {
        idle_rounds_before_scroll: 1,
        max_scroll_attempts: 3,
        ..Options::default()
    }
}

#[test]
fn processes_every_rendered_post_and_dedups_across_posts() {
    let posts = vec![
        post_with_text("ping alice@example.com", "/groups/g/posts/1"),
        post_with_text("also alice@example.com here", "/groups/g/posts/2"),
        post_with_text("and bob [at] example [dot] com", "/groups/g/posts/3"),
    ];
    let page = FakePage::fully_rendered(posts);
    let mut sink = VecSink::new();
    let cancel = AtomicBool::new(false);

    let mut scanner = Scanner::new(fast_options());
    let summary = scanner.run(&page, &mut sink, &cancel).expect("expected Ok(_)");

    assert_eq!(summary.posts_processed, 3);
    assert_eq!(summary.unique_emails, 2);
    assert!(!summary.cancelled);
    assert_eq!(sink.rows.len(), 2);
    assert_eq!(sink.rows[0].0, "alice@example.com");
    assert_eq!(sink.rows[0].1, "post");
    assert_eq!(sink.rows[0].2, "https://web.facebook.com/groups/g/posts/1");
    assert_eq!(sink.rows[1].0, "bob@example.com");
    assert_eq!(sink.rows[1].2, "https://web.facebook.com/groups/g/posts/3");
}

#[test]
fn scrolling_reveals_more_posts_and_cursor_never_revisits() {
    let posts = vec![
        post_with_text("a@x.com", "/groups/g/posts/1"),
        post_with_text("b@x.com", "/groups/g/posts/2"),
        post_with_text("c@x.com", "/groups/g/posts/3"),
        post_with_text("a@x.com again", "/groups/g/posts/4"),
        post_with_text("no address", "/groups/g/posts/5"),
        post_with_text("d@x.com", "/groups/g/posts/6"),
    ];
    let page = FakePage::new(posts, 2, 4);
    let mut sink = VecSink::new();
    let cancel = AtomicBool::new(false);

    let mut scanner = Scanner::new(fast_options());
    let summary = scanner.run(&page, &mut sink, &cancel).expect("expected Ok(_)");

    // Every post visited exactly once despite multiple scan rounds.
    assert_eq!(summary.posts_processed, 6);
    assert_eq!(scanner.cursor(), 6);
    assert_eq!(summary.unique_emails, 4);
    let emails: Vec<&str> = sink.rows.iter().map(|row| row.0.as_str()).collect();
    assert_eq!(emails, vec!["a@x.com", "b@x.com", "c@x.com", "d@x.com"]);
    assert!(page.scrolls.get() >= 1);
}

#[test]
fn run_ends_after_bounded_scroll_attempts_without_growth() {
    let page = FakePage::fully_rendered(vec![post_with_text("nothing here", "/groups/g/posts/1")]);
    let mut sink = VecSink::new();
    let cancel = AtomicBool::new(false);

    let options = Options {
        idle_rounds_before_scroll: 1,
        max_scroll_attempts: 2,
        ..Options::default()
    };
    let summary = Scanner::new(options)
        .run(&page, &mut sink, &cancel)
        .expect("expected Ok(_)");

    assert_eq!(summary.scroll_attempts, 2);
    assert_eq!(page.scrolls.get(), 2);
    assert!(sink.rows.is_empty());
}

#[test]
fn cancellation_stops_the_run_before_any_processing() {
    let page = FakePage::fully_rendered(vec![post_with_text("a@x.com", "/groups/g/posts/1")]);
    let mut sink = VecSink::new();
    let cancel = AtomicBool::new(true);

    let summary = Scanner::new(fast_options())
        .run(&page, &mut sink, &cancel)
        .expect("expected Ok(_)");

    assert!(summary.cancelled);
    assert_eq!(summary.posts_processed, 0);
    assert!(sink.rows.is_empty());
}

#[test]
fn cancellation_mid_run_keeps_rows_already_written() {
    // The flag flips as soon as the first row lands; the scanner must
    // stop at the next safe point with that row intact.
    struct TrippingSink<'a> {
        inner: VecSink,
        cancel: &'a AtomicBool,
    }
    impl postharvest::EmailSink for TrippingSink<'_> {
        fn record(&mut self, email: &str, source: &str, link: &str) -> postharvest::Result<()> {
            self.cancel.store(true, Ordering::Relaxed);
            self.inner.record(email, source, link)
        }
    }

    let posts = vec![
        post_with_text("a@x.com", "/groups/g/posts/1"),
        post_with_text("b@x.com", "/groups/g/posts/2"),
    ];
    let page = FakePage::fully_rendered(posts);
    let cancel = AtomicBool::new(false);
    let mut sink = TrippingSink {
        inner: VecSink::new(),
        cancel: &cancel,
    };

    let summary = Scanner::new(fast_options())
        .run(&page, &mut sink, &cancel)
        .expect("expected Ok(_)");

    assert!(summary.cancelled);
    assert_eq!(summary.posts_processed, 1);
    assert_eq!(sink.inner.rows.len(), 1);
    assert_eq!(sink.inner.rows[0].0, "a@x.com");
}

#[test]
fn failing_text_read_skips_the_post_but_not_the_run() {
    let posts = vec![
        post_with_text("a@x.com", "/groups/g/posts/1").failing_text(),
        post_with_text("b@x.com", "/groups/g/posts/2"),
    ];
    let page = FakePage::fully_rendered(posts);
    let mut sink = VecSink::new();
    let cancel = AtomicBool::new(false);

    let summary = Scanner::new(fast_options())
        .run(&page, &mut sink, &cancel)
        .expect("expected Ok(_)");

    assert_eq!(summary.posts_processed, 2);
    assert_eq!(sink.rows.len(), 1);
    assert_eq!(sink.rows[0].0, "b@x.com");
}

#[test]
fn caption_expansion_clicks_are_bounded() {
    let toggle = FakeElement::new();
    let post = post_with_text("a@x.com", "/groups/g/posts/1")
        .with_children("text=/see more/i", vec![toggle.clone()]);
    let page = FakePage::fully_rendered(vec![post]);
    let mut sink = VecSink::new();
    let cancel = AtomicBool::new(false);

    let options = Options {
        expand_attempts: 4,
        ..fast_options()
    };
    Scanner::new(options)
        .run(&page, &mut sink, &cancel)
        .expect("expected Ok(_)");

    assert_eq!(toggle.clicks(), 4);
    assert_eq!(sink.rows.len(), 1);
}

#[test]
fn failing_expansion_click_still_reads_the_post() {
    let toggle = FakeElement::new().failing_click();
    let post = post_with_text("a@x.com", "/groups/g/posts/1")
        .with_children("text=/see more/i", vec![toggle]);
    let page = FakePage::fully_rendered(vec![post]);
    let mut sink = VecSink::new();
    let cancel = AtomicBool::new(false);

    Scanner::new(fast_options())
        .run(&page, &mut sink, &cancel)
        .expect("expected Ok(_)");

    assert_eq!(sink.rows.len(), 1);
    assert_eq!(sink.rows[0].0, "a@x.com");
}

#[test]
fn seen_set_survives_across_runs_of_one_scanner() {
    let page = FakePage::fully_rendered(vec![post_with_text("a@x.com", "/groups/g/posts/1")]);
    let mut sink = VecSink::new();
    let cancel = AtomicBool::new(false);

    let mut scanner = Scanner::new(fast_options());
    scanner.run(&page, &mut sink, &cancel).expect("expected Ok(_)");
    assert_eq!(sink.rows.len(), 1);

    // A second pass over the same feed re-reads nothing new: the cursor
    // is past every rendered post and the address is already seen.
    scanner.run(&page, &mut sink, &cancel).expect("expected Ok(_)");
    assert_eq!(sink.rows.len(), 1);
    assert_eq!(scanner.unique_emails(), 1);
}
