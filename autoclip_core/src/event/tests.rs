//! Delivery path tests.

use std::cell::RefCell;
use std::sync::mpsc;

use super::{Announcement, Chunking, EventQueue, InterruptSignal, MessageSink, deliver};

/// Records interrupts and spoken chunks in call order.
#[derive(Default)]
struct Transcript {
    lines: RefCell<Vec<String>>,
}

impl Transcript {
    fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl MessageSink for Transcript {
    fn speak(&self, text: &str) {
        self.lines.borrow_mut().push(text.to_owned());
    }
}

impl InterruptSignal for Transcript {
    fn cancel_speech(&self) {
        self.lines.borrow_mut().push("<interrupt>".to_owned());
    }
}

const CHUNKING: Chunking = Chunking {
    size: 500,
    split_at_word: true,
};

#[test]
fn short_text_is_spoken_once() {
    let t = Transcript::default();
    deliver(
        &Announcement::clipboard("hello world".into(), false, CHUNKING),
        &t,
        &t,
    );
    assert_eq!(t.lines(), vec!["hello world"]);
}

#[test]
fn interrupt_precedes_first_chunk() {
    let t = Transcript::default();
    let text: String = "abcdefghij ".repeat(110).chars().take(1200).collect();
    deliver(&Announcement::clipboard(text, true, CHUNKING), &t, &t);
    let lines = t.lines();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "<interrupt>");
    assert!(lines[1..].iter().all(|l| l.chars().count() <= 500));
}

#[test]
fn chunks_are_spoken_in_order() {
    let t = Transcript::default();
    let text = format!("{} {} {}", "a".repeat(150), "b".repeat(150), "c".repeat(150));
    deliver(
        &Announcement::clipboard(
            text,
            false,
            Chunking {
                size: 200,
                split_at_word: true,
            },
        ),
        &t,
        &t,
    );
    assert_eq!(
        t.lines(),
        vec!["a".repeat(150), "b".repeat(150), "c".repeat(150)]
    );
}

#[test]
fn text_at_chunk_size_is_not_split() {
    let t = Transcript::default();
    let text = "x ".repeat(250);
    deliver(&Announcement::clipboard(text.clone(), false, CHUNKING), &t, &t);
    assert_eq!(t.lines(), vec![text]);
}

#[test]
fn status_message_is_never_split() {
    let t = Transcript::default();
    let text = "status ".repeat(200);
    deliver(&Announcement::message(text.clone()), &t, &t);
    assert_eq!(t.lines(), vec![text]);
}

#[test]
fn sender_posts_into_channel() {
    let (tx, rx) = mpsc::channel();
    tx.post(Announcement::message("one"));
    tx.post(Announcement::message("two"));
    let got: Vec<_> = rx.try_iter().map(|a| a.text).collect();
    assert_eq!(got, vec!["one", "two"]);
}

#[test]
fn posting_to_closed_queue_is_silent() {
    let (tx, rx) = mpsc::channel::<Announcement>();
    drop(rx);
    tx.post(Announcement::message("nobody listens"));
}
