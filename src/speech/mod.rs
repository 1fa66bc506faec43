//! Speech dispatch thread.
//!
//! Announcements posted by the watcher land on a channel drained by a
//! dedicated thread, which runs the delivery path against the speaker.
//! The notification thread only ever does a channel send.

use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;

use autoclip_core::{Announcement, EventQueue, InterruptSignal, MessageSink, deliver};

enum Job {
    Speak(Announcement),
    Stop,
}

/// The `EventQueue` handed to the watcher and the app controller.
struct DispatchQueue(Sender<Job>);

impl EventQueue for DispatchQueue {
    fn post(&self, announcement: Announcement) {
        if self.0.send(Job::Speak(announcement)).is_err() {
            log::debug!("speech: dispatcher gone, announcement dropped");
        }
    }
}

/// Owns the speech thread.
pub struct Dispatcher {
    queue: Arc<DispatchQueue>,
    thread: Option<JoinHandle<()>>,
}

impl Dispatcher {
    /// Starts the speech thread around `speaker`.
    pub fn spawn<S>(speaker: S) -> io::Result<Self>
    where
        S: MessageSink + InterruptSignal + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let thread = std::thread::Builder::new()
            .name("autoclip-speech".into())
            .spawn(move || drain(&rx, &speaker))?;
        Ok(Self {
            queue: Arc::new(DispatchQueue(tx)),
            thread: Some(thread),
        })
    }

    /// A handle for posting announcements.
    pub fn queue(&self) -> Arc<dyn EventQueue> {
        self.queue.clone()
    }

    /// Finishes the announcements already queued, then stops the thread.
    ///
    /// Queue handles still held elsewhere keep working but their posts
    /// are dropped.
    pub fn shutdown(mut self) {
        let _ = self.queue.0.send(Job::Stop);
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                log::error!("speech: dispatcher thread panicked");
            }
        }
    }
}

fn drain<S: MessageSink + InterruptSignal>(rx: &Receiver<Job>, speaker: &S) {
    while let Ok(Job::Speak(announcement)) = rx.recv() {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            deliver(&announcement, speaker, speaker);
        }));
        if outcome.is_err() {
            log::error!("speech: delivery panicked, announcement dropped");
        }
    }
    log::debug!("speech: dispatcher stopped");
}

/// Writes announcements to standard output, one chunk per line.
///
/// Stands in for a screen reader when the process runs in a console.
#[derive(Debug, Default)]
pub struct ConsoleSpeaker;

impl MessageSink for ConsoleSpeaker {
    fn speak(&self, text: &str) {
        println!("{text}");
    }
}

impl InterruptSignal for ConsoleSpeaker {
    fn cancel_speech(&self) {
        log::debug!("speech: cancel");
    }
}
