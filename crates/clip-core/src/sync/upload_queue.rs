use std::collections::VecDeque;

use tracing::debug;

/// FIFO of texts waiting to be uploaded, plus the single-flight guard.
///
/// The head stays in the queue while its upload is in flight and leaves only
/// through [`UploadQueue::complete_success`].
#[derive(Debug, Default)]
pub struct UploadQueue {
    pending: VecDeque<String>,
    in_flight: bool,
}

impl UploadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, text: impl Into<String>) {
        self.pending.push_back(text.into());
        debug!(len = self.pending.len(), "Upload queued");
    }

    /// Claims the head for upload.
    ///
    /// Returns `None` when an upload is already in flight or the queue is empty.
    pub fn try_begin(&mut self) -> Option<String> {
        if self.in_flight {
            return None;
        }
        let head = self.pending.front()?.clone();
        self.in_flight = true;
        Some(head)
    }

    /// The in-flight upload was acknowledged; drops the head.
    pub fn complete_success(&mut self) -> Option<String> {
        if !self.in_flight {
            return None;
        }
        self.in_flight = false;
        self.pending.pop_front()
    }

    /// The in-flight upload failed; the head stays for the next attempt.
    pub fn complete_failure(&mut self) {
        self.in_flight = false;
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn head(&self) -> Option<&str> {
        self.pending.front().map(String::as_str)
    }
}
