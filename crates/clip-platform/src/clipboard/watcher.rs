use anyhow::Result;
use clipboard_rs::{ClipboardHandler, ClipboardWatcher, ClipboardWatcherContext, WatcherShutdown};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use clip_core::pasteboard::PasteboardSignal;

/// Forwards OS clipboard change callbacks as [`PasteboardSignal::Changed`].
pub struct PasteboardChangeForwarder {
    sender: mpsc::Sender<PasteboardSignal>,
}

impl PasteboardChangeForwarder {
    pub fn new(sender: mpsc::Sender<PasteboardSignal>) -> Self {
        Self { sender }
    }
}

impl ClipboardHandler for PasteboardChangeForwarder {
    /// Runs on the watch thread, never on a runtime worker. Waits for room
    /// in the gate channel: a dropped change could leave a pending
    /// suppression to swallow the next external change instead.
    fn on_clipboard_change(&mut self) {
        if let Err(err) = self.sender.blocking_send(PasteboardSignal::Changed) {
            warn!(error = %err, "Pasteboard gate closed, change signal dropped");
        }
    }
}

/// Running OS clipboard watch. Stopped on [`PasteboardWatcher::stop`] or drop.
pub struct PasteboardWatcher {
    shutdown: Option<WatcherShutdown>,
    join: Option<JoinHandle<()>>,
}

impl PasteboardWatcher {
    pub fn start(sender: mpsc::Sender<PasteboardSignal>) -> Result<Self> {
        let mut watcher_ctx = ClipboardWatcherContext::new()
            .map_err(|e| anyhow::anyhow!("Failed to create watcher context: {}", e))?;

        let shutdown = watcher_ctx
            .add_handler(PasteboardChangeForwarder::new(sender))
            .get_shutdown_channel();

        let join = tokio::task::spawn_blocking(move || {
            info!("start pasteboard watch");
            watcher_ctx.start_watch();
            info!("pasteboard watch stopped");
        });

        Ok(Self {
            shutdown: Some(shutdown),
            join: Some(join),
        })
    }

    pub async fn stop(mut self) {
        self.shutdown_now();
        if let Some(join) = self.join.take() {
            if let Err(err) = join.await {
                warn!(error = %err, "Pasteboard watch task failed");
            }
        }
    }

    fn shutdown_now(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            shutdown.stop();
        }
    }
}

impl Drop for PasteboardWatcher {
    fn drop(&mut self) {
        self.shutdown_now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn forwarder_sends_changed_signal() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut forwarder = PasteboardChangeForwarder::new(tx);

        forwarder.on_clipboard_change();

        assert_eq!(rx.blocking_recv(), Some(PasteboardSignal::Changed));
    }

    #[test]
    fn full_channel_waits_instead_of_dropping() {
        let (tx, mut rx) = mpsc::channel(1);
        let mut forwarder = PasteboardChangeForwarder::new(tx);

        let watch = thread::spawn(move || {
            forwarder.on_clipboard_change();
            forwarder.on_clipboard_change();
        });

        // Give the second send time to hit the full channel.
        thread::sleep(Duration::from_millis(50));
        assert_eq!(rx.blocking_recv(), Some(PasteboardSignal::Changed));
        assert_eq!(rx.blocking_recv(), Some(PasteboardSignal::Changed));
        watch.join().expect("watch thread");
    }

    #[test]
    fn closed_gate_does_not_block() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let mut forwarder = PasteboardChangeForwarder::new(tx);

        forwarder.on_clipboard_change();
    }
}
