use std::path::Path;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use clip_core::ports::{DirectoryChange, DirectoryWatcherPort, WatchHandle};

/// The single directory watch a pipeline owns.
pub(crate) struct DirectoryMonitor {
    pipeline: &'static str,
    watcher: Arc<dyn DirectoryWatcherPort>,
    events_tx: mpsc::UnboundedSender<DirectoryChange>,
    handle: Option<WatchHandle>,
}

impl DirectoryMonitor {
    pub(crate) fn new(
        pipeline: &'static str,
        watcher: Arc<dyn DirectoryWatcherPort>,
    ) -> (Self, mpsc::UnboundedReceiver<DirectoryChange>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        (
            Self {
                pipeline,
                watcher,
                events_tx,
                handle: None,
            },
            events_rx,
        )
    }

    pub(crate) fn is_watching(&self) -> bool {
        self.handle.as_ref().is_some_and(WatchHandle::is_active)
    }

    /// Opens the watch. Failures are logged and never retried; the pipeline
    /// then simply does not react to directory changes.
    pub(crate) fn start(&mut self, dir: &Path) -> bool {
        if self.is_watching() {
            debug!(pipeline = self.pipeline, "Monitoring already started");
            return true;
        }

        if dir.as_os_str().is_empty() {
            warn!(
                pipeline = self.pipeline,
                "Watch directory not configured, monitoring not started"
            );
            return false;
        }

        match self.watcher.watch(dir, self.events_tx.clone()) {
            Ok(handle) => {
                info!(pipeline = self.pipeline, dir = %dir.display(), "Started monitoring");
                self.handle = Some(handle);
                true
            }
            Err(err) => {
                warn!(
                    pipeline = self.pipeline,
                    dir = %dir.display(),
                    error = %err,
                    "Unable to monitor directory, monitoring not started"
                );
                false
            }
        }
    }

    pub(crate) fn stop(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.stop();
            info!(pipeline = self.pipeline, "Stopped monitoring");
        }
    }
}
