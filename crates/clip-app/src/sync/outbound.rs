use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};

use clip_core::clipboard::{select_newest, ClipboardSnippet};
use clip_core::ports::{
    DirectoryChange, LocalHistoryPort, RemoteClipboardPort, RemoteError, SettingsPort,
    SnapshotSourcePort,
};
use clip_core::sync::{LastProcessedMarker, UploadQueue};

use super::monitor::DirectoryMonitor;
use super::timer::PipelineTimer;
use super::timings::SyncTimings;
use crate::deps::SyncDeps;

enum OutboundCommand {
    StartMonitoring { reply: oneshot::Sender<bool> },
    DirectoryChanged,
    SettleElapsed,
    ReadLatestAndUpload,
    UploadFinished(Result<(), RemoteError>),
    RetryElapsed,
    Status { reply: oneshot::Sender<OutboundStatus> },
    Shutdown { reply: oneshot::Sender<()> },
}

/// Point-in-time view of the outbound pipeline state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundStatus {
    pub monitoring: bool,
    pub queue_len: usize,
    pub queue_head: Option<String>,
    pub in_flight: bool,
    pub retry_pending: bool,
    pub last_processed: Option<DateTime<Utc>>,
    pub upload_attempts: u64,
}

/// Snapshot directory → local history → remote upload.
///
/// 监听快照目录，保存到本地历史并上传到远端。
///
/// Uploads are single-flight and FIFO. A failed upload keeps the queue head
/// and is retried after a flat delay, forever.
pub struct OutboundSyncPipeline {
    settings: Arc<dyn SettingsPort>,
    history: Arc<dyn LocalHistoryPort>,
    remote: Arc<dyn RemoteClipboardPort>,
    snapshots: Arc<dyn SnapshotSourcePort>,
    host_name: Option<String>,
    timings: SyncTimings,
    monitor: DirectoryMonitor,
    commands: mpsc::WeakUnboundedSender<OutboundCommand>,
    marker: LastProcessedMarker,
    queue: UploadQueue,
    settle: PipelineTimer,
    retry: PipelineTimer,
    upload_attempts: u64,
}

impl OutboundSyncPipeline {
    /// Spawns the pipeline task. It runs until [`OutboundSyncHandle::shutdown`]
    /// or until every handle is dropped.
    pub fn spawn(deps: &SyncDeps, timings: SyncTimings) -> (OutboundSyncHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (monitor, events_rx) = DirectoryMonitor::new("outbound", deps.watcher.clone());

        let pipeline = Self {
            settings: deps.settings.clone(),
            history: deps.history.clone(),
            remote: deps.remote.clone(),
            snapshots: deps.snapshots.clone(),
            host_name: deps.host_name.clone(),
            timings,
            monitor,
            commands: tx.downgrade(),
            marker: LastProcessedMarker::new(),
            queue: UploadQueue::new(),
            settle: PipelineTimer::new(),
            retry: PipelineTimer::new(),
            upload_attempts: 0,
        };

        let join = tokio::spawn(
            pipeline
                .run(rx, events_rx)
                .instrument(info_span!("pipeline.outbound")),
        );
        (OutboundSyncHandle { tx }, join)
    }

    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<OutboundCommand>,
        mut directory_events: mpsc::UnboundedReceiver<DirectoryChange>,
    ) {
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(OutboundCommand::Shutdown { reply }) => {
                        self.stop();
                        let _ = reply.send(());
                        break;
                    }
                    Some(command) => self.handle(command).await,
                    None => {
                        self.stop();
                        break;
                    }
                },
                Some(change) = directory_events.recv() => {
                    debug!(dir = %change.dir.display(), "Directory change detected");
                    self.on_directory_changed();
                }
            }
        }
        debug!("Outbound pipeline stopped");
    }

    async fn handle(&mut self, command: OutboundCommand) {
        match command {
            OutboundCommand::StartMonitoring { reply } => {
                let started = self.start_monitoring().await;
                let _ = reply.send(started);
            }
            OutboundCommand::DirectoryChanged => self.on_directory_changed(),
            OutboundCommand::SettleElapsed => {
                self.settle.fired();
                self.read_latest_and_upload().await;
            }
            OutboundCommand::ReadLatestAndUpload => self.read_latest_and_upload().await,
            OutboundCommand::UploadFinished(result) => self.on_upload_finished(result).await,
            OutboundCommand::RetryElapsed => {
                self.retry.fired();
                self.process_queue().await;
            }
            OutboundCommand::Status { reply } => {
                let _ = reply.send(self.status());
            }
            // Handled by the run loop.
            OutboundCommand::Shutdown { reply } => {
                let _ = reply.send(());
            }
        }
    }

    fn post(&self, command: OutboundCommand) -> impl Future<Output = ()> + Send + 'static {
        let commands = self.commands.clone();
        async move {
            if let Some(tx) = commands.upgrade() {
                let _ = tx.send(command);
            }
        }
    }

    async fn start_monitoring(&mut self) -> bool {
        let config = match self.settings.load().await {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "Failed to load settings, monitoring not started");
                return false;
            }
        };
        self.monitor.start(&config.paths.snapshot_dir)
    }

    fn on_directory_changed(&mut self) {
        let action = self.post(OutboundCommand::SettleElapsed);
        // A burst shares one pending read; later events never push it back.
        self.settle.start_if_idle(self.timings.outbound_settle, action);
    }

    /// Picks the newest unseen snapshot, saves its text and queues it.
    async fn read_latest_and_upload(&mut self) {
        let config = match self.settings.load().await {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "Failed to load settings, skipping snapshot read");
                return;
            }
        };

        let dir = config.paths.snapshot_dir;
        if dir.as_os_str().is_empty() {
            debug!("Snapshot directory not configured, skipping");
            return;
        }

        let files = match self.snapshots.list_snapshots(&dir).await {
            Ok(files) => files,
            Err(err) => {
                warn!(error = %err, "Failed to list snapshots");
                return;
            }
        };

        let Some(newest) = select_newest(files) else {
            debug!(dir = %dir.display(), "No snapshot files found");
            return;
        };

        if !self.marker.advance(newest.created_at) {
            debug!(
                file = newest.file_name(),
                created_at = %newest.created_at,
                "Newest snapshot already processed, skipping"
            );
            return;
        }

        let payload = match self.snapshots.read_payload(&newest).await {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "Snapshot unreadable, skipping");
                return;
            }
        };

        let text = payload.extract_text();
        info!(file = newest.file_name(), chars = text.chars().count(), "Snapshot extracted");
        self.save_and_enqueue(text).await;
    }

    async fn save_and_enqueue(&mut self, text: String) {
        match self.history.save(&text).await {
            Ok(()) => debug!("Saved to local history"),
            Err(err) => warn!(error = %err, "Failed to save locally, upload continues"),
        }

        self.queue.enqueue(text);
        self.process_queue().await;
    }

    async fn process_queue(&mut self) {
        if self.queue.is_in_flight() {
            debug!("Upload already in flight");
            return;
        }
        if self.queue.is_empty() {
            return;
        }

        let config = match self.settings.load().await {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "Failed to load settings, upload queue retained");
                return;
            }
        };

        let Some(credentials) = config.credentials() else {
            debug!(
                pending = self.queue.len(),
                "Remote not configured, upload queue retained"
            );
            return;
        };

        let Some(text) = self.queue.try_begin() else {
            return;
        };

        let snippet = ClipboardSnippet::new(text, config.device_tag_or(self.host_name.as_deref()));
        self.upload_attempts += 1;
        info!(
            pending = self.queue.len(),
            attempt = self.upload_attempts,
            "Uploading queue head"
        );

        let remote = self.remote.clone();
        let report = self.commands.clone();
        tokio::spawn(
            async move {
                let result = remote.upload(&credentials, &snippet).await;
                if let Some(tx) = report.upgrade() {
                    let _ = tx.send(OutboundCommand::UploadFinished(result));
                }
            }
            .in_current_span(),
        );
    }

    async fn on_upload_finished(&mut self, result: Result<(), RemoteError>) {
        match result {
            Ok(()) => {
                self.queue.complete_success();
                info!(remaining = self.queue.len(), "Upload succeeded");
                self.process_queue().await;
            }
            Err(err) => {
                self.queue.complete_failure();
                warn!(
                    error = %err,
                    retry_in_ms = self.timings.retry_delay.as_millis() as u64,
                    "Upload failed, will retry"
                );
                self.schedule_retry();
            }
        }
    }

    fn schedule_retry(&mut self) {
        let action = self.post(OutboundCommand::RetryElapsed);
        if !self.retry.start_if_idle(self.timings.retry_delay, action) {
            debug!("Retry already scheduled");
        }
    }

    fn status(&self) -> OutboundStatus {
        OutboundStatus {
            monitoring: self.monitor.is_watching(),
            queue_len: self.queue.len(),
            queue_head: self.queue.head().map(str::to_string),
            in_flight: self.queue.is_in_flight(),
            retry_pending: self.retry.is_pending(),
            last_processed: self.marker.get(),
            upload_attempts: self.upload_attempts,
        }
    }

    fn stop(&mut self) {
        self.settle.cancel();
        self.retry.cancel();
        self.monitor.stop();
    }
}

/// Cloneable handle to a running [`OutboundSyncPipeline`].
#[derive(Clone)]
pub struct OutboundSyncHandle {
    tx: mpsc::UnboundedSender<OutboundCommand>,
}

impl OutboundSyncHandle {
    /// Opens the snapshot directory watch. Returns whether monitoring is
    /// active; failures are only logged.
    pub async fn start_monitoring(&self) -> bool {
        let (reply, rx) = oneshot::channel();
        if !self.send(OutboundCommand::StartMonitoring { reply }) {
            return false;
        }
        rx.await.unwrap_or(false)
    }

    /// Same as a watch event: waits the settle delay, then reads.
    pub fn notify_directory_changed(&self) {
        self.send(OutboundCommand::DirectoryChanged);
    }

    /// Reads the newest snapshot right away, without the settle delay.
    pub fn read_latest_and_upload(&self) {
        self.send(OutboundCommand::ReadLatestAndUpload);
    }

    pub async fn status(&self) -> Option<OutboundStatus> {
        let (reply, rx) = oneshot::channel();
        if !self.send(OutboundCommand::Status { reply }) {
            return None;
        }
        rx.await.ok()
    }

    /// Releases the watch, cancels timers and stops the task. Idempotent.
    pub async fn shutdown(&self) {
        let (reply, rx) = oneshot::channel();
        if self.send(OutboundCommand::Shutdown { reply }) {
            let _ = rx.await;
        }
    }

    fn send(&self, command: OutboundCommand) -> bool {
        if self.tx.send(command).is_err() {
            debug!("Outbound pipeline stopped, command dropped");
            return false;
        }
        true
    }
}
