use std::future::Future;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};

use clip_core::notification::UserAlert;
use clip_core::ports::{
    DirectoryChange, LocalHistoryPort, NotificationPort, RemoteClipboardPort, RemoteError,
    SettingsPort,
};

use super::monitor::DirectoryMonitor;
use super::timer::PipelineTimer;
use super::timings::SyncTimings;
use crate::deps::SyncDeps;

enum InboundCommand {
    StartMonitoring {
        reply: oneshot::Sender<bool>,
    },
    DirectoryChanged,
    SettleElapsed,
    Poll,
    PollFinished {
        result: Result<Option<String>, RemoteError>,
        notify: bool,
    },
    Status {
        reply: oneshot::Sender<InboundStatus>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InboundStatus {
    pub monitoring: bool,
    pub polls_started: u64,
    pub messages_saved: u64,
}

/// Signal directory change → remote poll → local history → alert.
///
/// 信号目录变化后拉取远端内容并保存。
///
/// Polls are independent: a failed poll is logged and dropped, the next
/// directory change is the only retry.
pub struct InboundSyncPipeline {
    settings: Arc<dyn SettingsPort>,
    history: Arc<dyn LocalHistoryPort>,
    notifications: Arc<dyn NotificationPort>,
    remote: Arc<dyn RemoteClipboardPort>,
    timings: SyncTimings,
    monitor: DirectoryMonitor,
    commands: mpsc::WeakUnboundedSender<InboundCommand>,
    settle: PipelineTimer,
    polls_started: u64,
    messages_saved: u64,
}

impl InboundSyncPipeline {
    pub fn spawn(deps: &SyncDeps, timings: SyncTimings) -> (InboundSyncHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (monitor, events_rx) = DirectoryMonitor::new("inbound", deps.watcher.clone());

        let pipeline = Self {
            settings: deps.settings.clone(),
            history: deps.history.clone(),
            notifications: deps.notifications.clone(),
            remote: deps.remote.clone(),
            timings,
            monitor,
            commands: tx.downgrade(),
            settle: PipelineTimer::new(),
            polls_started: 0,
            messages_saved: 0,
        };

        let join = tokio::spawn(
            pipeline
                .run(rx, events_rx)
                .instrument(info_span!("pipeline.inbound")),
        );
        (InboundSyncHandle { tx }, join)
    }

    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<InboundCommand>,
        mut directory_events: mpsc::UnboundedReceiver<DirectoryChange>,
    ) {
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(InboundCommand::Shutdown { reply }) => {
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
        debug!("Inbound pipeline stopped");
    }

    async fn handle(&mut self, command: InboundCommand) {
        match command {
            InboundCommand::StartMonitoring { reply } => {
                let started = match self.settings.load().await {
                    Ok(config) => self.monitor.start(&config.paths.signal_dir),
                    Err(err) => {
                        warn!(error = %err, "Failed to load settings, monitoring not started");
                        false
                    }
                };
                let _ = reply.send(started);
            }
            InboundCommand::DirectoryChanged => self.on_directory_changed(),
            InboundCommand::SettleElapsed => {
                self.settle.fired();
                self.poll().await;
            }
            InboundCommand::Poll => self.poll().await,
            InboundCommand::PollFinished { result, notify } => {
                self.on_poll_finished(result, notify).await
            }
            InboundCommand::Status { reply } => {
                let _ = reply.send(InboundStatus {
                    monitoring: self.monitor.is_watching(),
                    polls_started: self.polls_started,
                    messages_saved: self.messages_saved,
                });
            }
            InboundCommand::Shutdown { reply } => {
                let _ = reply.send(());
            }
        }
    }

    fn post(&self, command: InboundCommand) -> impl Future<Output = ()> + Send + 'static {
        let commands = self.commands.clone();
        async move {
            if let Some(tx) = commands.upgrade() {
                let _ = tx.send(command);
            }
        }
    }

    fn on_directory_changed(&mut self) {
        let action = self.post(InboundCommand::SettleElapsed);
        // A burst shares one pending read; later events never push it back.
        self.settle.start_if_idle(self.timings.inbound_settle, action);
    }

    async fn poll(&mut self) {
        let config = match self.settings.load().await {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "Failed to load settings, skipping poll");
                return;
            }
        };

        let Some(credentials) = config.credentials() else {
            info!("Remote not configured, skipping poll");
            return;
        };

        self.polls_started += 1;
        let notify = config.notifications.show_cloud_notification;
        let remote = self.remote.clone();
        let report = self.commands.clone();

        debug!(poll = self.polls_started, "Polling remote clipboard");
        tokio::spawn(
            async move {
                let result = remote.fetch_latest(&credentials).await;
                if let Some(tx) = report.upgrade() {
                    let _ = tx.send(InboundCommand::PollFinished { result, notify });
                }
            }
            .in_current_span(),
        );
    }

    async fn on_poll_finished(&mut self, result: Result<Option<String>, RemoteError>, notify: bool) {
        let text = match result {
            Ok(Some(text)) => text,
            Ok(None) => {
                info!("Remote response has no clipboard text");
                return;
            }
            Err(err) => {
                warn!(error = %err, "Poll failed, dropped");
                return;
            }
        };

        if let Err(err) = self.history.save(&text).await {
            warn!(error = %err, "Failed to save cloud message to local history");
            return;
        }
        self.messages_saved += 1;
        info!(chars = text.chars().count(), "Cloud message saved");

        if !notify {
            debug!("Cloud notifications disabled");
            return;
        }
        if let Err(err) = self.notifications.deliver(UserAlert::cloud_message(text)).await {
            warn!(error = %err, "Failed to deliver cloud message alert");
        }
    }

    fn stop(&mut self) {
        self.settle.cancel();
        self.monitor.stop();
    }
}

/// Cloneable handle to a running [`InboundSyncPipeline`].
#[derive(Clone)]
pub struct InboundSyncHandle {
    tx: mpsc::UnboundedSender<InboundCommand>,
}

impl InboundSyncHandle {
    pub async fn start_monitoring(&self) -> bool {
        let (reply, rx) = oneshot::channel();
        if !self.send(InboundCommand::StartMonitoring { reply }) {
            return false;
        }
        rx.await.unwrap_or(false)
    }

    pub fn notify_directory_changed(&self) {
        self.send(InboundCommand::DirectoryChanged);
    }

    /// Polls the remote right away, without the settle delay.
    pub fn poll_now(&self) {
        self.send(InboundCommand::Poll);
    }

    pub async fn status(&self) -> Option<InboundStatus> {
        let (reply, rx) = oneshot::channel();
        if !self.send(InboundCommand::Status { reply }) {
            return None;
        }
        rx.await.ok()
    }

    pub async fn shutdown(&self) {
        let (reply, rx) = oneshot::channel();
        if self.send(InboundCommand::Shutdown { reply }) {
            let _ = rx.await;
        }
    }

    fn send(&self, command: InboundCommand) -> bool {
        if self.tx.send(command).is_err() {
            debug!("Inbound pipeline stopped, command dropped");
            return false;
        }
        true
    }
}
