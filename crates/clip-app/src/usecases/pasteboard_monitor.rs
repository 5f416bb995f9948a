//! Pasteboard monitor: gate task, refresh task and pipeline start-up
//! 剪贴板监控：门控任务、刷新任务与管道启动

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};

use clip_core::notification::{UserAlert, CLIPBOARD_CHANGED_ALERT_ID};
use clip_core::pasteboard::{
    ChangeContext, ChangeReaction, GateTransition, PasteboardGate, PasteboardSignal,
    RefreshSignal,
};
use clip_core::ports::{
    AppStatePort, HapticPort, LocalHistoryPort, NotificationPort, PasteboardPort, SettingsPort,
};
use clip_core::SyncConfig;

use crate::deps::SyncDeps;
use crate::sync::{InboundSyncHandle, OutboundSyncHandle};

/// Tasks spawned by [`PasteboardMonitor::start`].
pub struct MonitorTasks {
    pub outbound_monitoring: bool,
    pub inbound_monitoring: bool,
    pub gate: JoinHandle<()>,
    pub refresh: JoinHandle<()>,
}

/// Starts both pipelines and consumes pasteboard and refresh signals.
///
/// ## Behavior / 行为
/// - `start` runs once; later calls return `None`
/// - Pasteboard signals go through a [`PasteboardGate`] in arrival order
/// - A delivered external change triggers haptic, alert and outbound extraction
/// - Refresh signals reload the history and withdraw "clipboard changed" alerts
pub struct PasteboardMonitor {
    deps: SyncDeps,
    outbound: OutboundSyncHandle,
    inbound: InboundSyncHandle,
    started: AtomicBool,
}

impl PasteboardMonitor {
    pub fn new(deps: SyncDeps, outbound: OutboundSyncHandle, inbound: InboundSyncHandle) -> Self {
        Self {
            deps,
            outbound,
            inbound,
            started: AtomicBool::new(false),
        }
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    pub async fn start(
        &self,
        signals: mpsc::Receiver<PasteboardSignal>,
        refresh: mpsc::Receiver<RefreshSignal>,
    ) -> Option<MonitorTasks> {
        if self.started.swap(true, Ordering::SeqCst) {
            debug!("Pasteboard monitor already started");
            return None;
        }

        let span = info_span!("usecase.pasteboard_monitor.start");
        async {
            let outbound_monitoring = self.outbound.start_monitoring().await;
            let inbound_monitoring = self.inbound.start_monitoring().await;

            let gate_task = GateTask {
                gate: PasteboardGate::new(),
                settings: self.deps.settings.clone(),
                notifications: self.deps.notifications.clone(),
                haptics: self.deps.haptics.clone(),
                pasteboard: self.deps.pasteboard.clone(),
                app_state: self.deps.app_state.clone(),
                outbound: self.outbound.clone(),
            };
            let gate = tokio::spawn(
                gate_task
                    .run(signals)
                    .instrument(info_span!("pasteboard.gate")),
            );

            let refresh_task = RefreshTask {
                history: self.deps.history.clone(),
                notifications: self.deps.notifications.clone(),
            };
            let refresh = tokio::spawn(
                refresh_task
                    .run(refresh)
                    .instrument(info_span!("pasteboard.refresh")),
            );

            info!(
                outbound_monitoring,
                inbound_monitoring, "Pasteboard monitor started"
            );
            Some(MonitorTasks {
                outbound_monitoring,
                inbound_monitoring,
                gate,
                refresh,
            })
        }
        .instrument(span)
        .await
    }
}

struct GateTask {
    gate: PasteboardGate,
    settings: Arc<dyn SettingsPort>,
    notifications: Arc<dyn NotificationPort>,
    haptics: Arc<dyn HapticPort>,
    pasteboard: Arc<dyn PasteboardPort>,
    app_state: Arc<dyn AppStatePort>,
    outbound: OutboundSyncHandle,
}

impl GateTask {
    async fn run(mut self, mut signals: mpsc::Receiver<PasteboardSignal>) {
        while let Some(signal) = signals.recv().await {
            match signal {
                PasteboardSignal::IgnoreNextChange => self.gate.ignore_next_change(),
                PasteboardSignal::Changed => match self.gate.on_pasteboard_changed() {
                    GateTransition::ConsumedSuppression => {
                        debug!("Own pasteboard write consumed the suppression");
                    }
                    GateTransition::Deliver => self.on_external_change().await,
                },
            }
        }
        debug!("Pasteboard signal channel closed");
    }

    async fn on_external_change(&self) {
        let config = match self.settings.load().await {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "Failed to load settings, using defaults");
                SyncConfig::default()
            }
        };

        let in_foreground = self.app_state.is_foreground();
        // Only consulted in the background.
        let contains_own_content = !in_foreground && self.contains_own_content().await;

        let context = ChangeContext {
            in_foreground,
            contains_own_content,
            haptics_allowed: config.notifications.haptics && self.haptics.sound_enabled(),
            clipboard_notification_enabled: config.notifications.show_clipboard_notification,
        };

        match ChangeReaction::plan(context) {
            ChangeReaction::SkipOwnContent => {
                debug!("Pasteboard holds own content, skipping");
            }
            ChangeReaction::React { haptic, alert } => {
                if haptic {
                    self.haptics.vibrate();
                }
                if alert {
                    if let Err(err) = self
                        .notifications
                        .deliver(UserAlert::clipboard_changed())
                        .await
                    {
                        warn!(error = %err, "Failed to deliver clipboard alert");
                    }
                }
                self.outbound.read_latest_and_upload();
            }
        }
    }

    /// Clipboard backends block, so the query runs off the async workers.
    /// Any failure counts as "not own content".
    async fn contains_own_content(&self) -> bool {
        let pasteboard = self.pasteboard.clone();
        match tokio::task::spawn_blocking(move || pasteboard.contains_own_content()).await {
            Ok(Ok(own)) => own,
            Ok(Err(err)) => {
                warn!(error = %err, "Unable to inspect pasteboard");
                false
            }
            Err(err) => {
                warn!(error = %err, "Pasteboard inspection task failed");
                false
            }
        }
    }
}

struct RefreshTask {
    history: Arc<dyn LocalHistoryPort>,
    notifications: Arc<dyn NotificationPort>,
}

impl RefreshTask {
    async fn run(self, mut refresh: mpsc::Receiver<RefreshSignal>) {
        while refresh.recv().await.is_some() {
            if let Err(err) = self.history.refresh().await {
                warn!(error = %err, "Failed to refresh history");
            }

            let ids = [CLIPBOARD_CHANGED_ALERT_ID.to_string()];
            if let Err(err) = self.notifications.remove_delivered(&ids).await {
                warn!(error = %err, "Failed to remove delivered alerts");
            }
            debug!("Refresh handled");
        }
        debug!("Refresh channel closed");
    }
}
