use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

use clip_core::notification::{AlertAction, UserAlert};
use clip_core::ports::NotificationPort;

/// Delivered identifiers kept for `remove_delivered`. Cloud alerts get a
/// fresh identifier each time, so older ones are forgotten.
const MAX_TRACKED_ALERTS: usize = 32;

#[derive(Default)]
struct SinkState {
    delivered: VecDeque<String>,
    latest_action: Option<AlertAction>,
}

/// Notification sink that writes alerts to the log.
///
/// 将提醒写入日志的通知适配器。
///
/// The action of the most recent actionable alert is kept until
/// [`LogNotificationSink::activate_latest`] forwards it, which is how a
/// headless daemon "taps" an alert.
#[derive(Default)]
pub struct LogNotificationSink {
    state: Mutex<SinkState>,
    actions: Option<mpsc::Sender<AlertAction>>,
}

impl LogNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose activated alert actions are sent to `actions`.
    pub fn with_actions(actions: mpsc::Sender<AlertAction>) -> Self {
        Self {
            state: Mutex::default(),
            actions: Some(actions),
        }
    }

    pub async fn delivered_count(&self) -> usize {
        self.state.lock().await.delivered.len()
    }

    /// Forwards the latest pending alert action. Each action runs at most
    /// once; returns whether one was sent.
    pub async fn activate_latest(&self) -> bool {
        let Some(action) = self.state.lock().await.latest_action.take() else {
            debug!("No actionable alert to activate");
            return false;
        };

        let Some(actions) = &self.actions else {
            warn!(action = action.name(), "Alert actions not connected, dropped");
            return false;
        };

        let name = action.name();
        match actions.send(action).await {
            Ok(()) => {
                info!(target: "clip_sync::alerts", action = name, "Alert activated");
                true
            }
            Err(err) => {
                warn!(action = name, error = %err, "Alert action handler gone");
                false
            }
        }
    }
}

#[async_trait]
impl NotificationPort for LogNotificationSink {
    async fn deliver(&self, alert: UserAlert) -> anyhow::Result<()> {
        info!(
            target: "clip_sync::alerts",
            id = %alert.identifier,
            category = %alert.category,
            title = %alert.title,
            body = %alert.body,
            action = alert.action.as_ref().map(|a| a.name()),
            "Alert delivered"
        );

        let mut state = self.state.lock().await;
        state.delivered.retain(|id| *id != alert.identifier);
        state.delivered.push_back(alert.identifier);
        while state.delivered.len() > MAX_TRACKED_ALERTS {
            state.delivered.pop_front();
        }
        if let Some(action) = alert.action {
            state.latest_action = Some(action);
        }
        Ok(())
    }

    async fn remove_delivered(&self, identifiers: &[String]) -> anyhow::Result<()> {
        let mut state = self.state.lock().await;
        let before = state.delivered.len();
        state.delivered.retain(|id| !identifiers.contains(id));
        let removed = before - state.delivered.len();
        info!(target: "clip_sync::alerts", removed, "Delivered alerts withdrawn");
        Ok(())
    }
}
