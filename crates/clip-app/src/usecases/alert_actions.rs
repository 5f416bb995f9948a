//! Runs the actions attached to delivered alerts
//! 执行用户在提醒上触发的操作

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info_span, warn, Instrument};

use clip_core::notification::AlertAction;
use clip_core::pasteboard::PasteboardSignal;
use clip_core::ports::PasteboardPort;

use super::copy_to_pasteboard::CopyToPasteboardUseCase;

/// Consumes alert actions one at a time, in arrival order.
pub struct AlertActionHandler {
    copy: CopyToPasteboardUseCase,
}

impl AlertActionHandler {
    /// `gate` must be the sender feeding the running pasteboard gate, so the
    /// write a copy action makes is swallowed instead of uploaded again.
    pub fn new(pasteboard: Arc<dyn PasteboardPort>, gate: mpsc::Sender<PasteboardSignal>) -> Self {
        Self {
            copy: CopyToPasteboardUseCase::new(pasteboard, gate),
        }
    }

    pub fn spawn(self, actions: mpsc::Receiver<AlertAction>) -> JoinHandle<()> {
        tokio::spawn(self.run(actions).instrument(info_span!("alert.actions")))
    }

    async fn run(self, mut actions: mpsc::Receiver<AlertAction>) {
        while let Some(action) = actions.recv().await {
            debug!(action = action.name(), "Handling alert action");
            if let Err(err) = self.copy.handle_action(&action).await {
                warn!(action = action.name(), error = %err, "Alert action failed");
            }
        }
        debug!("Alert action channel closed");
    }
}
