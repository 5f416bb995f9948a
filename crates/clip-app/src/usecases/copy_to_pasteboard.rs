//! Use case for writing text to the pasteboard as this app
//! 以本应用身份写入剪贴板的用例

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{info, info_span, Instrument};

use clip_core::notification::AlertAction;
use clip_core::pasteboard::PasteboardSignal;
use clip_core::ports::PasteboardPort;

/// Copies text to the pasteboard without triggering an outbound upload.
///
/// ## Behavior / 行为
/// - Raises "ignore next change" on the gate channel first
/// - Then writes the text tagged with the own clipping type
///
/// The gate consumes the suppression on the change our own write produces.
pub struct CopyToPasteboardUseCase {
    pasteboard: Arc<dyn PasteboardPort>,
    gate: mpsc::Sender<PasteboardSignal>,
}

impl CopyToPasteboardUseCase {
    pub fn new(pasteboard: Arc<dyn PasteboardPort>, gate: mpsc::Sender<PasteboardSignal>) -> Self {
        Self { pasteboard, gate }
    }

    pub async fn execute(&self, text: &str) -> Result<()> {
        let span = info_span!("usecase.copy_to_pasteboard.execute", chars = text.chars().count());

        async {
            self.gate
                .send(PasteboardSignal::IgnoreNextChange)
                .await
                .context("pasteboard gate is not running")?;

            let pasteboard = self.pasteboard.clone();
            let owned = text.to_string();
            tokio::task::spawn_blocking(move || pasteboard.write_text_as_own(&owned))
                .await
                .context("pasteboard write task failed")?
                .context("write to pasteboard failed")?;

            info!("Copied text to pasteboard");
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Runs the action attached to a delivered alert.
    pub async fn handle_action(&self, action: &AlertAction) -> Result<()> {
        match action {
            AlertAction::CopyToPasteboard { text } => self.execute(text).await,
        }
    }
}
