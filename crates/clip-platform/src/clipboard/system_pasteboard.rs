use clipboard_rs::{Clipboard, ClipboardContent, ClipboardContext, ContentFormat};
use tracing::debug;

use clip_core::clipboard::meta_keys::OWN_CLIPPING_FORMAT;
use clip_core::ports::{PasteboardError, PasteboardPort};

/// The OS clipboard via `clipboard-rs`.
///
/// A fresh context is opened per call; contexts are not `Send` on every
/// platform.
#[derive(Debug, Clone)]
pub struct SystemPasteboard {
    own_format: String,
}

impl SystemPasteboard {
    pub fn new() -> Self {
        Self::with_format(OWN_CLIPPING_FORMAT)
    }

    pub fn with_format(own_format: impl Into<String>) -> Self {
        Self {
            own_format: own_format.into(),
        }
    }

    fn context() -> Result<ClipboardContext, PasteboardError> {
        ClipboardContext::new()
            .map_err(|e| PasteboardError::Unavailable(e.to_string()))
    }
}

impl Default for SystemPasteboard {
    fn default() -> Self {
        Self::new()
    }
}

impl PasteboardPort for SystemPasteboard {
    fn contains_own_content(&self) -> Result<bool, PasteboardError> {
        let ctx = Self::context()?;
        Ok(ctx.has(ContentFormat::Other(self.own_format.clone())))
    }

    fn write_text_as_own(&self, text: &str) -> Result<(), PasteboardError> {
        let ctx = Self::context()?;
        ctx.set(vec![
            ClipboardContent::Text(text.to_string()),
            ClipboardContent::Other(self.own_format.clone(), Vec::new()),
        ])
        .map_err(|e| PasteboardError::Write(e.to_string()))?;

        debug!(bytes = text.len(), format = %self.own_format, "Wrote own clipping");
        Ok(())
    }
}
