use super::errors::PasteboardError;

/// The shared system pasteboard.
pub trait PasteboardPort: Send + Sync {
    /// Whether the current content carries this app's own clipping type.
    fn contains_own_content(&self) -> Result<bool, PasteboardError>;

    /// Writes `text` together with the own clipping marker.
    fn write_text_as_own(&self, text: &str) -> Result<(), PasteboardError>;
}

pub trait AppStatePort: Send + Sync {
    fn is_foreground(&self) -> bool;
}
