mod system_pasteboard;
mod watcher;

pub use system_pasteboard::SystemPasteboard;
pub use watcher::{PasteboardChangeForwarder, PasteboardWatcher};
