//! # clip-platform
//!
//! OS-facing implementations for clip-sync.
//!
//! This crate contains the adapters that touch the operating system:
//! directory watches, the system pasteboard and process signals.

pub mod adapters;
pub mod clipboard;
pub mod signals;
pub mod watcher;

pub use adapters::{LogHaptics, LogNotificationSink, StaticAppState};
pub use clipboard::{PasteboardWatcher, SystemPasteboard};
pub use watcher::NotifyDirectoryWatcher;
