//! Clipboard domain models.
pub mod meta_keys;
mod snapshot;
mod snippet;

pub use snapshot::{select_newest, SnapshotFile, SnapshotItem, SnapshotPayload, PLACEHOLDER_TEXT};
pub use snippet::ClipboardSnippet;
