use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// Text used when a snapshot carries no plain-text item.
pub const PLACEHOLDER_TEXT: &str = "Unknown Content";

/// A snapshot file found in a watched directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotFile {
    pub path: PathBuf,

    /// Creation time as reported by the filesystem.
    pub created_at: DateTime<Utc>,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>, created_at: DateTime<Utc>) -> Self {
        Self {
            path: path.into(),
            created_at,
        }
    }

    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }
}

/// Picks the snapshot with the greatest creation time.
///
/// Equal timestamps are resolved by file name: the lexicographically
/// greatest name wins, so the choice never depends on directory order.
pub fn select_newest<I>(files: I) -> Option<SnapshotFile>
where
    I: IntoIterator<Item = SnapshotFile>,
{
    files.into_iter().max_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.file_name().cmp(b.file_name()))
    })
}

/// One record of the snapshot's `items` array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotItem {
    /// Value under `public.utf8-plain-text`, when it is a string.
    pub plain_text: Option<String>,
}

/// Parsed snapshot contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotPayload {
    pub items: Vec<SnapshotItem>,
}

impl SnapshotPayload {
    pub fn new(items: Vec<SnapshotItem>) -> Self {
        Self { items }
    }

    /// First plain-text item, or [`PLACEHOLDER_TEXT`].
    pub fn extract_text(&self) -> String {
        self.items
            .iter()
            .find_map(|item| item.plain_text.clone())
            .unwrap_or_else(|| PLACEHOLDER_TEXT.to_string())
    }
}
