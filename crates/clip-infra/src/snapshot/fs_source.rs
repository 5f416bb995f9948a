use std::io::Cursor;
use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::fs;
use tracing::{debug, warn};

use clip_core::clipboard::meta_keys::snapshot;
use clip_core::clipboard::{SnapshotFile, SnapshotItem, SnapshotPayload};
use clip_core::ports::{SnapshotError, SnapshotSourcePort};

/// Reads property-list snapshots from a local directory.
#[derive(Debug, Default, Clone)]
pub struct FsSnapshotSource;

impl FsSnapshotSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SnapshotSourcePort for FsSnapshotSource {
    async fn list_snapshots(&self, dir: &Path) -> Result<Vec<SnapshotFile>, SnapshotError> {
        let dir_error = |source| SnapshotError::Directory {
            path: dir.to_path_buf(),
            source,
        };

        let mut entries = fs::read_dir(dir).await.map_err(dir_error)?;
        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(dir_error)? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(snapshot::FILE_EXTENSION) {
                continue;
            }

            // The file may vanish between listing and stat.
            let metadata = match entry.metadata().await {
                Ok(metadata) if metadata.is_file() => metadata,
                Ok(_) => continue,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "Skipping unreadable snapshot");
                    continue;
                }
            };

            let Ok(created) = metadata.created().or_else(|_| metadata.modified()) else {
                warn!(path = %path.display(), "Snapshot has no timestamp, skipping");
                continue;
            };

            files.push(SnapshotFile::new(path, DateTime::<Utc>::from(created)));
        }

        debug!(dir = %dir.display(), count = files.len(), "Listed snapshots");
        Ok(files)
    }

    async fn read_payload(&self, file: &SnapshotFile) -> Result<SnapshotPayload, SnapshotError> {
        let bytes = fs::read(&file.path)
            .await
            .map_err(|source| SnapshotError::Read {
                path: file.path.clone(),
                source,
            })?;

        let value = plist::Value::from_reader(Cursor::new(bytes)).map_err(|e| {
            SnapshotError::Malformed {
                path: file.path.clone(),
                reason: e.to_string(),
            }
        })?;

        payload_from_plist(&value).ok_or_else(|| SnapshotError::Malformed {
            path: file.path.clone(),
            reason: "top level is not a dictionary".to_string(),
        })
    }
}

/// `None` when the root is not a dictionary. Unexpected shapes below the
/// root only drop the affected items.
fn payload_from_plist(value: &plist::Value) -> Option<SnapshotPayload> {
    let root = value.as_dictionary()?;

    let items = root
        .get(snapshot::ITEMS)
        .and_then(|items| items.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_dictionary())
                .map(|item| SnapshotItem {
                    plain_text: item
                        .get(snapshot::PLAIN_TEXT)
                        .and_then(|text| text.as_string())
                        .map(str::to_string),
                })
                .collect()
        })
        .unwrap_or_default();

    Some(SnapshotPayload::new(items))
}
