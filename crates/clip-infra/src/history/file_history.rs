use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use clip_core::config::HistoryLimit;
use clip_core::ports::{HistoryError, LocalHistoryPort};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub text: String,
    pub saved_at: DateTime<Utc>,
}

/// Clipboard history kept as a JSON array, newest first.
///
/// Every save re-reads the file so entries written by other processes are
/// kept. Writes go through a temp file and a rename.
///
/// 以 JSON 数组保存的剪贴板历史（新的在前）。
pub struct FileHistoryStore {
    path: PathBuf,
    limit: HistoryLimit,
    entries: Mutex<Vec<HistoryEntry>>,
}

impl FileHistoryStore {
    pub fn new(path: impl Into<PathBuf>, limit: HistoryLimit) -> Self {
        Self {
            path: path.into(),
            limit,
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries as of the last save or refresh.
    pub async fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.lock().await.clone()
    }

    async fn read_from_disk(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(HistoryError::Io(e)),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            HistoryError::Encoding(format!("{}: {}", self.path.display(), e))
        })
    }

    async fn atomic_write(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).await?;
        }

        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| HistoryError::Encoding(e.to_string()))?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content).await?;
        fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl LocalHistoryPort for FileHistoryStore {
    async fn save(&self, text: &str) -> Result<(), HistoryError> {
        let mut cache = self.entries.lock().await;

        let mut entries = self.read_from_disk().await?;
        entries.insert(
            0,
            HistoryEntry {
                id: Uuid::new_v4(),
                text: text.to_string(),
                saved_at: Utc::now(),
            },
        );
        entries.truncate(self.limit.count());

        self.atomic_write(&entries).await?;
        debug!(count = entries.len(), "History saved");
        *cache = entries;
        Ok(())
    }

    async fn refresh(&self) -> Result<(), HistoryError> {
        let mut cache = self.entries.lock().await;
        *cache = self.read_from_disk().await?;
        info!(count = cache.len(), path = %self.path.display(), "History refreshed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn save_prepends_and_persists() {
        let dir = TempDir::new().expect("tempdir");
        let store = FileHistoryStore::new(dir.path().join("history.json"), HistoryLimit::Ten);

        store.save("first").await.expect("save");
        store.save("second").await.expect("save");

        let reopened = FileHistoryStore::new(store.path(), HistoryLimit::Ten);
        reopened.refresh().await.expect("refresh");
        let texts: Vec<_> = reopened.entries().await.into_iter().map(|e| e.text).collect();
        assert_eq!(texts, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn save_trims_to_limit() {
        let dir = TempDir::new().expect("tempdir");
        let store = FileHistoryStore::new(dir.path().join("history.json"), HistoryLimit::Ten);

        for i in 0..15 {
            store.save(&format!("item {i}")).await.expect("save");
        }

        let entries = store.entries().await;
        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0].text, "item 14");
    }

    #[tokio::test]
    async fn concurrent_saves_are_all_kept() {
        let dir = TempDir::new().expect("tempdir");
        let store = Arc::new(FileHistoryStore::new(
            dir.path().join("nested").join("history.json"),
            HistoryLimit::Fifty,
        ));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.save(&format!("entry {i}")).await })
            })
            .collect();
        for handle in handles {
            handle.await.expect("join").expect("save");
        }

        store.refresh().await.expect("refresh");
        assert_eq!(store.entries().await.len(), 8);
    }

    #[tokio::test]
    async fn corrupt_file_fails_save() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("history.json");
        std::fs::write(&path, "{not json").expect("write");

        let store = FileHistoryStore::new(&path, HistoryLimit::Ten);
        let err = store.save("text").await.expect_err("corrupt");
        assert!(matches!(err, HistoryError::Encoding(_)));
    }

    #[tokio::test]
    async fn refresh_of_missing_file_is_empty() {
        let dir = TempDir::new().expect("tempdir");
        let store = FileHistoryStore::new(dir.path().join("none.json"), HistoryLimit::Ten);
        store.refresh().await.expect("refresh");
        assert!(store.entries().await.is_empty());
    }
}
