use std::path::Path;

use notify::{recommended_watcher, EventKind, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use clip_core::ports::{DirectoryChange, DirectoryWatcherPort, WatchError, WatchHandle};

/// Directory watch backed by `notify`.
///
/// Each create/modify/remove event inside the directory becomes one
/// [`DirectoryChange`]. Access events are dropped.
#[derive(Debug, Default, Clone)]
pub struct NotifyDirectoryWatcher;

impl NotifyDirectoryWatcher {
    pub fn new() -> Self {
        Self
    }
}

fn is_content_change(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) | EventKind::Any
    )
}

impl DirectoryWatcherPort for NotifyDirectoryWatcher {
    fn watch(
        &self,
        dir: &Path,
        events: mpsc::UnboundedSender<DirectoryChange>,
    ) -> Result<WatchHandle, WatchError> {
        if dir.as_os_str().is_empty() {
            return Err(WatchError::EmptyPath);
        }
        if !dir.exists() {
            return Err(WatchError::NotFound(dir.to_path_buf()));
        }
        if !dir.is_dir() {
            return Err(WatchError::NotADirectory(dir.to_path_buf()));
        }

        let watched = dir.to_path_buf();
        let callback_dir = watched.clone();
        let mut watcher = recommended_watcher(move |res: notify::Result<notify::Event>| match res {
            Ok(event) if is_content_change(&event.kind) => {
                debug!(dir = %callback_dir.display(), kind = ?event.kind, "Directory event");
                // Receiver gone means the pipeline stopped; nothing left to notify.
                let _ = events.send(DirectoryChange {
                    dir: callback_dir.clone(),
                });
            }
            Ok(_) => {}
            Err(err) => warn!(dir = %callback_dir.display(), error = %err, "Directory watch error"),
        })
        .map_err(|e| WatchError::Backend {
            path: watched.clone(),
            reason: e.to_string(),
        })?;

        watcher
            .watch(&watched, RecursiveMode::NonRecursive)
            .map_err(|e| WatchError::Backend {
                path: watched.clone(),
                reason: e.to_string(),
            })?;

        info!(dir = %watched.display(), "Directory watch started");
        Ok(WatchHandle::new(watched, Box::new(watcher)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn rejects_empty_and_missing_paths() {
        let watcher = NotifyDirectoryWatcher::new();
        let (tx, _rx) = mpsc::unbounded_channel();

        assert!(matches!(
            watcher.watch(Path::new(""), tx.clone()),
            Err(WatchError::EmptyPath)
        ));
        assert!(matches!(
            watcher.watch(Path::new("/definitely/not/here"), tx),
            Err(WatchError::NotFound(_))
        ));
    }

    #[test]
    fn rejects_regular_file() {
        let dir = TempDir::new().expect("tempdir");
        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").expect("write");
        let (tx, _rx) = mpsc::unbounded_channel();

        assert!(matches!(
            NotifyDirectoryWatcher::new().watch(&file, tx),
            Err(WatchError::NotADirectory(_))
        ));
    }

    #[tokio::test]
    async fn file_creation_is_reported() {
        let dir = TempDir::new().expect("tempdir");
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _handle = NotifyDirectoryWatcher::new()
            .watch(dir.path(), tx)
            .expect("watch");

        std::fs::write(dir.path().join("snap.plist"), "data").expect("write");

        let change = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("event within timeout")
            .expect("channel open");
        assert_eq!(change.dir, dir.path());
    }
}
