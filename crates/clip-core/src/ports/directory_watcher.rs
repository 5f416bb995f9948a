use std::fmt;
use std::path::{Path, PathBuf};

use tokio::sync::mpsc;

use super::errors::WatchError;

/// Something changed inside a watched directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryChange {
    pub dir: PathBuf,
}

/// Port for opening a directory watch.
///
/// 目录监听端口。
///
/// # Behavior / 行为
/// - The directory must exist when `watch` is called.
/// - Events are coalesced by the pipeline, so implementations may send one
///   `DirectoryChange` per raw OS event.
pub trait DirectoryWatcherPort: Send + Sync {
    fn watch(
        &self,
        dir: &Path,
        events: mpsc::UnboundedSender<DirectoryChange>,
    ) -> Result<WatchHandle, WatchError>;
}

/// An open watch. Dropping it releases the OS resource.
pub struct WatchHandle {
    dir: PathBuf,
    guard: Option<Box<dyn Send>>,
}

impl WatchHandle {
    pub fn new(dir: impl Into<PathBuf>, guard: Box<dyn Send>) -> Self {
        Self {
            dir: dir.into(),
            guard: Some(guard),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_active(&self) -> bool {
        self.guard.is_some()
    }

    /// Releases the watch now. Idempotent.
    pub fn stop(&mut self) {
        if self.guard.take().is_some() {
            tracing::debug!(dir = %self.dir.display(), "Directory watch released");
        }
    }
}

impl fmt::Debug for WatchHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchHandle")
            .field("dir", &self.dir)
            .field("active", &self.is_active())
            .finish()
    }
}
