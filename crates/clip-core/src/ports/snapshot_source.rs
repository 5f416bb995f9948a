use std::path::Path;

use async_trait::async_trait;

use super::errors::SnapshotError;
use crate::clipboard::{SnapshotFile, SnapshotPayload};

#[async_trait]
pub trait SnapshotSourcePort: Send + Sync {
    /// Lists snapshot files in `dir` with their creation times.
    /// Files without the snapshot extension are skipped.
    async fn list_snapshots(&self, dir: &Path) -> Result<Vec<SnapshotFile>, SnapshotError>;

    async fn read_payload(&self, file: &SnapshotFile) -> Result<SnapshotPayload, SnapshotError>;
}
