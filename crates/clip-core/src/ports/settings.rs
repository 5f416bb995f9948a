use async_trait::async_trait;

use crate::config::SyncConfig;

/// Read access to the shared configuration store.
///
/// Implementations must return the current values on every call; pipelines
/// re-read configuration each time they need it.
#[async_trait]
pub trait SettingsPort: Send + Sync {
    async fn load(&self) -> anyhow::Result<SyncConfig>;
}
