use async_trait::async_trait;

use super::errors::HistoryError;

/// Durable local clipboard history.
///
/// Shared by both pipelines; implementations must tolerate concurrent saves.
///
/// 本地剪贴板历史，两条管道共享，需支持并发写入。
#[async_trait]
pub trait LocalHistoryPort: Send + Sync {
    async fn save(&self, text: &str) -> Result<(), HistoryError>;

    /// Reloads state written by other processes.
    async fn refresh(&self) -> Result<(), HistoryError>;
}
