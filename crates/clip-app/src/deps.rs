//! # Sync Dependencies / 同步依赖
//!
//! Parameter grouping for pipeline and monitor construction.
//! 仅用于参数打包。
//!
//! **Note / 注意**: This is NOT a Builder pattern.
//! - No build steps / 无构建步骤
//! - No default values / 无默认值
//! - No hidden logic / 无隐藏逻辑

use std::sync::Arc;

use clip_core::ports::*;

/// Every port the sync core needs, wired once at startup.
///
/// All dependencies are required; `host_name` is the only optional value and
/// only feeds the device-tag fallback.
#[derive(Clone)]
pub struct SyncDeps {
    // Configuration / 配置
    pub settings: Arc<dyn SettingsPort>,

    // Local persistence and alerts / 本地存储与提醒
    pub history: Arc<dyn LocalHistoryPort>,
    pub notifications: Arc<dyn NotificationPort>,
    pub haptics: Arc<dyn HapticPort>,

    // Remote endpoint / 远端
    pub remote: Arc<dyn RemoteClipboardPort>,

    // Filesystem / 文件系统
    pub snapshots: Arc<dyn SnapshotSourcePort>,
    pub watcher: Arc<dyn DirectoryWatcherPort>,

    // System / 系统
    pub pasteboard: Arc<dyn PasteboardPort>,
    pub app_state: Arc<dyn AppStatePort>,
    pub host_name: Option<String>,
}
