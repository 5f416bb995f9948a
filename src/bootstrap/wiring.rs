//! # Dependency Injection / 依赖注入模块
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Create infra implementations (settings, history, remote, snapshots)
//! - ✅ Create platform implementations (watcher, pasteboard, alerts)
//! - ✅ Group them into [`SyncDeps`] / 打包为 SyncDeps
//! - ✅ Connect the alert sink to the alert action channel
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic / 禁止包含任何业务逻辑**
//! ❌ **No configuration validation / 禁止做配置验证**
//!
//! > **This is the only place allowed to depend on clip-infra + clip-platform + clip-app simultaneously.**
//! > **这是唯一允许同时依赖 clip-infra、clip-platform 和 clip-app 的地方。**

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use clip_app::SyncDeps;
use clip_core::notification::AlertAction;
use clip_core::SyncConfig;
use clip_infra::{FileHistoryStore, FileSettingsRepository, FsSnapshotSource, WebDavClipboardClient};
use clip_platform::{
    LogHaptics, LogNotificationSink, NotifyDirectoryWatcher, StaticAppState, SystemPasteboard,
};

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误（基础设施初始化失败）
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("History path resolution failed: {0}")]
    HistoryPath(String),

    #[error("Remote client initialization failed: {0}")]
    RemoteClient(String),
}

/// Everything the daemon needs: the pipeline ports plus the concrete alert
/// sink, which the signal listener activates.
pub struct WiredDaemon {
    pub deps: SyncDeps,
    pub alerts: Arc<LogNotificationSink>,
}

/// Builds every adapter and groups them for the pipelines.
///
/// `config` is the startup snapshot; only the history file location, its
/// limit and the HTTP timeout are fixed here. Everything else is re-read
/// through the settings port. Activated alert actions go to `alert_actions`.
pub fn wire_dependencies(
    config_path: &Path,
    config: &SyncConfig,
    alert_actions: mpsc::Sender<AlertAction>,
) -> WiringResult<WiredDaemon> {
    let history_file = resolve_history_file(config)?;
    let remote = WebDavClipboardClient::new(Duration::from_secs(config.remote.timeout_secs))
        .map_err(|e| WiringError::RemoteClient(e.to_string()))?;
    let alerts = Arc::new(LogNotificationSink::with_actions(alert_actions));

    let deps = SyncDeps {
        settings: Arc::new(FileSettingsRepository::new(config_path)),
        history: Arc::new(FileHistoryStore::new(history_file, config.history.limit)),
        notifications: alerts.clone(),
        // The daemon has no sound setting of its own; config gates haptics.
        haptics: Arc::new(LogHaptics::new(true)),
        remote: Arc::new(remote),
        snapshots: Arc::new(FsSnapshotSource::new()),
        watcher: Arc::new(NotifyDirectoryWatcher::new()),
        pasteboard: Arc::new(SystemPasteboard::new()),
        app_state: Arc::new(StaticAppState::background()),
        host_name: host_name(),
    };

    Ok(WiredDaemon { deps, alerts })
}

fn resolve_history_file(config: &SyncConfig) -> WiringResult<PathBuf> {
    if !config.paths.history_file.as_os_str().is_empty() {
        return Ok(config.paths.history_file.clone());
    }
    clip_infra::fs::default_history_file().map_err(|e| WiringError::HistoryPath(e.to_string()))
}

fn host_name() -> Option<String> {
    gethostname::gethostname().into_string().ok()
}
