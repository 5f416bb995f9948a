use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR_NAME: &str = "clip-sync";

/// Get the clip-sync data root directory.
///
/// 获取 clip-sync 数据根目录。
///
/// # Platform-specific Paths / 平台特定路径
/// - macOS: ~/Library/Application Support/clip-sync
/// - Windows: %APPDATA%\clip-sync
/// - Linux: $XDG_DATA_HOME/clip-sync or ~/.local/share/clip-sync
///
/// # Behavior / 行为
/// - This function does not create directories.
/// - 此函数不自动创建目录。
pub fn app_data_dir() -> Result<PathBuf> {
    let base_dir = platform_data_dir().context("Failed to get platform-specific data directory")?;
    Ok(base_dir.join(APP_DIR_NAME))
}

/// 获取配置目录
pub fn app_config_dir() -> Result<PathBuf> {
    let base_dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Unable to get platform config directory"))?;
    Ok(base_dir.join(APP_DIR_NAME))
}

/// `<config_dir>/clip-sync/config.toml`
pub fn default_config_path() -> Result<PathBuf> {
    Ok(app_config_dir()?.join("config.toml"))
}

/// History file used when the config leaves `paths.history_file` empty.
pub fn default_history_file() -> Result<PathBuf> {
    Ok(app_data_dir()?.join("history.json"))
}

/// 获取日志目录
pub fn logs_dir() -> Result<PathBuf> {
    Ok(app_data_dir()?.join("logs"))
}

fn platform_data_dir() -> Result<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        // 优先使用 XDG_DATA_HOME
        if let Some(xdg_data_home) = std::env::var_os("XDG_DATA_HOME") {
            return Ok(PathBuf::from(xdg_data_home));
        }
    }

    dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Unable to get platform data directory"))
}
