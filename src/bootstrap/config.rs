//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Resolve the config file path / 解析配置文件路径
//! - ✅ Parse TOML into the SyncConfig DTO / 将 TOML 解析为 SyncConfig DTO
//! - ✅ Report I/O and parsing errors with context / 报告带上下文的 I/O 和解析错误
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No validation logic / 禁止验证逻辑**
//! ❌ **No business rules / 禁止业务规则**
//!
//! The pipelines re-read the file through `SettingsPort` on every use; this
//! startup load only feeds the wiring (history file and limit).

use std::path::{Path, PathBuf};

use anyhow::Context;
use clip_core::SyncConfig;

/// Returns `cli_path` or the platform default
/// (`<config_dir>/clip-sync/config.toml`).
pub fn resolve_config_path(cli_path: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match cli_path {
        Some(path) => Ok(path),
        None => clip_infra::fs::default_config_path(),
    }
}

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// **NO validation is performed**: empty strings are facts, missing keys
/// keep their defaults.
///
/// # Errors / 错误
///
/// - File cannot be read (I/O error)
/// - Content is not valid TOML (parse error)
pub fn load_config(config_path: &Path) -> anyhow::Result<SyncConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    SyncConfig::from_toml(&toml_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_reads_valid_toml() {
        let toml_content = r#"
            [paths]
            snapshot_dir = "/var/mobile/copylog/"
            signal_dir = "/var/mobile/bark"

            [remote]
            url = "https://dav.example.com/clip.json"
            username = "alice"
            password = "secret"
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(
            config.paths.snapshot_dir,
            PathBuf::from("/var/mobile/copylog")
        );
        assert_eq!(config.paths.signal_dir, PathBuf::from("/var/mobile/bark"));
        assert!(config.credentials().is_some());
    }

    #[test]
    fn test_load_config_returns_defaults_when_missing() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[paths]\n").unwrap();

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config, SyncConfig::default());
    }

    #[test]
    fn test_load_config_reports_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[paths\n").unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config as TOML"));
    }

    #[test]
    fn test_load_config_reports_missing_file() {
        let err = load_config(Path::new("/nonexistent/clip-sync/config.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_cli_path_wins() {
        let path = resolve_config_path(Some(PathBuf::from("/etc/clip-sync.toml"))).unwrap();
        assert_eq!(path, PathBuf::from("/etc/clip-sync.toml"));
    }
}
