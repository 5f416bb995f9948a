use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use clip_core::{ports::SettingsPort, SyncConfig};

/// TOML-backed settings store. Read-only: the file is edited by the user or
/// another process, never by the daemon.
///
/// Nothing is cached: every `load` reads the file again, so edits made while
/// the process runs take effect on the next pipeline step.
pub struct FileSettingsRepository {
    path: PathBuf,
}

impl FileSettingsRepository {
    /// Creates a FileSettingsRepository that reads `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use clip_infra::FileSettingsRepository;
    /// let repo = FileSettingsRepository::new("/tmp/clip-sync/config.toml");
    /// assert!(repo.path().ends_with("config.toml"));
    /// ```
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SettingsPort for FileSettingsRepository {
    /// Loads the config from disk. A missing file yields `SyncConfig::default()`.
    async fn load(&self) -> Result<SyncConfig> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SyncConfig::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read settings failed: {}", self.path.display()))
            }
        };

        let value: toml::Value = toml::from_str(&content)
            .with_context(|| format!("parse settings failed: {}", self.path.display()))?;
        SyncConfig::from_toml(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_loads_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let repo = FileSettingsRepository::new(dir.path().join("config.toml"));

        let config = repo.load().await.expect("load");
        assert_eq!(config, SyncConfig::default());
    }

    #[tokio::test]
    async fn every_load_sees_external_edits() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("config.toml");
        let repo = FileSettingsRepository::new(&path);

        std::fs::write(&path, "[remote]\nurl = \"https://a.example\"\n").expect("write");
        assert_eq!(repo.load().await.expect("load").remote.url, "https://a.example");

        std::fs::write(&path, "[remote]\nurl = \"https://b.example\"\n").expect("write");
        assert_eq!(repo.load().await.expect("load").remote.url, "https://b.example");
    }

    #[tokio::test]
    async fn invalid_toml_is_an_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[remote\nurl = ").expect("write");

        let err = FileSettingsRepository::new(&path)
            .load()
            .await
            .expect_err("invalid toml");
        assert!(err.to_string().contains("parse settings failed"));
    }
}
