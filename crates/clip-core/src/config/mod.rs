//! # Sync configuration DTO / 同步配置数据
//!
//! Pure data for everything the pipelines read from the shared settings
//! store: watched directories, remote endpoint, credentials and the
//! notification toggles.
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No I/O** (loading lives in `clip-infra::settings`)
//! ❌ **No existence checks on paths** (pipelines check when they start)

use std::path::PathBuf;

use base64::Engine;
use serde::{Deserialize, Serialize};

/// Device tag used when neither the config nor the host provides one.
pub const FALLBACK_DEVICE_TAG: &str = "Unknown Device";

/// Default HTTP timeout for remote requests.
pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    pub paths: PathsConfig,
    pub remote: RemoteConfig,
    pub notifications: NotificationConfig,
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory the outbound pipeline watches for `*.plist` snapshots.
    pub snapshot_dir: PathBuf,
    /// Directory whose changes make the inbound pipeline poll the remote.
    pub signal_dir: PathBuf,
    /// Where the file-backed history store keeps its entries.
    pub history_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub url: String,
    pub username: String,
    pub password: String,
    /// Device tag sent with every upload. Empty means "use the host name".
    pub device_tag: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Alert on local clipboard changes.
    /// 本地剪贴板变化时是否提醒。
    pub show_clipboard_notification: bool,
    /// Alert when the inbound pipeline pulls a message from the remote.
    /// 收到云端消息时是否提醒。
    pub show_cloud_notification: bool,
    pub haptics: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    pub limit: HistoryLimit,
}

/// Number of entries the local history keeps. Stored as the plain count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum HistoryLimit {
    Ten,
    TwentyFive,
    Fifty,
    OneHundred,
}

impl HistoryLimit {
    pub fn count(self) -> usize {
        match self {
            HistoryLimit::Ten => 10,
            HistoryLimit::TwentyFive => 25,
            HistoryLimit::Fifty => 50,
            HistoryLimit::OneHundred => 100,
        }
    }

    /// Maps a raw count to one of the supported limits. Unsupported values
    /// fall back to 25.
    pub fn from_count(count: i64) -> Self {
        match count {
            10 => HistoryLimit::Ten,
            50 => HistoryLimit::Fifty,
            100 => HistoryLimit::OneHundred,
            _ => HistoryLimit::TwentyFive,
        }
    }
}

impl From<i64> for HistoryLimit {
    fn from(count: i64) -> Self {
        HistoryLimit::from_count(count)
    }
}

impl From<HistoryLimit> for i64 {
    fn from(limit: HistoryLimit) -> Self {
        limit.count() as i64
    }
}

impl Default for HistoryLimit {
    fn default() -> Self {
        HistoryLimit::TwentyFive
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            remote: RemoteConfig {
                url: String::new(),
                username: String::new(),
                password: String::new(),
                device_tag: String::new(),
                timeout_secs: DEFAULT_REMOTE_TIMEOUT_SECS,
            },
            notifications: NotificationConfig {
                show_clipboard_notification: true,
                show_cloud_notification: true,
                haptics: true,
            },
            history: HistoryConfig::default(),
        }
    }
}

/// Endpoint plus credential set, only produced when all three are present.
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteCredentials {
    pub url: String,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for RemoteCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteCredentials")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl RemoteCredentials {
    /// Value for the `Authorization` header: `Basic base64(username:password)`.
    pub fn authorization_header(&self) -> String {
        basic_authorization(&self.username, &self.password)
    }
}

pub fn basic_authorization(username: &str, password: &str) -> String {
    let raw = format!("{}:{}", username, password);
    format!(
        "Basic {}",
        base64::engine::general_purpose::STANDARD.encode(raw.as_bytes())
    )
}

impl SyncConfig {
    /// Create SyncConfig from a TOML value.
    /// 从 TOML 值创建 SyncConfig
    ///
    /// Missing keys keep their default value. The only normalization is
    /// dropping a trailing `/` from the snapshot directory.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let defaults = SyncConfig::default();

        let str_at = |section: &str, key: &str| -> Option<String> {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };
        let bool_at = |section: &str, key: &str| -> Option<bool> {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_bool())
        };
        let int_at = |section: &str, key: &str| -> Option<i64> {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_integer())
        };

        let snapshot_dir = str_at("paths", "snapshot_dir").unwrap_or_default();

        Ok(Self {
            paths: PathsConfig {
                snapshot_dir: PathBuf::from(trim_trailing_slash(&snapshot_dir)),
                signal_dir: PathBuf::from(str_at("paths", "signal_dir").unwrap_or_default()),
                history_file: PathBuf::from(str_at("paths", "history_file").unwrap_or_default()),
            },
            remote: RemoteConfig {
                url: str_at("remote", "url").unwrap_or_default(),
                username: str_at("remote", "username").unwrap_or_default(),
                password: str_at("remote", "password").unwrap_or_default(),
                device_tag: str_at("remote", "device_tag").unwrap_or_default(),
                timeout_secs: int_at("remote", "timeout_secs")
                    .and_then(|v| u64::try_from(v).ok())
                    .unwrap_or(defaults.remote.timeout_secs),
            },
            notifications: NotificationConfig {
                show_clipboard_notification: bool_at(
                    "notifications",
                    "show_clipboard_notification",
                )
                .unwrap_or(defaults.notifications.show_clipboard_notification),
                show_cloud_notification: bool_at("notifications", "show_cloud_notification")
                    .unwrap_or(defaults.notifications.show_cloud_notification),
                haptics: bool_at("notifications", "haptics")
                    .unwrap_or(defaults.notifications.haptics),
            },
            history: HistoryConfig {
                limit: int_at("history", "limit")
                    .map(HistoryLimit::from_count)
                    .unwrap_or_default(),
            },
        })
    }

    /// Returns the endpoint and credentials when URL, username and password
    /// are all set and the URL uses an http(s) scheme.
    pub fn credentials(&self) -> Option<RemoteCredentials> {
        let url = self.remote.url.trim();
        let has_scheme = url.starts_with("http://") || url.starts_with("https://");
        if !has_scheme || self.remote.username.is_empty() || self.remote.password.is_empty() {
            return None;
        }

        Some(RemoteCredentials {
            url: url.to_string(),
            username: self.remote.username.clone(),
            password: self.remote.password.clone(),
        })
    }

    /// Device tag for uploads, preferring the configured tag over `host_name`.
    pub fn device_tag_or(&self, host_name: Option<&str>) -> String {
        let configured = self.remote.device_tag.trim();
        if !configured.is_empty() {
            return configured.to_string();
        }
        host_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_DEVICE_TAG)
            .to_string()
    }
}

fn trim_trailing_slash(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}
