//! Port doubles shared by the pipeline integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::mpsc;
use tokio::time::Instant;

use clip_app::SyncDeps;
use clip_core::clipboard::{ClipboardSnippet, SnapshotFile, SnapshotItem, SnapshotPayload};
use clip_core::config::RemoteCredentials;
use clip_core::notification::UserAlert;
use clip_core::ports::*;
use clip_core::SyncConfig;

pub const SNAPSHOT_DIR: &str = "/var/mobile/copylog";
pub const SIGNAL_DIR: &str = "/var/mobile/bark";

pub fn configured() -> SyncConfig {
    let mut config = SyncConfig::default();
    config.paths.snapshot_dir = PathBuf::from(SNAPSHOT_DIR);
    config.paths.signal_dir = PathBuf::from(SIGNAL_DIR);
    config.remote.url = "https://dav.example.com/clip.json".to_string();
    config.remote.username = "alice".to_string();
    config.remote.password = "secret".to_string();
    config
}

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

/// Lets spawned tasks and timers run. With paused time this also advances
/// the clock by `ms`.
pub async fn settle_for(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

pub struct FakeSettings {
    config: Mutex<SyncConfig>,
    pub loads: AtomicUsize,
}

impl FakeSettings {
    pub fn new(config: SyncConfig) -> Self {
        Self {
            config: Mutex::new(config),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn update(&self, f: impl FnOnce(&mut SyncConfig)) {
        f(&mut self.config.lock().unwrap());
    }
}

#[async_trait]
impl SettingsPort for FakeSettings {
    async fn load(&self) -> anyhow::Result<SyncConfig> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.config.lock().unwrap().clone())
    }
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeHistory {
    pub saves: Mutex<Vec<String>>,
    pub refreshes: AtomicUsize,
    fail: AtomicBool,
}

impl FakeHistory {
    pub fn fail_saves(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn saved(&self) -> Vec<String> {
        self.saves.lock().unwrap().clone()
    }
}

#[async_trait]
impl LocalHistoryPort for FakeHistory {
    async fn save(&self, text: &str) -> Result<(), HistoryError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(HistoryError::Unavailable("mock failure".to_string()));
        }
        self.saves.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn refresh(&self) -> Result<(), HistoryError> {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeNotifications {
    pub delivered: Mutex<Vec<UserAlert>>,
    pub removed: Mutex<Vec<Vec<String>>>,
}

impl FakeNotifications {
    pub fn delivered(&self) -> Vec<UserAlert> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationPort for FakeNotifications {
    async fn deliver(&self, alert: UserAlert) -> anyhow::Result<()> {
        self.delivered.lock().unwrap().push(alert);
        Ok(())
    }

    async fn remove_delivered(&self, identifiers: &[String]) -> anyhow::Result<()> {
        self.removed.lock().unwrap().push(identifiers.to_vec());
        Ok(())
    }
}

pub struct FakeHaptics {
    sound: bool,
    pub vibrations: AtomicUsize,
}

impl FakeHaptics {
    pub fn new(sound: bool) -> Self {
        Self {
            sound,
            vibrations: AtomicUsize::new(0),
        }
    }
}

impl HapticPort for FakeHaptics {
    fn sound_enabled(&self) -> bool {
        self.sound
    }

    fn vibrate(&self) {
        self.vibrations.fetch_add(1, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// Remote
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct UploadAttempt {
    pub at: Instant,
    pub snippet: ClipboardSnippet,
}

/// Scripted remote. Unscripted uploads succeed, unscripted fetches return
/// `Ok(None)`.
pub struct FakeRemote {
    latency: Duration,
    upload_results: Mutex<VecDeque<Result<(), RemoteError>>>,
    fetch_results: Mutex<VecDeque<Result<Option<String>, RemoteError>>>,
    pub uploads: Mutex<Vec<UploadAttempt>>,
    pub fetches: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::with_latency(Duration::ZERO)
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            upload_results: Mutex::new(VecDeque::new()),
            fetch_results: Mutex::new(VecDeque::new()),
            uploads: Mutex::new(Vec::new()),
            fetches: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn script_upload(&self, result: Result<(), RemoteError>) {
        self.upload_results.lock().unwrap().push_back(result);
    }

    pub fn script_fetch(&self, result: Result<Option<String>, RemoteError>) {
        self.fetch_results.lock().unwrap().push_back(result);
    }

    pub fn uploads(&self) -> Vec<UploadAttempt> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn uploaded_texts(&self) -> Vec<String> {
        self.uploads()
            .into_iter()
            .map(|attempt| attempt.snippet.text)
            .collect()
    }
}

#[async_trait]
impl RemoteClipboardPort for FakeRemote {
    async fn upload(
        &self,
        _credentials: &RemoteCredentials,
        snippet: &ClipboardSnippet,
    ) -> Result<(), RemoteError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.uploads.lock().unwrap().push(UploadAttempt {
            at: Instant::now(),
            snippet: snippet.clone(),
        });

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.upload_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn fetch_latest(
        &self,
        _credentials: &RemoteCredentials,
    ) -> Result<Option<String>, RemoteError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.fetch_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(None))
    }
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeSnapshots {
    files: Mutex<Vec<(SnapshotFile, Option<SnapshotPayload>)>>,
    pub lists: AtomicUsize,
    pub reads: Mutex<Vec<String>>,
}

impl FakeSnapshots {
    pub fn add_text(&self, name: &str, created_secs: i64, text: &str) {
        let payload = SnapshotPayload::new(vec![SnapshotItem {
            plain_text: Some(text.to_string()),
        }]);
        self.add(name, created_secs, Some(payload));
    }

    pub fn add_malformed(&self, name: &str, created_secs: i64) {
        self.add(name, created_secs, None);
    }

    fn add(&self, name: &str, created_secs: i64, payload: Option<SnapshotPayload>) {
        let file = SnapshotFile::new(Path::new(SNAPSHOT_DIR).join(name), at(created_secs));
        self.files.lock().unwrap().push((file, payload));
    }

    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().unwrap().clone()
    }
}

#[async_trait]
impl SnapshotSourcePort for FakeSnapshots {
    async fn list_snapshots(&self, _dir: &Path) -> Result<Vec<SnapshotFile>, SnapshotError> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .files
            .lock()
            .unwrap()
            .iter()
            .map(|(file, _)| file.clone())
            .collect())
    }

    async fn read_payload(&self, file: &SnapshotFile) -> Result<SnapshotPayload, SnapshotError> {
        self.reads.lock().unwrap().push(file.file_name().to_string());
        let files = self.files.lock().unwrap();
        let payload = files
            .iter()
            .find(|(candidate, _)| candidate.path == file.path)
            .and_then(|(_, payload)| payload.clone());
        payload.ok_or_else(|| SnapshotError::Malformed {
            path: file.path.clone(),
            reason: "not a property list".to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Directory watcher
// ---------------------------------------------------------------------------

struct ReleaseFlag(Arc<AtomicBool>);

impl Drop for ReleaseFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Keeps the sender of every opened watch so tests can fire events.
#[derive(Default)]
pub struct FakeWatcher {
    watches: Mutex<Vec<(PathBuf, mpsc::UnboundedSender<DirectoryChange>)>>,
    pub released: Arc<AtomicBool>,
    fail: AtomicBool,
}

impl FakeWatcher {
    pub fn fail_watches(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn watched(&self) -> Vec<PathBuf> {
        self.watches
            .lock()
            .unwrap()
            .iter()
            .map(|(dir, _)| dir.clone())
            .collect()
    }

    /// Sends one change event to every watch on `dir`.
    pub fn fire(&self, dir: &str) {
        for (watched, tx) in self.watches.lock().unwrap().iter() {
            if watched == Path::new(dir) {
                let _ = tx.send(DirectoryChange {
                    dir: watched.clone(),
                });
            }
        }
    }
}

impl DirectoryWatcherPort for FakeWatcher {
    fn watch(
        &self,
        dir: &Path,
        events: mpsc::UnboundedSender<DirectoryChange>,
    ) -> Result<WatchHandle, WatchError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(WatchError::NotFound(dir.to_path_buf()));
        }
        self.watches
            .lock()
            .unwrap()
            .push((dir.to_path_buf(), events));
        Ok(WatchHandle::new(
            dir,
            Box::new(ReleaseFlag(self.released.clone())),
        ))
    }
}

// ---------------------------------------------------------------------------
// Pasteboard
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakePasteboard {
    pub own_content: AtomicBool,
    pub writes: Mutex<Vec<String>>,
    /// Threads `contains_own_content` ran on.
    pub query_threads: Mutex<Vec<std::thread::ThreadId>>,
}

impl PasteboardPort for FakePasteboard {
    fn contains_own_content(&self) -> Result<bool, PasteboardError> {
        self.query_threads
            .lock()
            .unwrap()
            .push(std::thread::current().id());
        Ok(self.own_content.load(Ordering::SeqCst))
    }

    fn write_text_as_own(&self, text: &str) -> Result<(), PasteboardError> {
        self.writes.lock().unwrap().push(text.to_string());
        self.own_content.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeAppState {
    pub foreground: AtomicBool,
}

impl AppStatePort for FakeAppState {
    fn is_foreground(&self) -> bool {
        self.foreground.load(Ordering::SeqCst)
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

pub struct Harness {
    pub settings: Arc<FakeSettings>,
    pub history: Arc<FakeHistory>,
    pub notifications: Arc<FakeNotifications>,
    pub haptics: Arc<FakeHaptics>,
    pub remote: Arc<FakeRemote>,
    pub snapshots: Arc<FakeSnapshots>,
    pub watcher: Arc<FakeWatcher>,
    pub pasteboard: Arc<FakePasteboard>,
    pub app_state: Arc<FakeAppState>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_remote(FakeRemote::new())
    }

    pub fn with_remote(remote: FakeRemote) -> Self {
        Self {
            settings: Arc::new(FakeSettings::new(configured())),
            history: Arc::new(FakeHistory::default()),
            notifications: Arc::new(FakeNotifications::default()),
            haptics: Arc::new(FakeHaptics::new(true)),
            remote: Arc::new(remote),
            snapshots: Arc::new(FakeSnapshots::default()),
            watcher: Arc::new(FakeWatcher::default()),
            pasteboard: Arc::new(FakePasteboard::default()),
            app_state: Arc::new(FakeAppState::default()),
        }
    }

    pub fn deps(&self) -> SyncDeps {
        SyncDeps {
            settings: self.settings.clone(),
            history: self.history.clone(),
            notifications: self.notifications.clone(),
            haptics: self.haptics.clone(),
            remote: self.remote.clone(),
            snapshots: self.snapshots.clone(),
            watcher: self.watcher.clone(),
            pasteboard: self.pasteboard.clone(),
            app_state: self.app_state.clone(),
            host_name: Some("test-host".to_string()),
        }
    }
}
