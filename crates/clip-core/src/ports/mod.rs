//! Port interfaces for the application layer
//!
//! Ports define the contract between the sync pipelines and the
//! infrastructure or platform implementations. This follows Hexagonal
//! Architecture principles, allowing the pipelines to remain independent of
//! the filesystem, the network and the OS pasteboard.
//!
//! ## Port Placement Guidelines
//!
//! Before adding a new port to `clip-core/ports`, ask yourself three questions:
//!
//! 1. **Does this port represent a business capability?**
//! 2. **Will it be depended upon by multiple use cases or pipelines?**
//! 3. **Is it implemented by the infrastructure or platform layer?**
//!
//! If all three answers are **yes**, place it in `clip-core/ports`.
//! Otherwise, place it in the relevant domain submodule.

pub mod directory_watcher;
pub mod errors;
mod history;
mod notification;
mod pasteboard;
mod remote;
mod settings;
mod snapshot_source;

pub use directory_watcher::{DirectoryChange, DirectoryWatcherPort, WatchHandle};
pub use errors::{HistoryError, PasteboardError, RemoteError, SnapshotError, WatchError};
pub use history::LocalHistoryPort;
pub use notification::{HapticPort, NotificationPort};
pub use pasteboard::{AppStatePort, PasteboardPort};
pub use remote::RemoteClipboardPort;
pub use settings::SettingsPort;
pub use snapshot_source::SnapshotSourcePort;
