//! # clip-infra
//!
//! Adapters for the `clip-core` ports that talk to the filesystem and the
//! network.

pub mod fs;
pub mod history;
pub mod remote;
pub mod settings;
pub mod snapshot;

pub use history::FileHistoryStore;
pub use remote::WebDavClipboardClient;
pub use settings::FileSettingsRepository;
pub use snapshot::FsSnapshotSource;
