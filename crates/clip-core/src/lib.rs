//! # clip-core
//!
//! Core domain models and port definitions for clip-sync.
//!
//! This crate contains pure business logic without any infrastructure dependencies.
//! Pipelines in `clip-app` drive these types; `clip-infra` and `clip-platform`
//! implement the ports.

// Public module exports
pub mod clipboard;
pub mod config;
pub mod network;
pub mod notification;
pub mod pasteboard;
pub mod ports;
pub mod sync;

// Re-export commonly used types at the crate root
pub use clipboard::{ClipboardSnippet, SnapshotFile, SnapshotItem, SnapshotPayload};
pub use config::{RemoteCredentials, SyncConfig};
pub use notification::{AlertAction, UserAlert};
pub use pasteboard::{GateState, PasteboardGate};
pub use sync::{LastProcessedMarker, UploadQueue};
