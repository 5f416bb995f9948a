//! clip-sync application layer
//!
//! Pipelines, the pasteboard monitor and the use cases that drive them.
//! Everything here talks to the outside world through `clip-core` ports.

pub mod deps;
pub mod sync;
pub mod usecases;

pub use deps::SyncDeps;
pub use sync::{
    InboundStatus, InboundSyncHandle, InboundSyncPipeline, OutboundStatus, OutboundSyncHandle,
    OutboundSyncPipeline, SyncTimings,
};
pub use usecases::{
    AlertActionHandler, CopyToPasteboardUseCase, MonitorTasks, PasteboardMonitor,
};
