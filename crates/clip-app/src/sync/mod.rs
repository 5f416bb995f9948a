//! Outbound and inbound sync pipelines.
//!
//! Each pipeline is a single task that owns its state and handles one
//! command at a time. Network calls and timers run in spawned tasks and
//! report back through the same command channel, so the in-flight flag,
//! the queue and the marker are only touched by the owning task.

mod inbound;
mod monitor;
mod outbound;
mod timer;
mod timings;

pub use inbound::{InboundStatus, InboundSyncHandle, InboundSyncPipeline};
pub use outbound::{OutboundStatus, OutboundSyncHandle, OutboundSyncPipeline};
pub use timings::SyncTimings;
