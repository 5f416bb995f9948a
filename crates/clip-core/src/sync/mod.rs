//! Per-pipeline sync bookkeeping.

mod marker;
mod upload_queue;

pub use marker::LastProcessedMarker;
pub use upload_queue::UploadQueue;
