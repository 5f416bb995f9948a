//! Remote endpoint wire formats.

pub mod protocol;

pub use protocol::{CloudClipboardPayload, CloudClipboardResponse};
