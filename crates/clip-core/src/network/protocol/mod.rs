mod clipboard_payload;

pub use clipboard_payload::{CloudClipboardPayload, CloudClipboardResponse};
