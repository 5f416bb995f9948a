//! Use cases driven by pasteboard signals
//! 由剪贴板信号驱动的用例
//!
//! [signal listener / clipboard watcher]
//         ↓
// PasteboardMonitor (gate task)  ──→ OutboundSyncHandle::read_latest_and_upload
//         ↓
// [alert activation] ──→ AlertActionHandler
//         ↓
// CopyToPasteboardUseCase ──→ IgnoreNextChange + pasteboard write

pub mod alert_actions;
pub mod copy_to_pasteboard;
pub mod pasteboard_monitor;

pub use alert_actions::AlertActionHandler;
pub use copy_to_pasteboard::CopyToPasteboardUseCase;
pub use pasteboard_monitor::{MonitorTasks, PasteboardMonitor};
