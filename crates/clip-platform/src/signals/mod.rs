//! Process signals as the cross-process notification channel.
//!
//! | signal  | meaning                           | channel  |
//! |---------|-----------------------------------|----------|
//! | SIGUSR1 | pasteboard changed                | gate     |
//! | SIGUSR2 | ignore the next pasteboard change | gate     |
//! | SIGHUP  | refresh history, clear alerts     | refresh  |
//! | SIGALRM | act on the latest actionable alert| activate |

use tokio::sync::mpsc;

use clip_core::pasteboard::{AlertActivation, PasteboardSignal, RefreshSignal};

#[cfg(unix)]
mod unix;

#[cfg(unix)]
pub use unix::spawn_signal_listener;

/// Channels the signal listener forwards into.
pub struct SignalTargets {
    pub gate: mpsc::Sender<PasteboardSignal>,
    pub refresh: mpsc::Sender<RefreshSignal>,
    pub activate: mpsc::Sender<AlertActivation>,
}
