//! Cross-process signals consumed by the pasteboard monitor.
//!
//! Facts only: each variant says what happened, not what to do about it.

/// Signals for the change gate. They share one channel so their relative
/// order is preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteboardSignal {
    /// The shared pasteboard changed.
    Changed,
    /// The next change will be this system's own write.
    IgnoreNextChange,
}

/// Another process asked for the local history to be reloaded and the
/// delivered "clipboard changed" alerts to be withdrawn. Travels on its own
/// channel, never through the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSignal;

/// The user acted on the most recent alert that carries an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertActivation;
