//! Pasteboard change gate state machine.
//!
//! Pure transition logic; reading the pasteboard and raising alerts is left
//! to the application layer.
//!
//! ```text
//!            ignore_next_change
//!   Armed ───────────────────────→ Suppressed
//!     ↑                                │
//!     └──────── pasteboard change ─────┘   (consumed, nothing happens)
//! ```

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    /// The next change is external and gets the full reaction.
    #[default]
    Armed,
    /// The next change is this system's own write and is swallowed once.
    Suppressed,
}

/// Outcome of feeding one pasteboard change into the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateTransition {
    /// A pending suppression was consumed; the gate is armed again.
    ConsumedSuppression,
    /// The change should be handled.
    Deliver,
}

#[derive(Debug, Default)]
pub struct PasteboardGate {
    state: GateState,
}

impl PasteboardGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Called right before this system writes to the pasteboard.
    /// Repeated calls still suppress exactly one change.
    pub fn ignore_next_change(&mut self) {
        debug!(previous = ?self.state, "Pasteboard gate suppressing next change");
        self.state = GateState::Suppressed;
    }

    pub fn on_pasteboard_changed(&mut self) -> GateTransition {
        match self.state {
            GateState::Suppressed => {
                self.state = GateState::Armed;
                GateTransition::ConsumedSuppression
            }
            GateState::Armed => GateTransition::Deliver,
        }
    }
}

/// Facts gathered when an armed gate delivers a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeContext {
    pub in_foreground: bool,
    /// The pasteboard carries this app's own clipping type.
    pub contains_own_content: bool,
    pub haptics_allowed: bool,
    pub clipboard_notification_enabled: bool,
}

/// What to do for a delivered change. `React` always includes the outbound
/// extraction; the flags only cover the user-facing feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeReaction {
    /// Own content seen while in the background: nothing to do.
    SkipOwnContent,
    React { haptic: bool, alert: bool },
}

impl ChangeReaction {
    pub fn plan(context: ChangeContext) -> Self {
        if !context.in_foreground && context.contains_own_content {
            return ChangeReaction::SkipOwnContent;
        }

        ChangeReaction::React {
            haptic: context.haptics_allowed,
            alert: context.clipboard_notification_enabled,
        }
    }
}
