//! Pasteboard change gate and the signals that drive it.

pub mod gate;
pub mod signal;

pub use gate::{ChangeContext, ChangeReaction, GateState, GateTransition, PasteboardGate};
pub use signal::{AlertActivation, PasteboardSignal, RefreshSignal};
