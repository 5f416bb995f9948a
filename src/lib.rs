//! clip-sync daemon: startup, wiring and the run loop.

pub mod bootstrap;
