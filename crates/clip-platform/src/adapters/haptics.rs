use tracing::info;

use clip_core::ports::HapticPort;

/// Haptic cue rendered as a log line.
#[derive(Debug, Clone, Copy)]
pub struct LogHaptics {
    sound_enabled: bool,
}

impl LogHaptics {
    pub fn new(sound_enabled: bool) -> Self {
        Self { sound_enabled }
    }
}

impl HapticPort for LogHaptics {
    fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    fn vibrate(&self) {
        info!(target: "clip_sync::haptics", "Haptic cue");
    }
}
