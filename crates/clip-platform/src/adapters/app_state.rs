use clip_core::ports::AppStatePort;

/// Fixed foreground state. A headless daemon always runs in the background.
#[derive(Debug, Clone, Copy)]
pub struct StaticAppState {
    foreground: bool,
}

impl StaticAppState {
    pub fn background() -> Self {
        Self { foreground: false }
    }

    pub fn foreground() -> Self {
        Self { foreground: true }
    }
}

impl AppStatePort for StaticAppState {
    fn is_foreground(&self) -> bool {
        self.foreground
    }
}
