mod app_state;
mod haptics;
mod notification;

pub use app_state::StaticAppState;
pub use haptics::LogHaptics;
pub use notification::LogNotificationSink;
