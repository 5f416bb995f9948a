use async_trait::async_trait;

use crate::notification::UserAlert;

#[async_trait]
pub trait NotificationPort: Send + Sync {
    async fn deliver(&self, alert: UserAlert) -> anyhow::Result<()>;

    /// Withdraws already delivered alerts with the given identifiers.
    async fn remove_delivered(&self, identifiers: &[String]) -> anyhow::Result<()>;
}

pub trait HapticPort: Send + Sync {
    /// System-level sound/feedback preference.
    fn sound_enabled(&self) -> bool;
    fn vibrate(&self);
}
