//! User-visible alerts raised by the sync core.
//!
//! 同步核心发出的用户提醒。

use uuid::Uuid;

/// Identifier shared by every "clipboard changed" alert, so a refresh can
/// withdraw the delivered ones.
pub const CLIPBOARD_CHANGED_ALERT_ID: &str = "ClipboardChanged";

/// Prefix of cloud message alert identifiers.
pub const CLOUD_MESSAGE_ALERT_PREFIX: &str = "PendingMessageCopy-";

/// Category shared by alerts that can read or write the clipboard.
pub const CLIPBOARD_READER_CATEGORY: &str = "ClipboardReader";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertAction {
    /// Acting on the alert copies `text` to the pasteboard.
    CopyToPasteboard { text: String },
}

impl AlertAction {
    pub fn name(&self) -> &'static str {
        match self {
            AlertAction::CopyToPasteboard { .. } => "CopyToPasteboard",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAlert {
    pub identifier: String,
    pub category: String,
    pub title: String,
    pub body: String,
    pub action: Option<AlertAction>,
}

impl UserAlert {
    /// Alert for an external clipboard change.
    pub fn clipboard_changed() -> Self {
        Self {
            identifier: CLIPBOARD_CHANGED_ALERT_ID.to_string(),
            category: CLIPBOARD_READER_CATEGORY.to_string(),
            title: "Clipboard Changed".to_string(),
            body: "Successfully saved to Clip.".to_string(),
            action: None,
        }
    }

    /// Alert for a message pulled from the remote endpoint. Each one gets a
    /// unique identifier so alerts stack instead of replacing each other.
    pub fn cloud_message(text: impl Into<String>) -> Self {
        Self {
            identifier: format!("{}{}", CLOUD_MESSAGE_ALERT_PREFIX, Uuid::new_v4()),
            category: CLIPBOARD_READER_CATEGORY.to_string(),
            title: "Cloud Message Received".to_string(),
            body: "Swipe down to copy to clipboard.".to_string(),
            action: Some(AlertAction::CopyToPasteboard { text: text.into() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cloud_alerts_carry_copy_action_and_unique_ids() {
        let first = UserAlert::cloud_message("hello");
        let second = UserAlert::cloud_message("hello");

        assert!(first.identifier.starts_with(CLOUD_MESSAGE_ALERT_PREFIX));
        assert_ne!(first.identifier, second.identifier);
        assert_eq!(
            first.action,
            Some(AlertAction::CopyToPasteboard {
                text: "hello".to_string()
            })
        );
    }

    #[test]
    fn clipboard_changed_alert_uses_fixed_identifier() {
        let alert = UserAlert::clipboard_changed();
        assert_eq!(alert.identifier, CLIPBOARD_CHANGED_ALERT_ID);
        assert!(alert.action.is_none());
    }
}
