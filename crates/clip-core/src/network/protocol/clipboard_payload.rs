use serde::{Deserialize, Serialize};

use crate::clipboard::meta_keys::remote;
use crate::clipboard::ClipboardSnippet;

/// Body of the outbound `PUT`.
///
/// ```json
/// {"Clipboard": "...", "Type": "Text", "Device": "...", "Random_number": "1234"}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CloudClipboardPayload {
    #[serde(rename = "Clipboard")]
    pub clipboard: String,
    #[serde(rename = "Type")]
    pub content_type: String,
    #[serde(rename = "Device")]
    pub device: String,
    #[serde(rename = "Random_number")]
    pub random_number: String,
}

impl From<&ClipboardSnippet> for CloudClipboardPayload {
    fn from(snippet: &ClipboardSnippet) -> Self {
        Self {
            clipboard: snippet.text.clone(),
            content_type: remote::TYPE_TEXT.to_string(),
            device: snippet.device.clone(),
            random_number: snippet.nonce.to_string(),
        }
    }
}

/// Body of the inbound `GET` response. Only `Clipboard` is consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudClipboardResponse {
    pub clipboard: Option<String>,
}

impl CloudClipboardResponse {
    /// Parses the response body.
    ///
    /// Invalid JSON is an error. A document without a string `Clipboard`
    /// field parses to `clipboard: None`.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        let clipboard = value
            .get(remote::CLIPBOARD)
            .and_then(|v| v.as_str())
            .map(str::to_string);
        Ok(Self { clipboard })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_uses_remote_field_names() {
        let snippet = ClipboardSnippet::with_nonce("hello", "phone", 4821);
        let json = serde_json::to_value(CloudClipboardPayload::from(&snippet)).unwrap();

        assert_eq!(json["Clipboard"], "hello");
        assert_eq!(json["Type"], "Text");
        assert_eq!(json["Device"], "phone");
        assert_eq!(json["Random_number"], "4821");
    }

    #[test]
    fn response_reads_clipboard_field_only() {
        let response =
            CloudClipboardResponse::from_slice(br#"{"Clipboard":"from cloud","Device":"mac"}"#)
                .unwrap();
        assert_eq!(response.clipboard.as_deref(), Some("from cloud"));
    }

    #[test]
    fn response_without_string_clipboard_is_empty() {
        let missing = CloudClipboardResponse::from_slice(br#"{"Device":"mac"}"#).unwrap();
        let wrong_type = CloudClipboardResponse::from_slice(br#"{"Clipboard":42}"#).unwrap();

        assert_eq!(missing.clipboard, None);
        assert_eq!(wrong_type.clipboard, None);
    }

    #[test]
    fn malformed_response_is_an_error() {
        assert!(CloudClipboardResponse::from_slice(b"not json").is_err());
    }
}
