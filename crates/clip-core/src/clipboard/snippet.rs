use rand::Rng;

/// Range of the nonce attached to every upload attempt.
pub const NONCE_RANGE: std::ops::RangeInclusive<u16> = 1000..=9999;

/// Clipboard text on its way to the remote endpoint.
///
/// A new snippet (and therefore a new nonce) is built for every attempt, so
/// the server can tell a retry apart from the original request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardSnippet {
    pub text: String,
    pub device: String,
    pub nonce: u16,
}

impl ClipboardSnippet {
    pub fn new(text: impl Into<String>, device: impl Into<String>) -> Self {
        let nonce = rand::rng().random_range(NONCE_RANGE);
        Self::with_nonce(text, device, nonce)
    }

    pub fn with_nonce(text: impl Into<String>, device: impl Into<String>, nonce: u16) -> Self {
        Self {
            text: text.into(),
            device: device.into(),
            nonce,
        }
    }
}
