use async_trait::async_trait;

use super::errors::RemoteError;
use crate::clipboard::ClipboardSnippet;
use crate::config::RemoteCredentials;

/// The remote clipboard endpoint.
#[async_trait]
pub trait RemoteClipboardPort: Send + Sync {
    /// Sends one snippet. `Ok` only for a 2xx response.
    async fn upload(
        &self,
        credentials: &RemoteCredentials,
        snippet: &ClipboardSnippet,
    ) -> Result<(), RemoteError>;

    /// Fetches the current remote clipboard text, `None` when the response
    /// has no text field.
    async fn fetch_latest(
        &self,
        credentials: &RemoteCredentials,
    ) -> Result<Option<String>, RemoteError>;
}
