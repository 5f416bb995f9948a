use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use tracing::{debug, info};

use clip_core::clipboard::ClipboardSnippet;
use clip_core::config::RemoteCredentials;
use clip_core::network::protocol::{CloudClipboardPayload, CloudClipboardResponse};
use clip_core::ports::{RemoteClipboardPort, RemoteError};

/// Single-resource WebDAV client: `PUT` writes the shared clipboard JSON,
/// `GET` reads it back.
///
/// One attempt per call. Retrying is the caller's decision.
pub struct WebDavClipboardClient {
    client: reqwest::Client,
}

impl WebDavClipboardClient {
    pub fn new(timeout: Duration) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Other(format!("build HTTP client failed: {}", e)))?;
        Ok(Self { client })
    }

    fn parse_url(credentials: &RemoteCredentials) -> Result<reqwest::Url, RemoteError> {
        reqwest::Url::parse(&credentials.url)
            .map_err(|e| RemoteError::InvalidUrl(format!("{}: {}", credentials.url, e)))
    }
}

#[async_trait]
impl RemoteClipboardPort for WebDavClipboardClient {
    async fn upload(
        &self,
        credentials: &RemoteCredentials,
        snippet: &ClipboardSnippet,
    ) -> Result<(), RemoteError> {
        let url = Self::parse_url(credentials)?;
        let body = serde_json::to_vec(&CloudClipboardPayload::from(snippet))
            .map_err(|e| RemoteError::Other(format!("encode payload failed: {}", e)))?;

        debug!(url = %url, bytes = body.len(), nonce = snippet.nonce, "Uploading clipboard");
        let response = self
            .client
            .put(url)
            .header(AUTHORIZATION, credentials.authorization_header())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status_code(status));
        }

        info!(status = status.as_u16(), "Clipboard uploaded");
        Ok(())
    }

    async fn fetch_latest(
        &self,
        credentials: &RemoteCredentials,
    ) -> Result<Option<String>, RemoteError> {
        let url = Self::parse_url(credentials)?;

        debug!(url = %url, "Fetching remote clipboard");
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, credentials.authorization_header())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status_code(status));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let parsed = CloudClipboardResponse::from_slice(&body)
            .map_err(|e| RemoteError::Malformed(e.to_string()))?;
        Ok(parsed.clipboard)
    }
}

fn map_reqwest_error(error: reqwest::Error) -> RemoteError {
    if error.is_timeout() {
        RemoteError::Timeout
    } else if let Some(status) = error.status() {
        map_status_code(status)
    } else if error.is_connect() || error.is_request() {
        RemoteError::Connection(error.to_string())
    } else {
        RemoteError::Other(error.to_string())
    }
}

fn map_status_code(code: StatusCode) -> RemoteError {
    match code {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => RemoteError::Timeout,
        _ => RemoteError::Status {
            status: code.as_u16(),
        },
    }
}
