use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history store unavailable: {0}")]
    Unavailable(String),

    #[error("history io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("history encoding error: {0}")]
    Encoding(String),
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot directory not readable: {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot not readable: {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot malformed: {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },
}

/// Failures talking to the remote clipboard endpoint.
///
/// 与远端剪贴板端点通信时的错误。
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("invalid remote url: {0}")]
    InvalidUrl(String),

    #[error("remote request timed out")]
    Timeout,

    #[error("remote connection failed: {0}")]
    Connection(String),

    #[error("remote returned HTTP {status}")]
    Status { status: u16 },

    #[error("remote response malformed: {0}")]
    Malformed(String),

    #[error("remote request failed: {0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum PasteboardError {
    #[error("pasteboard unavailable: {0}")]
    Unavailable(String),

    #[error("pasteboard write failed: {0}")]
    Write(String),
}

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("watch path is empty")]
    EmptyPath,

    #[error("watch path does not exist: {0}")]
    NotFound(PathBuf),

    #[error("watch path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to watch {path}: {reason}")]
    Backend { path: PathBuf, reason: String },
}
