use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForumError {
    /// The server answered, but not with HTTP 200.
    #[error("request to {url} returned status {status}")]
    Fetch { url: String, status: u16 },

    /// Connection-level failure (DNS, timeout, TLS). Passed through
    /// unmodified; retrying is the caller's business.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("resource path is empty")]
    EmptyResource,

    /// A search-result link that board/thread/message ids could not be
    /// recovered from. Fatal for the whole search call.
    #[error("cannot decode ids from search link: {0}")]
    LinkDecode(String),

    /// The read log could not be opened, read or appended to.
    #[error("read log at {path} unavailable: {source}")]
    ReadLog {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ForumError>;
