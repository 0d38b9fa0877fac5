use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataMineError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to read config file {path:?}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Transport level failure: DNS, connect, TLS, body read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request to {url} failed with status: {status}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("failed to write {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, DataMineError>;
