//! Error type shared by the fetcher, notifier and marker store.

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AlertError>;

#[derive(Error, Debug)]
pub enum AlertError {
    /// A required setting is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote service answered with a non-2xx status.
    #[error("{service} API returned status {status}: {body}")]
    Api {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AlertError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
