use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single request attempt with one credential.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("received status code: {0}")]
    Status(StatusCode),
}

/// Failure of the whole key-rotating fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no API keys configured")]
    NoKeysConfigured,
    #[error("all API keys failed: {last}")]
    AllKeysFailed { last: AttemptError },
}
