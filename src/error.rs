use std::io;

use thiserror::Error;

/// Shape mismatches between a ServiceNow response body and the ticket summary format.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizationError {
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("response is missing the `{0}` field")]
    MissingField(&'static str),
    #[error("response contains no records")]
    EmptyResult,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error(transparent)]
    Normalization(#[from] NormalizationError),
    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
