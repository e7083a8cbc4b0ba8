//! Error handling for the job tailor application

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobTailorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Profile error: {0}")]
    Profile(String),

    #[error("Profile validation failed: {0}")]
    ProfileValidation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Job not found: {0}")]
    JobNotFound(i64),
}

pub type Result<T> = std::result::Result<T, JobTailorError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for JobTailorError {
    fn from(err: anyhow::Error) -> Self {
        JobTailorError::InvalidInput(err.to_string())
    }
}

/// Convert reqwest errors to our custom error type
impl From<reqwest::Error> for JobTailorError {
    fn from(err: reqwest::Error) -> Self {
        JobTailorError::Network(err.to_string())
    }
}
