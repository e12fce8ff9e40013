//! FILENAME: service/src/error.rs

use datamodel::DataModelError;
use pivot::PivotError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned status {status}: {message}")]
    Http { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Job {sid} not ready after {attempts} attempts")]
    JobNotReady { sid: String, attempts: u32 },

    #[error("Data model error: {0}")]
    DataModel(#[from] DataModelError),

    #[error("Pivot error: {0}")]
    Pivot(#[from] PivotError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
