//! FILENAME: datamodel/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataModelError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data model description: {0}")]
    InvalidDescription(String),
}
