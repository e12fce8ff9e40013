//! FILENAME: pivot/src/error.rs

use datamodel::FieldType;
use thiserror::Error;

/// Errors raised while building or submitting a pivot specification.
///
/// The first three are local: they come from an `add_*` call and leave the
/// specification untouched. The rest only come from submission.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PivotError {
    #[error("Unknown field '{field}' on data model object '{object}'")]
    UnknownField { field: String, object: String },

    #[error("Field '{field}' is of type {field_type}: {reason}")]
    TypeMismatch {
        field: String,
        field_type: FieldType,
        reason: String,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Server rejected the pivot (status {status}): {message}")]
    RemoteRejection { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed pivot response: {0}")]
    MalformedResponse(String),
}

pub type PivotResult<T> = Result<T, PivotError>;
