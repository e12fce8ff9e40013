//! FILENAME: pivot/src/field_ref.rs
//! PURPOSE: The `fieldName`/`owner`/`type` triple every pivot element carries.

use crate::error::{PivotError, PivotResult};
use datamodel::{DataModelObject, Field, FieldType};
use serde::Serialize;

/// Identifies a field in the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FieldRef {
    #[serde(rename = "fieldName")]
    pub field_name: String,
    pub owner: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl From<&Field> for FieldRef {
    fn from(field: &Field) -> Self {
        FieldRef {
            field_name: field.name.clone(),
            owner: field.owner.clone(),
            field_type: field.field_type,
        }
    }
}

/// Resolves `name` on `object`, or fails with `UnknownField`.
pub(crate) fn lookup<'a>(object: &'a DataModelObject, name: &str) -> PivotResult<&'a Field> {
    object.field(name).ok_or_else(|| PivotError::UnknownField {
        field: name.to_string(),
        object: object.name().to_string(),
    })
}

pub(crate) fn type_mismatch(field: &Field, reason: impl Into<String>) -> PivotError {
    PivotError::TypeMismatch {
        field: field.name.clone(),
        field_type: field.field_type,
        reason: reason.into(),
    }
}
