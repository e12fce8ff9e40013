//! FILENAME: datamodel/src/field.rs
//! PURPOSE: Field definitions of a data model object.
//! CONTEXT: Every field has a name, a declared type and an owner. The owner is
//! the object in the inheritance chain that declared the field, which is not
//! necessarily the object a pivot is built from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Owner name of the fields every event-based root object inherits.
pub const BASE_EVENT: &str = "BaseEvent";

// ============================================================================
// FIELD TYPE
// ============================================================================

/// Declared type of a data model field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    Number,
    String,
    Boolean,
    Ipv4,
    Timestamp,
    ObjectCount,
    ChildCount,
}

impl FieldType {
    /// Wire token used by the server for this type.
    pub fn token(self) -> &'static str {
        match self {
            FieldType::Number => "number",
            FieldType::String => "string",
            FieldType::Boolean => "boolean",
            FieldType::Ipv4 => "ipv4",
            FieldType::Timestamp => "timestamp",
            FieldType::ObjectCount => "objectCount",
            FieldType::ChildCount => "childCount",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

// ============================================================================
// FIELD
// ============================================================================

/// A field as read from the data model description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Name used to reference the field in searches and pivots.
    #[serde(rename = "fieldName")]
    pub name: String,

    /// Declared type.
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Object that declared the field.
    #[serde(default)]
    pub owner: String,

    /// Human-readable name (defaults to `name` when the server omits it).
    #[serde(default)]
    pub display_name: String,

    #[serde(default)]
    pub hidden: bool,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub multivalue: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType, owner: impl Into<String>) -> Self {
        let name = name.into();
        Field {
            display_name: name.clone(),
            name,
            field_type,
            owner: owner.into(),
            hidden: false,
            required: false,
            multivalue: false,
        }
    }

    /// The fields implicitly inherited from `BaseEvent`.
    pub fn base_event_fields() -> Vec<Field> {
        vec![
            Field::new("_time", FieldType::Timestamp, BASE_EVENT),
            Field::new("host", FieldType::String, BASE_EVENT),
            Field::new("source", FieldType::String, BASE_EVENT),
            Field::new("sourcetype", FieldType::String, BASE_EVENT),
        ]
    }
}
