//! FILENAME: datamodel/src/model.rs
//! PURPOSE: Parses a data model description and its acceleration settings.
//! CONTEXT: The server stores both as JSON strings inside the data model
//! entity (`description` and `acceleration`). Parsing resolves every object
//! up front so field lookups never touch the raw description again.

use crate::error::DataModelError;
use crate::log_info;
use crate::object::{DataModelObject, ObjectDescription};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// ACCELERATION
// ============================================================================

/// Acceleration settings of a data model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccelerationSettings {
    /// Whether the server maintains an acceleration summary for the model.
    #[serde(default, deserialize_with = "flexible_bool")]
    pub enabled: bool,

    /// How far back the summary reaches (e.g. "-1mon").
    #[serde(default)]
    pub earliest_time: Option<String>,

    /// Cron schedule of the summary build.
    #[serde(default)]
    pub cron_schedule: Option<String>,
}

fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(flag_value(&value))
}

/// Reads a boolean the way the server writes them: `true`, `1` or `"1"`
/// depending on the endpoint. Anything unrecognized is false.
pub fn flag_value(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_i64().map(|n| n != 0).unwrap_or(false),
        serde_json::Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "t" | "yes" | "y"
        ),
        _ => false,
    }
}

// ============================================================================
// DESCRIPTION FORMAT
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelDescription {
    #[serde(default)]
    model_name: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    objects: Vec<ObjectDescription>,
}

// ============================================================================
// DATA MODEL
// ============================================================================

/// A data model with all of its objects resolved.
#[derive(Debug, Clone)]
pub struct DataModel {
    name: String,
    display_name: String,
    description: String,
    objects: Vec<DataModelObject>,
    acceleration: AccelerationSettings,
}

impl DataModel {
    /// Parses a description JSON document.
    ///
    /// `name` is the entity name on the server and takes precedence over the
    /// description's `modelName`. `acceleration` is the raw acceleration JSON;
    /// `None` or an empty string means not accelerated.
    pub fn from_description(
        name: &str,
        description: &str,
        acceleration: Option<&str>,
    ) -> Result<Self, DataModelError> {
        let parsed: ModelDescription = serde_json::from_str(description)?;

        let acceleration = match acceleration.map(str::trim) {
            Some(raw) if !raw.is_empty() => serde_json::from_str(raw)?,
            _ => AccelerationSettings::default(),
        };

        let name = if name.is_empty() {
            parsed.model_name.clone().ok_or_else(|| {
                DataModelError::InvalidDescription("data model has no name".to_string())
            })?
        } else {
            name.to_string()
        };

        // Keep the server's object order; index by name for ancestor walks.
        let order: Vec<String> = parsed
            .objects
            .iter()
            .map(|object| object.object_name.clone())
            .collect();
        let mut descriptions: FxHashMap<String, ObjectDescription> = FxHashMap::default();
        for object in parsed.objects {
            if descriptions.contains_key(&object.object_name) {
                return Err(DataModelError::InvalidDescription(format!(
                    "duplicate object '{}'",
                    object.object_name
                )));
            }
            descriptions.insert(object.object_name.clone(), object);
        }

        let objects: Vec<DataModelObject> = order
            .iter()
            .filter_map(|object_name| {
                DataModelObject::resolve(object_name, &descriptions, &name, acceleration.enabled)
            })
            .collect();

        log_info!(
            "MODEL",
            "parsed data model={} objects={} accelerated={}",
            name,
            objects.len(),
            acceleration.enabled
        );

        Ok(DataModel {
            display_name: parsed.display_name.unwrap_or_else(|| name.clone()),
            description: parsed.description.unwrap_or_default(),
            name,
            objects,
            acceleration,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn objects(&self) -> &[DataModelObject] {
        &self.objects
    }

    /// Looks up an object by name.
    pub fn object(&self, name: &str) -> Option<&DataModelObject> {
        self.objects.iter().find(|object| object.name() == name)
    }

    pub fn acceleration(&self) -> &AccelerationSettings {
        &self.acceleration
    }

    pub fn is_accelerated(&self) -> bool {
        self.acceleration.enabled
    }
}
