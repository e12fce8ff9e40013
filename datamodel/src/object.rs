//! FILENAME: datamodel/src/object.rs
//! PURPOSE: Data model objects and their resolved field catalogs.
//! CONTEXT: Objects form an inheritance tree through `parentName`. The server
//! lists each object's own fields and calculated fields; fields of ancestor
//! objects are merged in here so a lookup on any object sees everything it
//! inherits, with the owner left pointing at the declaring object.

use crate::field::{Field, BASE_EVENT};
use crate::{log_debug, log_warn};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ============================================================================
// DESCRIPTION FORMAT (as sent by the server)
// ============================================================================

/// One object entry of the description's `objects` array.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ObjectDescription {
    pub object_name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub parent_name: Option<String>,
    #[serde(default)]
    pub lineage: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub calculations: Vec<Calculation>,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
}

/// A calculation (eval, lookup, regex, geoip) that produces output fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calculation {
    #[serde(rename = "calculationID", default)]
    pub calculation_id: String,
    #[serde(default)]
    pub calculation_type: String,
    #[serde(default)]
    pub expression: Option<String>,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub output_fields: Vec<Field>,
}

/// A search constraint narrowing the events an object covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub search: String,
    #[serde(default)]
    pub owner: String,
}

// ============================================================================
// DATA MODEL OBJECT
// ============================================================================

/// An object of a data model with its field catalog fully resolved.
#[derive(Debug, Clone)]
pub struct DataModelObject {
    name: String,
    display_name: String,
    parent_name: Option<String>,
    lineage: String,
    fields: Vec<Field>,
    field_index: FxHashMap<String, usize>,
    calculations: Vec<Calculation>,
    constraints: Vec<Constraint>,
    model_name: String,
    model_accelerated: bool,
}

impl DataModelObject {
    /// Builds the object named `name` out of the parsed description, merging
    /// in the fields of every ancestor.
    pub(crate) fn resolve(
        name: &str,
        descriptions: &FxHashMap<String, ObjectDescription>,
        model_name: &str,
        model_accelerated: bool,
    ) -> Option<Self> {
        let description = descriptions.get(name)?;
        let chain = ancestor_chain(name, descriptions);

        let mut fields: Vec<Field> = Vec::new();
        let mut field_index: FxHashMap<String, usize> = FxHashMap::default();

        // Nearest declaration wins: walk from the object itself up to the root.
        for object_name in &chain {
            let Some(object) = descriptions.get(*object_name) else {
                continue;
            };
            let declared = object.fields.iter().chain(
                object
                    .calculations
                    .iter()
                    .flat_map(|calculation| calculation.output_fields.iter()),
            );
            for field in declared {
                if field_index.contains_key(&field.name) {
                    continue;
                }
                let mut field = field.clone();
                if field.owner.is_empty() {
                    field.owner = object.object_name.clone();
                }
                if field.display_name.is_empty() {
                    field.display_name = field.name.clone();
                }
                field_index.insert(field.name.clone(), fields.len());
                fields.push(field);
            }
        }

        // Event-based roots always carry the BaseEvent fields.
        let root_parent = chain
            .last()
            .and_then(|root| descriptions.get(*root))
            .and_then(|root| root.parent_name.as_deref());
        if root_parent == Some(BASE_EVENT) {
            for field in Field::base_event_fields() {
                if !field_index.contains_key(&field.name) {
                    field_index.insert(field.name.clone(), fields.len());
                    fields.push(field);
                }
            }
        }

        let lineage = description.lineage.clone().unwrap_or_else(|| {
            chain.iter().rev().copied().collect::<Vec<_>>().join(".")
        });

        log_debug!(
            "MODEL",
            "resolved object={} model={} fields={} lineage={}",
            name,
            model_name,
            fields.len(),
            lineage
        );

        Some(DataModelObject {
            name: description.object_name.clone(),
            display_name: description
                .display_name
                .clone()
                .unwrap_or_else(|| description.object_name.clone()),
            parent_name: description.parent_name.clone(),
            lineage,
            fields,
            field_index,
            calculations: description.calculations.clone(),
            constraints: description.constraints.clone(),
            model_name: model_name.to_string(),
            model_accelerated,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Name of the parent object, or a base class such as `BaseEvent`.
    pub fn parent_name(&self) -> Option<&str> {
        self.parent_name.as_deref()
    }

    /// Dot-separated path from the root object down to this one.
    pub fn lineage(&self) -> &str {
        &self.lineage
    }

    /// Name of the data model this object belongs to.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Whether the owning data model has acceleration enabled.
    pub fn is_model_accelerated(&self) -> bool {
        self.model_accelerated
    }

    /// All fields visible on this object, inherited ones included.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Looks up a field by name, including inherited fields.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.field_index.get(name).map(|&idx| &self.fields[idx])
    }

    pub fn contains_field(&self, name: &str) -> bool {
        self.field_index.contains_key(name)
    }

    pub fn calculations(&self) -> &[Calculation] {
        &self.calculations
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Search that returns the events this object covers.
    pub fn search_query(&self) -> String {
        format!("| datamodel {} {} search", self.model_name, self.name)
    }

    /// Search that builds a local acceleration summary for this object.
    pub fn local_acceleration_query(&self) -> String {
        format!("{} | tscollect", self.search_query())
    }
}

/// Returns `name` followed by its ancestors that exist in the description,
/// nearest first. Stops at the first repeated name.
fn ancestor_chain<'a>(
    name: &'a str,
    descriptions: &'a FxHashMap<String, ObjectDescription>,
) -> SmallVec<[&'a str; 4]> {
    let mut chain: SmallVec<[&str; 4]> = SmallVec::new();
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut current = Some(name);

    while let Some(object_name) = current {
        let Some(object) = descriptions.get(object_name) else {
            break;
        };
        if !seen.insert(object_name) {
            log_warn!("MODEL", "inheritance cycle at object={}", object_name);
            break;
        }
        chain.push(object.object_name.as_str());
        current = object.parent_name.as_deref();
    }

    chain
}
