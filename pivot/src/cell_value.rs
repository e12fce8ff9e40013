//! FILENAME: pivot/src/cell_value.rs
//! PURPOSE: Aggregated values shown in the cells of a pivot table.

use crate::error::{PivotError, PivotResult};
use crate::field_ref::FieldRef;
use crate::functions::{cell_value_functions, StatsFunction};
use datamodel::Field;
use serde::Serialize;

/// A stats function applied to a field, displayed under `label`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CellValue {
    #[serde(flatten)]
    pub field: FieldRef,
    pub label: String,
    #[serde(rename = "value")]
    pub stats_fn: StatsFunction,
    pub sparkline: bool,
}

impl CellValue {
    /// Fails with `InvalidArgument` when `stats_fn` is not allowed for the
    /// field's type. Boolean fields allow none.
    pub fn new(
        field: &Field,
        label: impl Into<String>,
        stats_fn: StatsFunction,
        sparkline: bool,
    ) -> PivotResult<Self> {
        if !cell_value_functions(field.field_type).contains(&stats_fn) {
            return Err(PivotError::InvalidArgument(format!(
                "stats function '{}' is not allowed on {} field '{}'",
                stats_fn, field.field_type, field.name
            )));
        }

        Ok(CellValue {
            field: FieldRef::from(field),
            label: label.into(),
            stats_fn,
            sparkline,
        })
    }
}
