//! FILENAME: pivot/src/split.rs
//! PURPOSE: Row and column splits.
//! CONTEXT: A split breaks the aggregated results out by the values of one
//! field. The field's type decides which shapes are possible:
//! - string:    one row/column per value, optionally only the top or bottom N
//! - number:    one per value (`display: "all"`) or bucketed into ranges
//! - boolean:   two buckets with caller-chosen labels
//! - timestamp: binned by a period
//!
//! Row and column splits share the same shapes; a row split also has a label.

use crate::error::{PivotError, PivotResult};
use crate::field_ref::{type_mismatch, FieldRef};
use crate::functions::{SortDirection, SplitDisplay, TimestampBinning};
use datamodel::{Field, FieldType};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

// ============================================================================
// RANGES
// ============================================================================

/// Bucketing of a number split. Unset members are left to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberRanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_number_of: Option<i64>,
}

impl NumberRanges {
    /// Ranges of width `size` from `start` to `end`, at most `max_number_of` of them.
    pub fn new(start: i64, end: i64, size: i64, max_number_of: i64) -> Self {
        NumberRanges {
            start: Some(start),
            end: Some(end),
            size: Some(size),
            max_number_of: Some(max_number_of),
        }
    }

    fn validate(&self) -> PivotResult<()> {
        if let Some(size) = self.size.filter(|&size| size <= 0) {
            return Err(PivotError::InvalidArgument(format!(
                "range size must be positive, got {}",
                size
            )));
        }
        if let Some(max) = self.max_number_of.filter(|&max| max <= 0) {
            return Err(PivotError::InvalidArgument(format!(
                "maximum number of ranges must be positive, got {}",
                max
            )));
        }
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start > end {
                return Err(PivotError::InvalidArgument(format!(
                    "range start {} is after range end {}",
                    start, end
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SPLIT
// ============================================================================

/// How a split breaks out its field's values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SplitShape {
    /// Every distinct value (string and number fields).
    Values,
    /// The first `limit_amount` values of a string field in `direction` order.
    Limited {
        direction: SortDirection,
        limit_amount: i64,
    },
    /// Number buckets.
    Ranges(NumberRanges),
    Boolean {
        true_label: String,
        false_label: String,
    },
    Timestamp(TimestampBinning),
}

/// A validated split, shared by rows and columns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Split {
    field: FieldRef,
    shape: SplitShape,
}

impl Split {
    /// Checks the shape against the field's type, then the shape's arguments.
    pub fn new(field: &Field, shape: SplitShape) -> PivotResult<Self> {
        match (&shape, field.field_type) {
            (SplitShape::Values, FieldType::String | FieldType::Number) => {}
            (SplitShape::Values, _) => {
                return Err(type_mismatch(
                    field,
                    "plain splits apply to string and number fields",
                ))
            }
            (SplitShape::Limited { limit_amount, .. }, FieldType::String) => {
                if *limit_amount <= 0 {
                    return Err(PivotError::InvalidArgument(format!(
                        "split limit must be positive, got {}",
                        limit_amount
                    )));
                }
            }
            (SplitShape::Limited { .. }, _) => {
                return Err(type_mismatch(field, "limited splits apply to string fields"))
            }
            (SplitShape::Ranges(ranges), FieldType::Number) => ranges.validate()?,
            (SplitShape::Ranges(_), _) => {
                return Err(type_mismatch(field, "range splits apply to number fields"))
            }
            (SplitShape::Boolean { .. }, FieldType::Boolean) => {}
            (SplitShape::Boolean { .. }, _) => {
                return Err(type_mismatch(field, "boolean splits apply to boolean fields"))
            }
            (SplitShape::Timestamp(_), FieldType::Timestamp) => {}
            (SplitShape::Timestamp(_), _) => {
                return Err(type_mismatch(
                    field,
                    "timestamp splits apply to timestamp fields",
                ))
            }
        }

        Ok(Split {
            field: FieldRef::from(field),
            shape,
        })
    }

    pub fn field(&self) -> &FieldRef {
        &self.field
    }

    pub fn shape(&self) -> &SplitShape {
        &self.shape
    }

    /// Writes the split's members, with `label` after the field triple when given.
    fn write_entries<M: SerializeMap>(&self, map: &mut M, label: Option<&str>) -> Result<(), M::Error> {
        map.serialize_entry("fieldName", &self.field.field_name)?;
        map.serialize_entry("owner", &self.field.owner)?;
        map.serialize_entry("type", &self.field.field_type)?;
        if let Some(label) = label {
            map.serialize_entry("label", label)?;
        }

        match &self.shape {
            SplitShape::Values => {
                if self.field.field_type == FieldType::Number {
                    map.serialize_entry("display", &SplitDisplay::All)?;
                }
            }
            SplitShape::Limited {
                direction,
                limit_amount,
            } => {
                map.serialize_entry("limitType", direction)?;
                map.serialize_entry("limitAmount", limit_amount)?;
            }
            SplitShape::Ranges(ranges) => {
                map.serialize_entry("display", &SplitDisplay::Ranges)?;
                map.serialize_entry("ranges", ranges)?;
            }
            SplitShape::Boolean {
                true_label,
                false_label,
            } => {
                map.serialize_entry("trueLabel", true_label)?;
                map.serialize_entry("falseLabel", false_label)?;
            }
            SplitShape::Timestamp(binning) => {
                map.serialize_entry("period", binning)?;
            }
        }
        Ok(())
    }
}

/// A split along the rows of the pivot table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowSplit {
    pub split: Split,
    pub label: String,
}

impl Serialize for RowSplit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        self.split.write_entries(&mut map, Some(self.label.as_str()))?;
        map.end()
    }
}

/// A split along the columns of the pivot table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnSplit {
    pub split: Split,
}

impl Serialize for ColumnSplit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        self.split.write_entries(&mut map, None)?;
        map.end()
    }
}
