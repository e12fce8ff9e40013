//! FILENAME: pivot/src/filter.rs
//! PURPOSE: Filters that narrow the events a pivot aggregates.
//! CONTEXT: There is one comparison filter per filterable field type, plus the
//! limit filter that keeps the top or bottom N values of a field. Which variant
//! a caller gets is decided by the field's declared type, never by the caller.

use crate::error::{PivotError, PivotResult};
use crate::field_ref::{type_mismatch, FieldRef};
use crate::functions::{
    limit_functions, BooleanComparison, Ipv4Comparison, NumberComparison, SortDirection,
    StatsFunction, StringComparison, LIMIT_FIELD_TYPES,
};
use datamodel::{Field, FieldType};
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// COMPARISON FILTERS
// ============================================================================

/// A field compared against a constant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonFilter<C, T> {
    #[serde(flatten)]
    pub field: FieldRef,
    pub comparator: C,
    #[serde(rename = "compareTo")]
    pub compare_to: T,
}

pub type BooleanFilter = ComparisonFilter<BooleanComparison, bool>;
pub type StringFilter = ComparisonFilter<StringComparison, String>;
pub type Ipv4Filter = ComparisonFilter<Ipv4Comparison, String>;
pub type NumberFilter = ComparisonFilter<NumberComparison, f64>;

/// Ties a comparator set to the field type it applies to and the operand it
/// compares against.
pub trait Comparison: Copy + Sized {
    type Operand;

    /// The only field type this comparator set accepts.
    const FIELD_TYPE: FieldType;

    /// Rejects operands the server cannot represent.
    fn check_operand(_operand: &Self::Operand) -> PivotResult<()> {
        Ok(())
    }

    fn wrap(filter: ComparisonFilter<Self, Self::Operand>) -> PivotFilter;
}

impl Comparison for BooleanComparison {
    type Operand = bool;
    const FIELD_TYPE: FieldType = FieldType::Boolean;

    fn wrap(filter: BooleanFilter) -> PivotFilter {
        PivotFilter::Boolean(filter)
    }
}

impl Comparison for StringComparison {
    type Operand = String;
    const FIELD_TYPE: FieldType = FieldType::String;

    fn wrap(filter: StringFilter) -> PivotFilter {
        PivotFilter::String(filter)
    }
}

impl Comparison for Ipv4Comparison {
    type Operand = String;
    const FIELD_TYPE: FieldType = FieldType::Ipv4;

    fn wrap(filter: Ipv4Filter) -> PivotFilter {
        PivotFilter::Ipv4(filter)
    }
}

impl Comparison for NumberComparison {
    type Operand = f64;
    const FIELD_TYPE: FieldType = FieldType::Number;

    /// NaN and infinities have no JSON form.
    fn check_operand(operand: &f64) -> PivotResult<()> {
        if !operand.is_finite() {
            return Err(PivotError::InvalidArgument(format!(
                "number comparison operand must be finite, got {}",
                operand
            )));
        }
        Ok(())
    }

    fn wrap(filter: NumberFilter) -> PivotFilter {
        PivotFilter::Number(filter)
    }
}

// ============================================================================
// LIMIT FILTER
// ============================================================================

/// Keeps only the `limit_amount` values of a field that rank highest (or
/// lowest) by a stats function over another field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitFilter {
    #[serde(flatten)]
    pub field: FieldRef,
    pub attribute_name: String,
    pub attribute_owner: String,
    pub limit_type: SortDirection,
    pub limit_amount: u64,
    #[serde(rename = "statsFn")]
    pub stats_fn: StatsFunction,
}

impl LimitFilter {
    pub(crate) fn new(
        field: &Field,
        sort_attribute: &Field,
        direction: SortDirection,
        limit_amount: i64,
        stats_fn: StatsFunction,
    ) -> PivotResult<Self> {
        for f in [field, sort_attribute] {
            if !LIMIT_FIELD_TYPES.contains(&f.field_type) {
                return Err(type_mismatch(
                    f,
                    "limit filters only apply to string, ipv4 and number fields",
                ));
            }
        }

        if limit_amount <= 0 {
            return Err(PivotError::InvalidArgument(format!(
                "limit amount must be positive, got {}",
                limit_amount
            )));
        }

        if !limit_functions(field.field_type).contains(&stats_fn) {
            return Err(PivotError::InvalidArgument(format!(
                "stats function '{}' cannot rank a limit on {} field '{}'",
                stats_fn, field.field_type, field.name
            )));
        }

        Ok(LimitFilter {
            field: FieldRef::from(field),
            attribute_name: sort_attribute.name.clone(),
            attribute_owner: sort_attribute.owner.clone(),
            limit_type: direction,
            limit_amount: limit_amount as u64,
            stats_fn,
        })
    }
}

// ============================================================================
// FILTER SUM TYPE
// ============================================================================

/// Any filter of a pivot specification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PivotFilter {
    Boolean(BooleanFilter),
    String(StringFilter),
    Ipv4(Ipv4Filter),
    Number(NumberFilter),
    Limit(LimitFilter),
}

impl PivotFilter {
    /// Builds a typed comparison filter, checking the field's type against
    /// the comparator set.
    pub fn comparison<C: Comparison>(
        field: &Field,
        comparator: C,
        compare_to: C::Operand,
    ) -> PivotResult<Self> {
        if field.field_type != C::FIELD_TYPE {
            return Err(type_mismatch(
                field,
                format!("expected a {} field for this comparator", C::FIELD_TYPE),
            ));
        }
        C::check_operand(&compare_to)?;
        Ok(C::wrap(ComparisonFilter {
            field: FieldRef::from(field),
            comparator,
            compare_to,
        }))
    }

    /// Builds a comparison filter from a comparator token and a JSON operand.
    ///
    /// The field type picks the variant. The operand must have the matching
    /// JSON type (`TypeMismatch`) and the token must belong to that variant's
    /// comparator set (`InvalidArgument`).
    pub fn from_tokens(field: &Field, comparator: &str, compare_to: &Value) -> PivotResult<Self> {
        match field.field_type {
            FieldType::Boolean => {
                let operand = compare_to
                    .as_bool()
                    .ok_or_else(|| operand_mismatch(field, "a boolean", compare_to))?;
                Self::comparison(field, comparator.parse::<BooleanComparison>()?, operand)
            }
            FieldType::String => {
                let operand = compare_to
                    .as_str()
                    .ok_or_else(|| operand_mismatch(field, "a string", compare_to))?;
                Self::comparison(
                    field,
                    comparator.parse::<StringComparison>()?,
                    operand.to_string(),
                )
            }
            FieldType::Ipv4 => {
                let operand = compare_to
                    .as_str()
                    .ok_or_else(|| operand_mismatch(field, "a string", compare_to))?;
                Self::comparison(field, comparator.parse::<Ipv4Comparison>()?, operand.to_string())
            }
            FieldType::Number => {
                let operand = compare_to
                    .as_f64()
                    .ok_or_else(|| operand_mismatch(field, "a number", compare_to))?;
                Self::comparison(field, comparator.parse::<NumberComparison>()?, operand)
            }
            FieldType::Timestamp | FieldType::ObjectCount | FieldType::ChildCount => Err(
                type_mismatch(field, "no comparison filter exists for this field type"),
            ),
        }
    }

    /// The filtered field.
    pub fn field(&self) -> &FieldRef {
        match self {
            PivotFilter::Boolean(f) => &f.field,
            PivotFilter::String(f) => &f.field,
            PivotFilter::Ipv4(f) => &f.field,
            PivotFilter::Number(f) => &f.field,
            PivotFilter::Limit(f) => &f.field,
        }
    }
}

fn operand_mismatch(field: &Field, expected: &str, got: &Value) -> PivotError {
    type_mismatch(field, format!("compareTo must be {}, got {}", expected, got))
}
