//! FILENAME: pivot/src/functions.rs
//! PURPOSE: Comparators, stats functions, sort directions, binning periods.
//! CONTEXT: Each enum is declared together with its wire token, and the
//! per-field-type tables below decide which members are legal. Validation and
//! serialization both read from here, so the two cannot disagree.

use crate::error::PivotError;
use datamodel::FieldType;
use std::fmt;
use std::str::FromStr;

/// Declares a fieldless enum whose variants map one-to-one onto wire tokens.
macro_rules! wire_tokens {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $token:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The token the server expects for this member.
            pub fn token(self) -> &'static str {
                match self {
                    $( $name::$variant => $token ),+
                }
            }

            pub fn from_token(token: &str) -> Option<Self> {
                match token {
                    $( $token => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.token())
            }
        }

        impl FromStr for $name {
            type Err = PivotError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_token(s).ok_or_else(|| {
                    PivotError::InvalidArgument(format!(
                        "'{}' is not a {} (expected one of: {})",
                        s,
                        stringify!($name),
                        Self::ALL.iter().map(|v| v.token()).collect::<Vec<_>>().join(", ")
                    ))
                })
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.token())
            }
        }
    };
}

// ============================================================================
// COMPARATORS
// ============================================================================

wire_tokens! {
    /// Comparators for filters on boolean fields.
    BooleanComparison {
        Equals => "=",
    }
}

wire_tokens! {
    /// Comparators for filters on string fields.
    StringComparison {
        Contains => "contains",
        EndsWith => "endsWith",
        StartsWith => "startsWith",
        Is => "is",
        IsNot => "isNot",
    }
}

wire_tokens! {
    /// Comparators for filters on IPv4 fields.
    Ipv4Comparison {
        Is => "is",
        IsNot => "isNot",
        StartsWith => "startsWith",
    }
}

wire_tokens! {
    /// Comparators for filters on number fields.
    NumberComparison {
        Equals => "=",
        AtLeast => ">=",
        GreaterThan => ">",
        AtMost => "<=",
        LessThan => "<",
    }
}

// ============================================================================
// AGGREGATION & ORDERING
// ============================================================================

wire_tokens! {
    /// Aggregation applied to a field in a cell value or a limit filter.
    StatsFunction {
        /// All values, duplicates included.
        List => "list",
        /// Distinct values.
        DistinctValues => "values",
        First => "first",
        Last => "last",
        Count => "count",
        DistinctCount => "dc",
        Sum => "sum",
        Average => "average",
        Max => "max",
        Min => "min",
        Stdev => "stdev",
        /// Span between earliest and latest timestamp.
        Duration => "duration",
        Earliest => "earliest",
        Latest => "latest",
    }
}

wire_tokens! {
    /// Which end of the sorted values a limit filter keeps.
    SortDirection {
        Ascending => "lowest",
        Descending => "highest",
        Default => "default",
    }
}

// ============================================================================
// SPLIT OPTIONS
// ============================================================================

wire_tokens! {
    /// Period a timestamp split bins its values into.
    TimestampBinning {
        Auto => "auto",
        Year => "year",
        Quarter => "quarter",
        Month => "month",
        Week => "week",
        Day => "day",
        Hour => "hour",
        Minute => "minute",
        Second => "second",
    }
}

wire_tokens! {
    /// How a number split presents its values.
    SplitDisplay {
        All => "all",
        Ranges => "ranges",
    }
}

// ============================================================================
// ALLOWED FUNCTION TABLES
// ============================================================================

/// Stats functions a cell value may apply to a field of the given type.
pub fn cell_value_functions(field_type: FieldType) -> &'static [StatsFunction] {
    use StatsFunction::*;
    match field_type {
        FieldType::String | FieldType::Ipv4 => {
            &[List, DistinctValues, First, Last, Count, DistinctCount]
        }
        FieldType::Number => &[
            Sum,
            Count,
            DistinctCount,
            Average,
            Max,
            Min,
            Stdev,
            List,
            DistinctValues,
        ],
        FieldType::Timestamp => &[Duration, Earliest, Latest, List, DistinctValues],
        FieldType::ObjectCount | FieldType::ChildCount => &[Count],
        FieldType::Boolean => &[],
    }
}

/// Stats functions a limit filter may rank by, keyed on the limited field's type.
pub fn limit_functions(field_type: FieldType) -> &'static [StatsFunction] {
    use StatsFunction::*;
    match field_type {
        FieldType::String | FieldType::Ipv4 => &[Count, DistinctCount],
        FieldType::Number => &[Count, DistinctCount, Average, Sum],
        _ => &[],
    }
}

/// Field types a limit filter accepts, for both the limited field and the
/// sort attribute.
pub const LIMIT_FIELD_TYPES: &[FieldType] = &[FieldType::String, FieldType::Ipv4, FieldType::Number];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparator_tokens() {
        assert_eq!(BooleanComparison::Equals.token(), "=");
        assert_eq!(StringComparison::StartsWith.token(), "startsWith");
        assert_eq!(StringComparison::IsNot.token(), "isNot");
        assert_eq!(Ipv4Comparison::StartsWith.token(), "startsWith");
        assert_eq!(NumberComparison::AtLeast.token(), ">=");
        assert_eq!(NumberComparison::GreaterThan.token(), ">");
        assert_eq!(NumberComparison::AtMost.token(), "<=");
        assert_eq!(NumberComparison::LessThan.token(), "<");
    }

    #[test]
    fn test_stats_tokens() {
        assert_eq!(StatsFunction::Average.token(), "average");
        assert_eq!(StatsFunction::DistinctCount.token(), "dc");
        assert_eq!(StatsFunction::DistinctValues.token(), "values");
        assert_eq!(StatsFunction::Count.token(), "count");
    }

    #[test]
    fn test_every_token_parses_back() {
        for f in StatsFunction::ALL {
            assert_eq!(f.token().parse::<StatsFunction>().unwrap(), *f);
        }
        for b in TimestampBinning::ALL {
            assert_eq!(TimestampBinning::from_token(b.token()), Some(*b));
        }
    }

    #[test]
    fn test_unknown_token_is_invalid_argument() {
        let err = "regex".parse::<StringComparison>().unwrap_err();
        assert!(matches!(err, PivotError::InvalidArgument(_)));
        // Same token, different comparator set.
        assert!("contains".parse::<Ipv4Comparison>().is_err());
    }

    #[test]
    fn test_serializes_as_token() {
        let json = serde_json::to_value(TimestampBinning::Day).unwrap();
        assert_eq!(json, serde_json::json!("day"));
        let json = serde_json::to_value(SortDirection::Ascending).unwrap();
        assert_eq!(json, serde_json::json!("lowest"));
    }

    #[test]
    fn test_boolean_allows_no_cell_functions() {
        assert!(cell_value_functions(FieldType::Boolean).is_empty());
        for field_type in [
            FieldType::Number,
            FieldType::String,
            FieldType::Ipv4,
            FieldType::Timestamp,
            FieldType::ObjectCount,
            FieldType::ChildCount,
        ] {
            // Every type leaves at least one function out.
            assert!(cell_value_functions(field_type).len() < StatsFunction::ALL.len());
        }
    }

    #[test]
    fn test_string_disallows_sum() {
        assert!(!cell_value_functions(FieldType::String).contains(&StatsFunction::Sum));
        assert!(cell_value_functions(FieldType::Number).contains(&StatsFunction::Sum));
    }
}
